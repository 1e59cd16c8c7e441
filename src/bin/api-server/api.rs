use actix_cors::Cors;
use actix_web::{web, HttpResponse};
use restaurant_query::data::{Dish, Flag, Restaurant};
use restaurant_query::db::{self as db_api, DishSearchProps, RestaurantSearchProps};
use sqlx::SqlitePool;

use crate::error::{non_empty, ApiError, NO_DISHES, NO_RESTAURANT};

type ApiResult = Result<HttpResponse, ApiError>;

pub(super) struct ApiState {
    db_pool: SqlitePool,
}

impl ApiState {
    pub(super) fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }
}

/// Register every route together with the extractor configs that route
/// malformed paths and queries into [`ApiError::Validation`].
pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
    )
    .service(restaurants)
    .service(restaurant_details)
    .service(restaurants_by_cuisine)
    .service(filter_restaurants)
    .service(restaurants_sorted_by_rating)
    .service(dishes)
    .service(dish_details)
    .service(filter_dishes)
    .service(dishes_sorted_by_price);
}

pub(super) fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
}

#[derive(serde::Serialize)]
struct RestaurantsResp {
    restaurants: Vec<Restaurant>,
}

#[derive(serde::Serialize)]
struct RestaurantResp {
    restaurant: Restaurant,
}

#[derive(serde::Serialize)]
struct DishesResp {
    dishes: Vec<Dish>,
}

#[derive(serde::Serialize)]
struct DishResp {
    dish: Dish,
}

async fn search_restaurants(data: &ApiState, props: RestaurantSearchProps) -> ApiResult {
    // handler names are unit structs here, so the rows need another binding name
    let rows = db_api::get_restaurants(&data.db_pool, props).await?;
    Ok(HttpResponse::Ok().json(RestaurantsResp {
        restaurants: non_empty(rows, NO_RESTAURANT)?,
    }))
}

async fn search_dishes(data: &ApiState, props: DishSearchProps) -> ApiResult {
    let rows = db_api::get_dishes(&data.db_pool, props).await?;
    Ok(HttpResponse::Ok().json(DishesResp {
        dishes: non_empty(rows, NO_DISHES)?,
    }))
}

#[actix_web::get("/restaurants")]
pub(super) async fn restaurants(data: web::Data<ApiState>) -> ApiResult {
    search_restaurants(&data, RestaurantSearchProps::All).await
}

#[derive(serde::Deserialize)]
pub(super) struct IdPath {
    id: i64,
}

#[actix_web::get("/restaurants/details/{id}")]
pub(super) async fn restaurant_details(
    data: web::Data<ApiState>,
    path: web::Path<IdPath>,
) -> ApiResult {
    let restaurant = db_api::get_restaurant_by_id(&data.db_pool, path.id)
        .await?
        .ok_or(ApiError::NotFound(NO_RESTAURANT))?;
    Ok(HttpResponse::Ok().json(RestaurantResp { restaurant }))
}

#[derive(serde::Deserialize)]
pub(super) struct CuisinePath {
    cuisine: String,
}

#[actix_web::get("/restaurants/cuisine/{cuisine}")]
pub(super) async fn restaurants_by_cuisine(
    data: web::Data<ApiState>,
    path: web::Path<CuisinePath>,
) -> ApiResult {
    let CuisinePath { cuisine } = path.into_inner();
    search_restaurants(&data, RestaurantSearchProps::Cuisine(cuisine)).await
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RestaurantFilterQuery {
    is_veg: Option<Flag>,
    has_outdoor_seating: Option<Flag>,
    is_luxury: Option<Flag>,
}

#[actix_web::get("/restaurants/filter")]
pub(super) async fn filter_restaurants(
    data: web::Data<ApiState>,
    query: web::Query<RestaurantFilterQuery>,
) -> ApiResult {
    let mut builder = db_api::RestaurantFilterBuilder::default();
    if let Some(flag) = query.is_veg {
        builder.is_veg(flag);
    }
    if let Some(flag) = query.has_outdoor_seating {
        builder.has_outdoor_seating(flag);
    }
    if let Some(flag) = query.is_luxury {
        builder.is_luxury(flag);
    }
    let filter = builder
        .build()
        .map_err(|err| ApiError::Validation(format!("incomplete filter: {err}")))?;

    search_restaurants(&data, RestaurantSearchProps::Filter(filter)).await
}

#[actix_web::get("/restaurants/sort-by-rating")]
pub(super) async fn restaurants_sorted_by_rating(data: web::Data<ApiState>) -> ApiResult {
    search_restaurants(&data, RestaurantSearchProps::SortByRating).await
}

#[actix_web::get("/dishes")]
pub(super) async fn dishes(data: web::Data<ApiState>) -> ApiResult {
    search_dishes(&data, DishSearchProps::All).await
}

#[actix_web::get("/dishes/details/{id}")]
pub(super) async fn dish_details(data: web::Data<ApiState>, path: web::Path<IdPath>) -> ApiResult {
    let dish = db_api::get_dish_by_id(&data.db_pool, path.id)
        .await?
        .ok_or(ApiError::NotFound(NO_DISHES))?;
    Ok(HttpResponse::Ok().json(DishResp { dish }))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DishFilterQuery {
    is_veg: Flag,
}

#[actix_web::get("/dishes/filter")]
pub(super) async fn filter_dishes(
    data: web::Data<ApiState>,
    query: web::Query<DishFilterQuery>,
) -> ApiResult {
    search_dishes(&data, DishSearchProps::Veg(query.is_veg)).await
}

#[actix_web::get("/dishes/sort-by-price")]
pub(super) async fn dishes_sorted_by_price(data: web::Data<ApiState>) -> ApiResult {
    search_dishes(&data, DishSearchProps::SortByPrice).await
}
