use std::str::FromStr;

use derive_builder::Builder;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::Config;
use crate::data::{Dish, Flag, Restaurant};

// Column lists are spelled out so the row mapping does not depend on table layout.
macro_rules! select_restaurants {
    ($($tail:literal)?) => {
        concat!(
            "SELECT id, name, cuisine, rating, isVeg, hasOutdoorSeating, isLuxury FROM restaurants"
            $(, " ", $tail)?
        )
    };
}

macro_rules! select_dishes {
    ($($tail:literal)?) => {
        concat!("SELECT id, name, price, isVeg FROM dishes" $(, " ", $tail)?)
    };
}

/// Open the shared read-only pool. The database file must already exist.
pub async fn connect(config: &Config) -> sqlx::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .read_only(true)
        .create_if_missing(false);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
}

#[derive(Builder, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestaurantFilter {
    is_veg: Flag,
    has_outdoor_seating: Flag,
    is_luxury: Flag,
}

#[derive(Debug, Clone)]
pub enum RestaurantSearchProps {
    All,
    Cuisine(String),
    Filter(RestaurantFilter),
    SortByRating,
}

pub async fn get_restaurants(
    db_conn: &SqlitePool,
    props: RestaurantSearchProps,
) -> sqlx::Result<Vec<Restaurant>> {
    let query = match props {
        RestaurantSearchProps::All => sqlx::query_as::<_, Restaurant>(select_restaurants!()),
        RestaurantSearchProps::Cuisine(cuisine) => {
            sqlx::query_as::<_, Restaurant>(select_restaurants!("WHERE cuisine = ? COLLATE NOCASE"))
                .bind(cuisine)
        }
        RestaurantSearchProps::Filter(filter) => sqlx::query_as::<_, Restaurant>(select_restaurants!(
            "WHERE isVeg = ? AND hasOutdoorSeating = ? AND isLuxury = ?"
        ))
        .bind(filter.is_veg.as_i64())
        .bind(filter.has_outdoor_seating.as_i64())
        .bind(filter.is_luxury.as_i64()),
        RestaurantSearchProps::SortByRating => {
            sqlx::query_as::<_, Restaurant>(select_restaurants!("ORDER BY rating DESC"))
        }
    };

    query.fetch_all(db_conn).await
}

pub async fn get_restaurant_by_id(db_conn: &SqlitePool, id: i64) -> sqlx::Result<Option<Restaurant>> {
    sqlx::query_as::<_, Restaurant>(select_restaurants!("WHERE id = ?"))
        .bind(id)
        .fetch_optional(db_conn)
        .await
}

#[derive(Debug, Clone)]
pub enum DishSearchProps {
    All,
    Veg(Flag),
    SortByPrice,
}

pub async fn get_dishes(db_conn: &SqlitePool, props: DishSearchProps) -> sqlx::Result<Vec<Dish>> {
    let query = match props {
        DishSearchProps::All => sqlx::query_as::<_, Dish>(select_dishes!()),
        DishSearchProps::Veg(is_veg) => {
            sqlx::query_as::<_, Dish>(select_dishes!("WHERE isVeg = ?")).bind(is_veg.as_i64())
        }
        DishSearchProps::SortByPrice => sqlx::query_as::<_, Dish>(select_dishes!("ORDER BY price")),
    };

    query.fetch_all(db_conn).await
}

pub async fn get_dish_by_id(db_conn: &SqlitePool, id: i64) -> sqlx::Result<Option<Dish>> {
    sqlx::query_as::<_, Dish>(select_dishes!("WHERE id = ?"))
        .bind(id)
        .fetch_optional(db_conn)
        .await
}
