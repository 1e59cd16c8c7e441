use actix_web::{http::StatusCode, HttpResponse, ResponseError};

pub(super) const NO_RESTAURANT: &str = "No Restaurant Found.";
pub(super) const NO_DISHES: &str = "No Dishes Found.";

/// Every failure a route can produce, mapped to one status code each.
#[derive(Debug, thiserror::Error)]
pub(super) enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
    #[error("{0}")]
    Validation(String),
}

#[derive(serde::Serialize)]
struct MessageJsonResp<'a> {
    message: &'a str,
}

#[derive(serde::Serialize)]
struct ErrJsonResp {
    error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut resp = HttpResponse::build(self.status_code());
        match self {
            Self::NotFound(message) => resp.json(MessageJsonResp { message }),
            Self::Storage(err) => {
                tracing::error!("query failed: {err}");
                resp.json(ErrJsonResp {
                    error: err.to_string(),
                })
            }
            Self::Validation(reason) => {
                tracing::debug!("rejected request: {reason}");
                resp.json(ErrJsonResp {
                    error: reason.clone(),
                })
            }
        }
    }
}

/// Turn an empty listing into a not-found error.
pub(super) fn non_empty<T>(rows: Vec<T>, message: &'static str) -> Result<Vec<T>, ApiError> {
    if rows.is_empty() {
        Err(ApiError::NotFound(message))
    } else {
        Ok(rows)
    }
}
