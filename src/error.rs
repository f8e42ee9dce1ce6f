use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Body of every single-item lookup that misses.
pub const NOT_FOUND_BODY: &str = "incorrect id";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("incorrect id")]
    NotFound,

    #[error("{entity} {id} is still referenced by {movies} movie(s)")]
    Referenced { entity: &'static str, id: i32, movies: u64 },

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, Json(NOT_FOUND_BODY)).into_response(),
            AppError::Referenced { .. } => {
                (StatusCode::CONFLICT, Json(json!({ "error": self.to_string() }))).into_response()
            }
            AppError::Database(ref err) => {
                tracing::error!(error = %err, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": self.to_string() })))
                    .into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
