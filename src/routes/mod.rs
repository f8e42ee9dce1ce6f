use std::{convert::Infallible, sync::Arc};

use axum::{
    Json, Router,
    extract::{FromRequestParts, Path},
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{AppState, api_docs::ApiDoc, store::Mutation};

pub mod directors;
pub mod genres;
pub mod movies;

pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/movies", get(movies::list).post(movies::create))
        .route("/movies/", get(movies::list).post(movies::create))
        .route("/movies/{id}", get(movies::get).put(movies::update).delete(movies::delete))
        .route("/directors", get(directors::list).post(directors::create))
        .route("/directors/", get(directors::list).post(directors::create))
        .route(
            "/directors/{id}",
            get(directors::get).put(directors::update).delete(directors::delete),
        )
        .route("/genres", get(genres::list).post(genres::create))
        .route("/genres/", get(genres::list).post(genres::create))
        .route("/genres/{id}", get(genres::get).put(genres::update).delete(genres::delete))
        .with_state(state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/swagger.json", ApiDoc::openapi()))
        .route("/", get(|| async { Redirect::temporary("/swagger-ui/") }))
        .merge(api)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http())
}

/// Id segment of an item route. Holds `None` when the segment is not an
/// `i32`, which no row can carry.
pub struct ItemId(pub Option<i32>);

impl<S: Send + Sync> FromRequestParts<S> for ItemId {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = Path::<i32>::from_request_parts(parts, state).await.ok().map(|Path(id)| id);
        Ok(ItemId(id))
    }
}

/// `200 "ok"` plus a `Location` pointing at the new item.
fn created(collection: &str, id: i32) -> Response {
    let location = format!("/{collection}/{id}");
    (StatusCode::OK, [(header::LOCATION, location)], Json("ok")).into_response()
}

/// Updates and deletes answer 204 whether or not a row matched.
fn acknowledged(entity: &'static str, id: Option<i32>, outcome: Mutation) -> StatusCode {
    match outcome {
        Mutation::Updated => tracing::info!(entity, id, "updated"),
        Mutation::Deleted => tracing::info!(entity, id, "deleted"),
        Mutation::NotFound => tracing::debug!(entity, id, "no row matched"),
    }
    StatusCode::NO_CONTENT
}
