use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use sea_orm::TransactionTrait;

use super::{ItemId, acknowledged, created};
use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{MovieFilter, MoviePayload, MovieView},
    store::{self, Mutation},
};

#[utoipa::path(
    get,
    path = "/movies/",
    tag = "movies",
    params(
        ("director_id" = Option<i32>, Query, description = "Only movies by this director"),
        ("genre_id" = Option<i32>, Query, description = "Only movies in this genre"),
    ),
    responses(
        (status = 200, description = "Matching movies", body = [MovieView]),
        (status = 400, description = "A filter is not an integer"),
    )
)]
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<MovieFilter>,
) -> AppResult<Json<Vec<MovieView>>> {
    let movies = store::movies::list(&state.db, &filter).await?;
    Ok(Json(movies.into_iter().map(MovieView::from).collect()))
}

#[utoipa::path(
    post,
    path = "/movies/",
    tag = "movies",
    request_body = MoviePayload,
    responses(
        (status = 200, description = "Created; `Location` names the new movie", body = String),
        (status = 422, description = "Unknown or mistyped field"),
    )
)]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MoviePayload>,
) -> AppResult<Response> {
    let txn = state.db.begin().await?;
    let id = store::movies::create(&txn, payload).await?;
    txn.commit().await?;

    tracing::info!(movie_id = id, "movie created");
    Ok(created("movies", id))
}

#[utoipa::path(
    get,
    path = "/movies/{id}",
    tag = "movies",
    params(("id" = i32, Path, description = "Movie id")),
    responses(
        (status = 200, description = "The movie", body = MovieView),
        (status = 404, description = "Body is \"incorrect id\"", body = String),
    )
)]
pub async fn get(
    State(state): State<Arc<AppState>>,
    ItemId(id): ItemId,
) -> AppResult<Json<MovieView>> {
    let id = id.ok_or(AppError::NotFound)?;
    let movie = store::movies::get(&state.db, id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(movie.into()))
}

#[utoipa::path(
    put,
    path = "/movies/{id}",
    tag = "movies",
    params(("id" = i32, Path, description = "Movie id")),
    request_body = MoviePayload,
    responses(
        (status = 204, description = "Supplied fields written, or no such movie"),
        (status = 422, description = "Unknown or mistyped field"),
    )
)]
pub async fn update(
    State(state): State<Arc<AppState>>,
    ItemId(id): ItemId,
    Json(payload): Json<MoviePayload>,
) -> AppResult<StatusCode> {
    let Some(row) = id else {
        return Ok(acknowledged("movie", id, Mutation::NotFound));
    };

    let txn = state.db.begin().await?;
    let outcome = store::movies::update(&txn, row, payload).await?;
    txn.commit().await?;
    Ok(acknowledged("movie", id, outcome))
}

#[utoipa::path(
    delete,
    path = "/movies/{id}",
    tag = "movies",
    params(("id" = i32, Path, description = "Movie id")),
    responses((status = 204, description = "Deleted, or no such movie"))
)]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    ItemId(id): ItemId,
) -> AppResult<StatusCode> {
    let Some(row) = id else {
        return Ok(acknowledged("movie", id, Mutation::NotFound));
    };

    let txn = state.db.begin().await?;
    let outcome = store::movies::delete(&txn, row).await?;
    txn.commit().await?;
    Ok(acknowledged("movie", id, outcome))
}
