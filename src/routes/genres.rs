use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::Response};
use sea_orm::TransactionTrait;

use super::{ItemId, acknowledged, created};
use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{NamePayload, NamedView},
    store::{self, Mutation},
};

#[utoipa::path(
    get,
    path = "/genres/",
    tag = "genres",
    responses((status = 200, description = "All genres", body = [NamedView]))
)]
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<NamedView>>> {
    let genres = store::genres::list(&state.db).await?;
    Ok(Json(genres.into_iter().map(NamedView::from).collect()))
}

#[utoipa::path(
    post,
    path = "/genres/",
    tag = "genres",
    request_body = NamePayload,
    responses(
        (status = 200, description = "Created; `Location` names the new genre", body = String),
        (status = 422, description = "Unknown or mistyped field"),
    )
)]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NamePayload>,
) -> AppResult<Response> {
    let txn = state.db.begin().await?;
    let id = store::genres::create(&txn, payload).await?;
    txn.commit().await?;

    tracing::info!(genre_id = id, "genre created");
    Ok(created("genres", id))
}

#[utoipa::path(
    get,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre id")),
    responses(
        (status = 200, description = "The genre", body = NamedView),
        (status = 404, description = "Body is \"incorrect id\"", body = String),
    )
)]
pub async fn get(
    State(state): State<Arc<AppState>>,
    ItemId(id): ItemId,
) -> AppResult<Json<NamedView>> {
    let id = id.ok_or(AppError::NotFound)?;
    let genre = store::genres::get(&state.db, id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(genre.into()))
}

#[utoipa::path(
    put,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre id")),
    request_body = NamePayload,
    responses(
        (status = 204, description = "Name written, or no such genre"),
        (status = 422, description = "Unknown or mistyped field"),
    )
)]
pub async fn update(
    State(state): State<Arc<AppState>>,
    ItemId(id): ItemId,
    Json(payload): Json<NamePayload>,
) -> AppResult<StatusCode> {
    let Some(row) = id else {
        return Ok(acknowledged("genre", id, Mutation::NotFound));
    };

    let txn = state.db.begin().await?;
    let outcome = store::genres::update(&txn, row, payload).await?;
    txn.commit().await?;
    Ok(acknowledged("genre", id, outcome))
}

#[utoipa::path(
    delete,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre id")),
    responses(
        (status = 204, description = "Deleted, or no such genre"),
        (status = 409, description = "Still referenced by movies under the restrict policy"),
    )
)]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    ItemId(id): ItemId,
) -> AppResult<StatusCode> {
    let Some(row) = id else {
        return Ok(acknowledged("genre", id, Mutation::NotFound));
    };

    let txn = state.db.begin().await?;
    let outcome = store::genres::delete(&txn, row, state.config.orphan_policy).await?;
    txn.commit().await?;
    Ok(acknowledged("genre", id, outcome))
}
