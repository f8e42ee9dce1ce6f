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
    path = "/directors/",
    tag = "directors",
    responses((status = 200, description = "All directors", body = [NamedView]))
)]
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<NamedView>>> {
    let directors = store::directors::list(&state.db).await?;
    Ok(Json(directors.into_iter().map(NamedView::from).collect()))
}

#[utoipa::path(
    post,
    path = "/directors/",
    tag = "directors",
    request_body = NamePayload,
    responses(
        (status = 200, description = "Created; `Location` names the new director", body = String),
        (status = 422, description = "Unknown or mistyped field"),
    )
)]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NamePayload>,
) -> AppResult<Response> {
    let txn = state.db.begin().await?;
    let id = store::directors::create(&txn, payload).await?;
    txn.commit().await?;

    tracing::info!(director_id = id, "director created");
    Ok(created("directors", id))
}

#[utoipa::path(
    get,
    path = "/directors/{id}",
    tag = "directors",
    params(("id" = i32, Path, description = "Director id")),
    responses(
        (status = 200, description = "The director", body = NamedView),
        (status = 404, description = "Body is \"incorrect id\"", body = String),
    )
)]
pub async fn get(
    State(state): State<Arc<AppState>>,
    ItemId(id): ItemId,
) -> AppResult<Json<NamedView>> {
    let id = id.ok_or(AppError::NotFound)?;
    let director = store::directors::get(&state.db, id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(director.into()))
}

#[utoipa::path(
    put,
    path = "/directors/{id}",
    tag = "directors",
    params(("id" = i32, Path, description = "Director id")),
    request_body = NamePayload,
    responses(
        (status = 204, description = "Name written, or no such director"),
        (status = 422, description = "Unknown or mistyped field"),
    )
)]
pub async fn update(
    State(state): State<Arc<AppState>>,
    ItemId(id): ItemId,
    Json(payload): Json<NamePayload>,
) -> AppResult<StatusCode> {
    let Some(row) = id else {
        return Ok(acknowledged("director", id, Mutation::NotFound));
    };

    let txn = state.db.begin().await?;
    let outcome = store::directors::update(&txn, row, payload).await?;
    txn.commit().await?;
    Ok(acknowledged("director", id, outcome))
}

#[utoipa::path(
    delete,
    path = "/directors/{id}",
    tag = "directors",
    params(("id" = i32, Path, description = "Director id")),
    responses(
        (status = 204, description = "Deleted, or no such director"),
        (status = 409, description = "Still referenced by movies under the restrict policy"),
    )
)]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    ItemId(id): ItemId,
) -> AppResult<StatusCode> {
    let Some(row) = id else {
        return Ok(acknowledged("director", id, Mutation::NotFound));
    };

    let txn = state.db.begin().await?;
    let outcome = store::directors::delete(&txn, row, state.config.orphan_policy).await?;
    txn.commit().await?;
    Ok(acknowledged("director", id, outcome))
}
