use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, sea_query::Expr,
};

use super::Mutation;
use crate::{
    config::OrphanPolicy,
    entities::{genre, movie},
    error::{AppError, AppResult},
    models::{NamePayload, insert_value, patch_value},
};

pub async fn list<C: ConnectionTrait>(conn: &C) -> AppResult<Vec<genre::Model>> {
    Ok(genre::Entity::find().order_by_asc(genre::Column::Id).all(conn).await?)
}

pub async fn get<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<Option<genre::Model>> {
    Ok(genre::Entity::find_by_id(id).one(conn).await?)
}

pub async fn create<C: ConnectionTrait>(conn: &C, payload: NamePayload) -> AppResult<i32> {
    let model = genre::ActiveModel { id: ActiveValue::NotSet, name: insert_value(payload.name) };
    let res = genre::Entity::insert(model).exec(conn).await?;
    Ok(res.last_insert_id)
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    payload: NamePayload,
) -> AppResult<Mutation> {
    if payload.is_empty() {
        let exists = genre::Entity::find_by_id(id).count(conn).await? > 0;
        return Ok(if exists { Mutation::Updated } else { Mutation::NotFound });
    }

    let model = genre::ActiveModel { id: ActiveValue::NotSet, name: patch_value(payload.name) };
    let res = genre::Entity::update_many()
        .set(model)
        .filter(genre::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(Mutation::updated(res.rows_affected))
}

/// Deletes the genre, handling the movies that point at it according to
/// `policy`. Run it inside a transaction when the policy is `SetNull`.
pub async fn delete<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    policy: OrphanPolicy,
) -> AppResult<Mutation> {
    let referencing = movie::Entity::find().filter(movie::Column::GenreId.eq(id));
    match policy {
        OrphanPolicy::Ignore => {}
        OrphanPolicy::Restrict => {
            let movies = referencing.count(conn).await?;
            if movies > 0 {
                return Err(AppError::Referenced { entity: "genre", id, movies });
            }
        }
        OrphanPolicy::SetNull => {
            let res = movie::Entity::update_many()
                .col_expr(movie::Column::GenreId, Expr::value(Option::<i32>::None))
                .filter(movie::Column::GenreId.eq(id))
                .exec(conn)
                .await?;
            tracing::debug!(
                genre_id = id,
                movies = res.rows_affected,
                "cleared genre references"
            );
        }
    }

    let res = genre::Entity::delete_by_id(id).exec(conn).await?;
    Ok(Mutation::deleted(res.rows_affected))
}
