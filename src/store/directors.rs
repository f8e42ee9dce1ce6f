use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, sea_query::Expr,
};

use super::Mutation;
use crate::{
    config::OrphanPolicy,
    entities::{director, movie},
    error::{AppError, AppResult},
    models::{NamePayload, insert_value, patch_value},
};

pub async fn list<C: ConnectionTrait>(conn: &C) -> AppResult<Vec<director::Model>> {
    Ok(director::Entity::find().order_by_asc(director::Column::Id).all(conn).await?)
}

pub async fn get<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<Option<director::Model>> {
    Ok(director::Entity::find_by_id(id).one(conn).await?)
}

pub async fn create<C: ConnectionTrait>(conn: &C, payload: NamePayload) -> AppResult<i32> {
    let model = director::ActiveModel { id: ActiveValue::NotSet, name: insert_value(payload.name) };
    let res = director::Entity::insert(model).exec(conn).await?;
    Ok(res.last_insert_id)
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    payload: NamePayload,
) -> AppResult<Mutation> {
    if payload.is_empty() {
        let exists = director::Entity::find_by_id(id).count(conn).await? > 0;
        return Ok(if exists { Mutation::Updated } else { Mutation::NotFound });
    }

    let model = director::ActiveModel { id: ActiveValue::NotSet, name: patch_value(payload.name) };
    let res = director::Entity::update_many()
        .set(model)
        .filter(director::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(Mutation::updated(res.rows_affected))
}

/// Deletes the director, handling the movies that point at it according to
/// `policy`. Run it inside a transaction when the policy is `SetNull`.
pub async fn delete<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    policy: OrphanPolicy,
) -> AppResult<Mutation> {
    let referencing = movie::Entity::find().filter(movie::Column::DirectorId.eq(id));
    match policy {
        OrphanPolicy::Ignore => {}
        OrphanPolicy::Restrict => {
            let movies = referencing.count(conn).await?;
            if movies > 0 {
                return Err(AppError::Referenced { entity: "director", id, movies });
            }
        }
        OrphanPolicy::SetNull => {
            let res = movie::Entity::update_many()
                .col_expr(movie::Column::DirectorId, Expr::value(Option::<i32>::None))
                .filter(movie::Column::DirectorId.eq(id))
                .exec(conn)
                .await?;
            tracing::debug!(
                director_id = id,
                movies = res.rows_affected,
                "cleared director references"
            );
        }
    }

    let res = director::Entity::delete_by_id(id).exec(conn).await?;
    Ok(Mutation::deleted(res.rows_affected))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{db::connect_and_migrate, models::MoviePayload, store::movies};

    fn name(value: &str) -> NamePayload {
        serde_json::from_value(json!({ "name": value })).unwrap()
    }

    async fn movie_by(conn: &impl ConnectionTrait, director_id: i32) -> i32 {
        let payload: MoviePayload =
            serde_json::from_value(json!({ "title": "Rashomon", "director_id": director_id }))
                .unwrap();
        movies::create(conn, payload).await.unwrap()
    }

    #[tokio::test]
    async fn create_then_rename() {
        let db = connect_and_migrate("sqlite::memory:").await.unwrap();
        let id = create(&db, name("Kurosawa")).await.unwrap();

        assert_eq!(update(&db, id, name("Akira Kurosawa")).await.unwrap(), Mutation::Updated);

        let director = get(&db, id).await.unwrap().unwrap();
        assert_eq!(director.name.as_deref(), Some("Akira Kurosawa"));
        assert_eq!(list(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn ignore_policy_leaves_dangling_reference() {
        let db = connect_and_migrate("sqlite::memory:").await.unwrap();
        let id = create(&db, name("Kurosawa")).await.unwrap();
        let movie_id = movie_by(&db, id).await;

        assert_eq!(delete(&db, id, OrphanPolicy::Ignore).await.unwrap(), Mutation::Deleted);

        let movie = movies::get(&db, movie_id).await.unwrap().unwrap();
        assert_eq!(movie.director_id, Some(id));
    }

    #[tokio::test]
    async fn restrict_policy_refuses_referenced_delete() {
        let db = connect_and_migrate("sqlite::memory:").await.unwrap();
        let id = create(&db, name("Kurosawa")).await.unwrap();
        movie_by(&db, id).await;

        let err = delete(&db, id, OrphanPolicy::Restrict).await.unwrap_err();
        assert!(matches!(err, AppError::Referenced { entity: "director", movies: 1, .. }));
        assert!(get(&db, id).await.unwrap().is_some());

        // Unreferenced rows go through.
        let other = create(&db, name("Ozu")).await.unwrap();
        assert_eq!(delete(&db, other, OrphanPolicy::Restrict).await.unwrap(), Mutation::Deleted);
    }

    #[tokio::test]
    async fn set_null_policy_clears_references() {
        let db = connect_and_migrate("sqlite::memory:").await.unwrap();
        let id = create(&db, name("Kurosawa")).await.unwrap();
        let movie_id = movie_by(&db, id).await;

        assert_eq!(delete(&db, id, OrphanPolicy::SetNull).await.unwrap(), Mutation::Deleted);

        let movie = movies::get(&db, movie_id).await.unwrap().unwrap();
        assert_eq!(movie.director_id, None);
        assert_eq!(movie.title.as_deref(), Some("Rashomon"));
    }
}
