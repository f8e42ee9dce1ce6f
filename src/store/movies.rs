use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use super::Mutation;
use crate::{
    entities::movie,
    error::AppResult,
    models::{MovieFilter, MoviePayload, insert_value, patch_value},
};

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    filter: &MovieFilter,
) -> AppResult<Vec<movie::Model>> {
    let mut query = movie::Entity::find();
    if let Some(director_id) = filter.director_id {
        query = query.filter(movie::Column::DirectorId.eq(director_id));
    }
    if let Some(genre_id) = filter.genre_id {
        query = query.filter(movie::Column::GenreId.eq(genre_id));
    }

    Ok(query.order_by_asc(movie::Column::Id).all(conn).await?)
}

pub async fn get<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<Option<movie::Model>> {
    Ok(movie::Entity::find_by_id(id).one(conn).await?)
}

pub async fn create<C: ConnectionTrait>(conn: &C, payload: MoviePayload) -> AppResult<i32> {
    let model = movie::ActiveModel {
        id: ActiveValue::NotSet,
        title: insert_value(payload.title),
        description: insert_value(payload.description),
        trailer: insert_value(payload.trailer),
        year: insert_value(payload.year),
        rating: insert_value(payload.rating),
        genre_id: insert_value(payload.genre_id),
        director_id: insert_value(payload.director_id),
    };

    let res = movie::Entity::insert(model).exec(conn).await?;
    Ok(res.last_insert_id)
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    payload: MoviePayload,
) -> AppResult<Mutation> {
    if payload.is_empty() {
        let exists = movie::Entity::find_by_id(id).count(conn).await? > 0;
        return Ok(if exists { Mutation::Updated } else { Mutation::NotFound });
    }

    let model = movie::ActiveModel {
        id: ActiveValue::NotSet,
        title: patch_value(payload.title),
        description: patch_value(payload.description),
        trailer: patch_value(payload.trailer),
        year: patch_value(payload.year),
        rating: patch_value(payload.rating),
        genre_id: patch_value(payload.genre_id),
        director_id: patch_value(payload.director_id),
    };

    let res = movie::Entity::update_many()
        .set(model)
        .filter(movie::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(Mutation::updated(res.rows_affected))
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<Mutation> {
    let res = movie::Entity::delete_by_id(id).exec(conn).await?;
    Ok(Mutation::deleted(res.rows_affected))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::db::connect_and_migrate;

    fn payload(value: serde_json::Value) -> MoviePayload {
        serde_json::from_value(value).unwrap()
    }

    async fn seed<C: ConnectionTrait>(conn: &C) -> Vec<i32> {
        let rows = [
            json!({ "title": "Vertigo", "director_id": 1, "genre_id": 1 }),
            json!({ "title": "Psycho", "director_id": 1, "genre_id": 2 }),
            json!({ "title": "The Third Man", "director_id": 2, "genre_id": 1 }),
            json!({ "title": "Untitled" }),
        ];
        let mut ids = Vec::new();
        for row in rows {
            ids.push(create(conn, payload(row)).await.unwrap());
        }
        ids
    }

    fn titles(movies: &[movie::Model]) -> Vec<&str> {
        movies.iter().filter_map(|m| m.title.as_deref()).collect()
    }

    #[tokio::test]
    async fn filters_combine_as_intersection() {
        let db = connect_and_migrate("sqlite::memory:").await.unwrap();
        seed(&db).await;

        let all = list(&db, &MovieFilter::default()).await.unwrap();
        assert_eq!(all.len(), 4);

        let by_director = list(&db, &MovieFilter { director_id: Some(1), genre_id: None })
            .await
            .unwrap();
        assert_eq!(titles(&by_director), ["Vertigo", "Psycho"]);

        let by_genre = list(&db, &MovieFilter { director_id: None, genre_id: Some(1) })
            .await
            .unwrap();
        assert_eq!(titles(&by_genre), ["Vertigo", "The Third Man"]);

        let both = list(&db, &MovieFilter { director_id: Some(1), genre_id: Some(1) })
            .await
            .unwrap();
        assert_eq!(titles(&both), ["Vertigo"]);

        let unknown = list(&db, &MovieFilter { director_id: Some(99), genre_id: None })
            .await
            .unwrap();
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn update_touches_only_supplied_fields() {
        let db = connect_and_migrate("sqlite::memory:").await.unwrap();
        let id = create(
            &db,
            payload(json!({ "title": "Heat", "year": 1995, "rating": 8.2, "director_id": 3 })),
        )
        .await
        .unwrap();

        let res = update(&db, id, payload(json!({ "rating": 8.3 }))).await.unwrap();
        assert_eq!(res, Mutation::Updated);

        let movie = get(&db, id).await.unwrap().unwrap();
        assert_eq!(movie.rating, Some(8.3));
        assert_eq!(movie.title.as_deref(), Some("Heat"));
        assert_eq!(movie.year, Some(1995));
        assert_eq!(movie.director_id, Some(3));
    }

    #[tokio::test]
    async fn explicit_null_clears_a_field() {
        let db = connect_and_migrate("sqlite::memory:").await.unwrap();
        let id = create(&db, payload(json!({ "title": "Ran", "genre_id": 5 }))).await.unwrap();

        update(&db, id, payload(json!({ "genre_id": null }))).await.unwrap();

        let movie = get(&db, id).await.unwrap().unwrap();
        assert_eq!(movie.genre_id, None);
        assert_eq!(movie.title.as_deref(), Some("Ran"));
    }

    #[tokio::test]
    async fn mutations_report_missing_rows() {
        let db = connect_and_migrate("sqlite::memory:").await.unwrap();

        let res = update(&db, 42, payload(json!({ "title": "x" }))).await.unwrap();
        assert_eq!(res, Mutation::NotFound);
        assert_eq!(update(&db, 42, MoviePayload::default()).await.unwrap(), Mutation::NotFound);
        assert_eq!(delete(&db, 42).await.unwrap(), Mutation::NotFound);

        let id = create(&db, MoviePayload::default()).await.unwrap();
        assert_eq!(update(&db, id, MoviePayload::default()).await.unwrap(), Mutation::Updated);
        assert_eq!(delete(&db, id).await.unwrap(), Mutation::Deleted);
        assert_eq!(delete(&db, id).await.unwrap(), Mutation::NotFound);
        assert!(get(&db, id).await.unwrap().is_none());
    }
}
