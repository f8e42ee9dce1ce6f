use sea_orm::ActiveValue;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::entities::{director, genre, movie};

/// A payload field: `None` when the key is absent, `Some(None)` for an
/// explicit `null`.
pub type Field<T> = Option<Option<T>>;

fn present<'de, D, T>(de: D) -> Result<Field<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Value for a column being inserted: absent and null both store NULL.
pub fn insert_value<T>(field: Field<T>) -> ActiveValue<Option<T>>
where
    Option<T>: Into<sea_orm::Value>,
{
    ActiveValue::Set(field.flatten())
}

/// Value for a column being patched: absent keys leave the column alone.
pub fn patch_value<T>(field: Field<T>) -> ActiveValue<Option<T>>
where
    Option<T>: Into<sea_orm::Value>,
{
    match field {
        Some(value) => ActiveValue::Set(value),
        None => ActiveValue::NotSet,
    }
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct MoviePayload {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub title: Field<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Field<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub trailer: Field<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub year: Field<i32>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<f64>)]
    pub rating: Field<f64>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub genre_id: Field<i32>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub director_id: Field<i32>,
}

impl MoviePayload {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.trailer.is_none()
            && self.year.is_none()
            && self.rating.is_none()
            && self.genre_id.is_none()
            && self.director_id.is_none()
    }
}

/// Body accepted by both directors and genres.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NamePayload {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub name: Field<String>,
}

impl NamePayload {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MovieView {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre_id: Option<i32>,
    pub director_id: Option<i32>,
}

impl From<movie::Model> for MovieView {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            trailer: m.trailer,
            year: m.year,
            rating: m.rating,
            genre_id: m.genre_id,
            director_id: m.director_id,
        }
    }
}

/// Wire shape of a director or a genre.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NamedView {
    pub id: i32,
    pub name: Option<String>,
}

impl From<director::Model> for NamedView {
    fn from(m: director::Model) -> Self {
        Self { id: m.id, name: m.name }
    }
}

impl From<genre::Model> for NamedView {
    fn from(m: genre::Model) -> Self {
        Self { id: m.id, name: m.name }
    }
}

/// Query string of `GET /movies/`. Both filters are optional and combine
/// with AND; an empty value counts as absent.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct MovieFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub director_id: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub genre_id: Option<i32>,
}

fn empty_as_none<'de, D>(de: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn absent_and_null_are_distinct() {
        let payload: MoviePayload =
            serde_json::from_value(json!({ "rating": 8.5, "trailer": null })).unwrap();

        assert_eq!(payload.rating, Some(Some(8.5)));
        assert_eq!(payload.trailer, Some(None));
        assert_eq!(payload.title, None);
        assert!(!payload.is_empty());
    }

    #[test]
    fn empty_object_is_empty_payload() {
        let payload: MoviePayload = serde_json::from_value(json!({})).unwrap();
        assert!(payload.is_empty());

        let payload: NamePayload = serde_json::from_value(json!({})).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err =
            serde_json::from_value::<MoviePayload>(json!({ "title": "Heat", "studio": "WB" }))
                .unwrap_err();
        assert!(err.to_string().contains("studio"));

        assert!(serde_json::from_value::<NamePayload>(json!({ "id": 4, "name": "Noir" })).is_err());
    }

    #[test]
    fn integer_rating_is_accepted() {
        let payload: MoviePayload = serde_json::from_value(json!({ "rating": 7 })).unwrap();
        assert_eq!(payload.rating, Some(Some(7.0)));
    }

    #[test]
    fn patch_value_skips_absent_fields() {
        assert_eq!(patch_value::<i32>(None), ActiveValue::NotSet);
        assert_eq!(patch_value::<i32>(Some(None)), ActiveValue::Set(None));
        assert_eq!(insert_value::<i32>(None), ActiveValue::Set(None));
        assert_eq!(insert_value(Some(Some(1999))), ActiveValue::Set(Some(1999)));
    }

    #[test]
    fn movie_view_keeps_wire_names() {
        let view = MovieView::from(movie::Model {
            id: 3,
            title: Some("Chinatown".into()),
            description: None,
            trailer: None,
            year: Some(1974),
            rating: Some(8.1),
            genre_id: Some(2),
            director_id: None,
        });

        assert_eq!(
            serde_json::to_value(view).unwrap(),
            json!({
                "id": 3,
                "title": "Chinatown",
                "description": null,
                "trailer": null,
                "year": 1974,
                "rating": 8.1,
                "genre_id": 2,
                "director_id": null,
            })
        );
    }

    #[test]
    fn filter_treats_empty_values_as_absent() {
        let filter: MovieFilter =
            serde_json::from_value(json!({ "director_id": "", "genre_id": "4" })).unwrap();
        assert_eq!(filter, MovieFilter { director_id: None, genre_id: Some(4) });

        assert!(serde_json::from_value::<MovieFilter>(json!({ "genre_id": "noir" })).is_err());
    }
}
