use utoipa::OpenApi;

use crate::{
    models::{MoviePayload, MovieView, NamePayload, NamedView},
    routes::{directors, genres, movies},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        movies::list,
        movies::create,
        movies::get,
        movies::update,
        movies::delete,
        directors::list,
        directors::create,
        directors::get,
        directors::update,
        directors::delete,
        genres::list,
        genres::create,
        genres::get,
        genres::update,
        genres::delete,
    ),
    components(schemas(MoviePayload, NamePayload, MovieView, NamedView)),
    tags(
        (name = "movies", description = "Movies, filterable by director and genre"),
        (name = "directors", description = "Directors"),
        (name = "genres", description = "Genres"),
    )
)]
pub struct ApiDoc;
