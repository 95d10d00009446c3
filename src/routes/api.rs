use actix_web::{HttpResponse, Responder, get, web};

use crate::forms::movies::SearchParams;
use crate::routes::{Catalog, lock_catalog};
use crate::services::catalog::filter_movies;

/// Movies whose title matches `search`, as stored.
#[get("/api/v1/movies")]
pub async fn api_v1_movies(
    params: web::Query<SearchParams>,
    catalog: web::Data<Catalog>,
) -> impl Responder {
    match lock_catalog(&catalog) {
        Ok(controller) => HttpResponse::Ok().json(filter_movies(controller.movies(), params.term())),
        Err(response) => response,
    }
}
