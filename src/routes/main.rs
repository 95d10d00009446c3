use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::dto::movies::MovieCardDto;
use crate::forms::movies::SearchParams;
use crate::routes::{Catalog, base_context, lock_catalog, render_template};

#[get("/")]
pub async fn index(
    params: web::Query<SearchParams>,
    flash_messages: IncomingFlashMessages,
    catalog: web::Data<Catalog>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut controller = match lock_catalog(&catalog) {
        Ok(controller) => controller,
        Err(response) => return response,
    };

    controller.set_search_term(params.term());

    let movies = controller
        .filtered()
        .iter()
        .map(MovieCardDto::from)
        .collect::<Vec<_>>();

    let mut context = base_context(&flash_messages, "index");
    context.insert("search_term", controller.search_term());
    context.insert("movies", &movies);
    render_template(&tera, "main/index.html", &context)
}
