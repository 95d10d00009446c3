use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;
use validator::Validate;

use crate::domain::movie::MovieInput;
use crate::domain::types::MovieId;
use crate::dto::movies::{MovieCardDto, MovieFormDto};
use crate::forms::movies::{DeleteMovieForm, DeleteMovieFormPayload, MovieForm, MovieFormError};
use crate::routes::{
    AppStore, Catalog, base_context, lock_catalog, redirect, render_template,
};
use crate::services::ServiceError;
use crate::services::catalog::{CatalogController, SubmitOutcome};

fn render_editor(
    controller: &CatalogController,
    flash_messages: &IncomingFlashMessages,
    tera: &Tera,
    form_error: Option<&str>,
) -> HttpResponse {
    let Some(form) = MovieFormDto::from_editor(controller.editor()) else {
        return redirect("/");
    };
    let mut context = base_context(flash_messages, "movie_form");
    context.insert("form", &form);
    context.insert("form_error", &form_error);
    context.insert("search_term", controller.search_term());
    render_template(tera, "movies/form.html", &context)
}

#[get("/movies/new")]
pub async fn new_movie(
    flash_messages: IncomingFlashMessages,
    catalog: web::Data<Catalog>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut controller = match lock_catalog(&catalog) {
        Ok(controller) => controller,
        Err(response) => return response,
    };

    controller.open_add();
    render_editor(&controller, &flash_messages, &tera, None)
}

#[get("/movies/{movie_id}/edit")]
pub async fn edit_movie(
    movie_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    catalog: web::Data<Catalog>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let movie_id = match MovieId::new(movie_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    let mut controller = match lock_catalog(&catalog) {
        Ok(controller) => controller,
        Err(response) => return response,
    };

    match controller.open_edit(&movie_id) {
        Ok(()) => render_editor(&controller, &flash_messages, &tera, None),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Movie not found.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to open movie editor: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/movies")]
pub async fn submit_movie(
    flash_messages: IncomingFlashMessages,
    catalog: web::Data<Catalog>,
    store: web::Data<AppStore>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<MovieForm>,
) -> impl Responder {
    let mut controller = match lock_catalog(&catalog) {
        Ok(controller) => controller,
        Err(response) => return response,
    };

    if !controller.editor_matches(form.target_id().as_ref()) {
        FlashMessage::error("This form is no longer open, nothing was saved.").send();
        return redirect("/");
    }

    if let Err(e) = form.validate() {
        let error = MovieFormError::from(e);
        controller.stage_input(MovieInput::from(form));
        return render_editor(&controller, &flash_messages, &tera, Some(error.to_string().as_str()));
    }

    match controller.submit(MovieInput::from(form), store.get_ref()) {
        Ok(SubmitOutcome::Created(_)) => FlashMessage::success("Movie added.").send(),
        Ok(SubmitOutcome::Updated(_)) => FlashMessage::success("Movie updated.").send(),
        Ok(SubmitOutcome::NotFound) => FlashMessage::error("Movie not found.").send(),
        Ok(SubmitOutcome::Rejected) => {
            return render_editor(&controller, &flash_messages, &tera, None);
        }
        Err(err) => {
            log::error!("Failed to submit movie: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/")
}

#[post("/movies/cancel")]
pub async fn cancel_edit(catalog: web::Data<Catalog>) -> impl Responder {
    let mut controller = match lock_catalog(&catalog) {
        Ok(controller) => controller,
        Err(response) => return response,
    };

    controller.close_editor();
    redirect("/")
}

#[get("/movies/{movie_id}/delete")]
pub async fn confirm_delete(
    movie_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    catalog: web::Data<Catalog>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let movie_id = match MovieId::new(movie_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    let controller = match lock_catalog(&catalog) {
        Ok(controller) => controller,
        Err(response) => return response,
    };

    let Some(movie) = controller.find(&movie_id) else {
        FlashMessage::error("Movie not found.").send();
        return redirect("/");
    };

    let mut context = base_context(&flash_messages, "movie_delete");
    context.insert("movie", &MovieCardDto::from(movie));
    context.insert("search_term", controller.search_term());
    render_template(&tera, "movies/delete.html", &context)
}

#[post("/movies/{movie_id}/delete")]
pub async fn delete_movie(
    movie_id: web::Path<String>,
    catalog: web::Data<Catalog>,
    store: web::Data<AppStore>,
    web::Form(form): web::Form<DeleteMovieForm>,
) -> impl Responder {
    let movie_id = match MovieId::new(movie_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };
    let payload = DeleteMovieFormPayload::from(form);

    let mut controller = match lock_catalog(&catalog) {
        Ok(controller) => controller,
        Err(response) => return response,
    };

    match controller.delete(&movie_id, payload.confirmed, store.get_ref()) {
        Ok(true) => FlashMessage::success("Movie deleted.").send(),
        Ok(false) if payload.confirmed => FlashMessage::error("Movie not found.").send(),
        Ok(false) => {}
        Err(err) => {
            log::error!("Failed to delete movie: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/")
}
