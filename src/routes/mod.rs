use std::sync::{Mutex, MutexGuard};

use actix_web::cookie::Key;
use actix_web::http::header;
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::{FlashMessagesFramework, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::repository::MovieStore;
use crate::services::catalog::CatalogController;
use crate::storage::DieselStorage;

pub mod api;
pub mod main;
pub mod movies;

/// Store type shared by the HTTP handlers.
pub type AppStore = MovieStore<DieselStorage>;

/// Catalog state shared by the HTTP handlers. The mutex serializes every
/// intent into a single writer against the store.
pub type Catalog = Mutex<CatalogController>;

/// Register every catalog route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(main::index)
        .service(api::api_v1_movies)
        .service(movies::new_movie)
        .service(movies::submit_movie)
        .service(movies::cancel_edit)
        .service(movies::edit_movie)
        .service(movies::confirm_delete)
        .service(movies::delete_movie);
}

/// Cookie-backed flash messages signed with a key derived from `secret`.
pub fn flash_framework(secret: &str) -> FlashMessagesFramework {
    let key = if secret.len() >= 32 {
        Key::derive_from(secret.as_bytes())
    } else {
        log::warn!("Configured secret is shorter than 32 bytes, using a random signing key");
        Key::generate()
    };
    FlashMessagesFramework::builder(CookieMessageStore::builder(key).build()).build()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    HttpResponse::Ok().body(tera.render(template, context).unwrap_or_else(|e| {
        log::error!("Failed to render template '{template}': {e}");
        String::new()
    }))
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

/// Lock the shared catalog, answering 500 when a previous holder panicked.
pub fn lock_catalog(catalog: &Catalog) -> Result<MutexGuard<'_, CatalogController>, HttpResponse> {
    catalog.lock().map_err(|e| {
        log::error!("Catalog state lock poisoned: {e}");
        HttpResponse::InternalServerError().finish()
    })
}
