use std::sync::Mutex;

use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use tera::Tera;

use movie_catalog::db::{establish_connection_pool, run_migrations};
use movie_catalog::models::config::ServerConfig;
use movie_catalog::repository::MovieStore;
use movie_catalog::routes::{configure, flash_framework};
use movie_catalog::services::catalog::CatalogController;
use movie_catalog::storage::DieselStorage;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to open database {}: {e}", server_config.database_url);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run migrations: {e}");
        std::process::exit(1);
    }

    let store = MovieStore::new(DieselStorage::new(pool));

    let controller = match CatalogController::load(&store) {
        Ok(controller) => controller,
        Err(e) => {
            log::error!("Failed to load the movie catalog: {e}");
            std::process::exit(1);
        }
    };

    let tera = match Tera::new(&format!("{}/**/*.html", server_config.templates_dir)) {
        Ok(tera) => tera,
        Err(e) => {
            log::error!("Failed to parse templates: {e}");
            std::process::exit(1);
        }
    };

    let store = web::Data::new(store);
    let catalog = web::Data::new(Mutex::new(controller));
    let tera = web::Data::new(tera);
    let message_framework = flash_framework(&server_config.secret);

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving movie catalog on http://{}:{}",
        server_config.address,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .app_data(store.clone())
            .app_data(catalog.clone())
            .app_data(tera.clone())
            .configure(configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
