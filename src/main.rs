use std::process::ExitCode;

use actix_identity::IdentityMiddleware;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use env_logger::Env;

use photoplatform::db::establish_connection_pool;
use photoplatform::models::config::ServerConfig;
use photoplatform::repository::DieselRepository;
use photoplatform::routes::configure;

#[actix_web::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let secret_key = match Key::try_from(server_config.secret_key.as_bytes()) {
        Ok(key) => key,
        Err(e) => {
            log::error!("Secret key must be at least 64 bytes: {e}");
            return ExitCode::FAILURE;
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            return ExitCode::FAILURE;
        }
    };

    let repo = web::Data::new(DieselRepository::new(pool));
    let bind_address = (server_config.address.clone(), server_config.port);
    let server_config = web::Data::new(server_config);

    log::info!("Starting server at {}:{}", bind_address.0, bind_address.1);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(Logger::default())
            .app_data(repo.clone())
            .app_data(server_config.clone())
            .configure(configure)
    })
    .bind(bind_address);

    let server = match server {
        Ok(server) => server,
        Err(e) => {
            log::error!("Failed to bind server: {e}");
            return ExitCode::FAILURE;
        }
    };

    match server.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server stopped with an error: {e}");
            ExitCode::FAILURE
        }
    }
}
