use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use std::io;

use bookshelf::auth::JwtKeys;
use bookshelf::config::Config;
use bookshelf::store::{postgres, Stores};
use bookshelf::{configure_app, AppState};

fn startup_error(context: &str, error: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, error))
}

async fn connect_stores(config: &Config) -> io::Result<Stores> {
    let Some(database_url) = &config.database_url else {
        log::warn!("DATABASE_URL is not set; books and users are kept in memory");
        return Ok(Stores::in_memory());
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(database_url)
        .await
        .map_err(|e| startup_error("Failed to connect to database", e))?;
    postgres::migrate(&pool)
        .await
        .map_err(|e| startup_error("Failed to run migrations", e))?;
    log::info!("Connected to PostgreSQL");

    Ok(Stores::postgres(pool))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| startup_error("Invalid configuration", e))?;
    let stores = connect_stores(&config).await?;
    let state = AppState::new(
        stores,
        JwtKeys::new(&config.jwt_secret, config.jwt_expiration_hours),
    );

    log::info!("Starting bookshelf server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(configure_app(state.clone()))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
