use actix_web::{error, http, web, App, HttpResponse, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use sqlx::PgPool;
use std::net::TcpListener;
use actix_cors::Cors;

pub mod auth;
pub mod config;
pub mod db;
mod handlers;
pub mod league;
pub mod models;
mod routes;
pub mod telemetry;
pub mod utils;

use crate::config::jwt::JwtSettings;
use crate::config::league::LeagueSettings;
use crate::models::common::ApiResponse;
use crate::routes::init_routes;

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    jwt_settings: JwtSettings,
    league_settings: LeagueSettings,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let db_pool_data = web::Data::new(db_pool);
    let jwt_settings = web::Data::new(jwt_settings);
    let league_settings = web::Data::new(league_settings);

    let server = HttpServer::new( move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:5173")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(json_config())
            .app_data(db_pool_data.clone())
            .app_data(jwt_settings.clone())
            .app_data(league_settings.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Malformed bodies get the same envelope as every other client error
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        tracing::info!("Rejected malformed JSON body: {}", message);
        let response = HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error_with_message("Invalid request body", message));
        error::InternalError::from_response(err, response).into()
    })
}
