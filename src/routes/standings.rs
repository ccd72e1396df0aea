use actix_web::{get, web, HttpResponse};
use sqlx::PgPool;

use crate::handlers::standings_handler;

/// Get the current league table
#[get("/standings")]
async fn get_standings(pool: web::Data<PgPool>) -> HttpResponse {
    standings_handler::get_standings(pool).await
}
