use actix_web::{get, post, web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::jwt::AuthenticatedUser;
use crate::config::league::LeagueSettings;
use crate::handlers::match_handler;
use crate::models::league_match::RecordMatchesRequest;

/// Record a batch of match results
#[post("")]
async fn record_matches(
    user: AuthenticatedUser,
    request: web::Json<RecordMatchesRequest>,
    pool: web::Data<PgPool>,
    settings: web::Data<LeagueSettings>,
) -> HttpResponse {
    match_handler::record_matches(request, pool, settings, user).await
}

/// Get all recorded matches
#[get("")]
async fn get_matches(
    pool: web::Data<PgPool>,
    settings: web::Data<LeagueSettings>,
) -> HttpResponse {
    match_handler::get_matches(pool, settings).await
}

#[get("/detail/{match_id}")]
async fn get_match(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    settings: web::Data<LeagueSettings>,
) -> HttpResponse {
    let match_id = path.into_inner();
    match_handler::get_match(match_id, pool, settings).await
}
