use actix_web::{delete, get, post, put, web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::jwt::AuthenticatedUser;
use crate::config::league::LeagueSettings;
use crate::handlers::club_handler;
use crate::models::club::{CreateClubRequest, UpdateClubRequest};

/// Register a new club
#[post("")]
async fn create_club(
    user: AuthenticatedUser,
    request: web::Json<CreateClubRequest>,
    pool: web::Data<PgPool>,
    settings: web::Data<LeagueSettings>,
) -> HttpResponse {
    club_handler::create_club(request, pool, settings, user).await
}

/// List live clubs
#[get("")]
async fn get_clubs(
    pool: web::Data<PgPool>,
    settings: web::Data<LeagueSettings>,
) -> HttpResponse {
    club_handler::get_clubs(pool, settings).await
}

#[get("/{club_id}")]
async fn get_club(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    settings: web::Data<LeagueSettings>,
) -> HttpResponse {
    let club_id = path.into_inner();
    club_handler::get_club(club_id, pool, settings).await
}

#[put("/{club_id}")]
async fn update_club(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    request: web::Json<UpdateClubRequest>,
    pool: web::Data<PgPool>,
    settings: web::Data<LeagueSettings>,
) -> HttpResponse {
    let club_id = path.into_inner();
    club_handler::update_club(club_id, request, pool, settings, user).await
}

/// Soft-delete a club
#[delete("/{club_id}")]
async fn delete_club(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    settings: web::Data<LeagueSettings>,
) -> HttpResponse {
    let club_id = path.into_inner();
    club_handler::delete_club(club_id, pool, settings, user).await
}
