use actix_web::{web, HttpResponse, ResponseError};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::jwt::AuthenticatedUser;
use crate::config::league::LeagueSettings;
use crate::league::clubs::ClubService;
use crate::models::club::{CreateClubRequest, UpdateClubRequest};
use crate::models::common::ApiResponse;

fn club_service(pool: &web::Data<PgPool>, settings: &web::Data<LeagueSettings>) -> ClubService {
    ClubService::new(pool.get_ref().clone(), settings.get_ref().clone())
}

#[tracing::instrument(
    name = "Create club",
    skip(request, pool, settings, user),
    fields(
        request = %request,
        user_id = %user.user_id
    )
)]
pub async fn create_club(
    request: web::Json<CreateClubRequest>,
    pool: web::Data<PgPool>,
    settings: web::Data<LeagueSettings>,
    user: AuthenticatedUser,
) -> HttpResponse {
    match club_service(&pool, &settings).create(&request, user.user_id).await {
        Ok(club) => HttpResponse::Created().json(ApiResponse::success("Club created successfully", club)),
        Err(e) => {
            tracing::warn!("Failed to create club: {}", e);
            e.error_response()
        }
    }
}

#[tracing::instrument(name = "List clubs", skip(pool, settings))]
pub async fn get_clubs(
    pool: web::Data<PgPool>,
    settings: web::Data<LeagueSettings>,
) -> HttpResponse {
    match club_service(&pool, &settings).list().await {
        Ok(clubs) => HttpResponse::Ok().json(ApiResponse::success("Clubs retrieved successfully", clubs)),
        Err(e) => e.error_response(),
    }
}

#[tracing::instrument(name = "Get club", skip(pool, settings), fields(club_id = %club_id))]
pub async fn get_club(
    club_id: Uuid,
    pool: web::Data<PgPool>,
    settings: web::Data<LeagueSettings>,
) -> HttpResponse {
    match club_service(&pool, &settings).detail(club_id).await {
        Ok(club) => HttpResponse::Ok().json(ApiResponse::success("Successfully retrieved club", club)),
        Err(e) => e.error_response(),
    }
}

#[tracing::instrument(
    name = "Update club",
    skip(request, pool, settings, user),
    fields(
        club_id = %club_id,
        user_id = %user.user_id
    )
)]
pub async fn update_club(
    club_id: Uuid,
    request: web::Json<UpdateClubRequest>,
    pool: web::Data<PgPool>,
    settings: web::Data<LeagueSettings>,
    user: AuthenticatedUser,
) -> HttpResponse {
    match club_service(&pool, &settings).update(club_id, &request, user.user_id).await {
        Ok(club) => HttpResponse::Ok().json(ApiResponse::success("Club updated successfully", club)),
        Err(e) => {
            tracing::warn!("Failed to update club {}: {}", club_id, e);
            e.error_response()
        }
    }
}

#[tracing::instrument(
    name = "Delete club",
    skip(pool, settings, user),
    fields(
        club_id = %club_id,
        user_id = %user.user_id
    )
)]
pub async fn delete_club(
    club_id: Uuid,
    pool: web::Data<PgPool>,
    settings: web::Data<LeagueSettings>,
    user: AuthenticatedUser,
) -> HttpResponse {
    match club_service(&pool, &settings).soft_delete(club_id, user.user_id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::<()>::success_message("Club deleted successfully")),
        Err(e) => e.error_response(),
    }
}
