use actix_web::{web, HttpResponse, ResponseError};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::jwt::AuthenticatedUser;
use crate::config::league::LeagueSettings;
use crate::league::matches::MatchService;
use crate::models::common::ApiResponse;
use crate::models::league_match::RecordMatchesRequest;

fn match_service(pool: &web::Data<PgPool>, settings: &web::Data<LeagueSettings>) -> MatchService {
    MatchService::new(pool.get_ref().clone(), settings.get_ref().clone())
}

/// Record a batch of match results
#[tracing::instrument(
    name = "Record matches",
    skip(request, pool, settings, user),
    fields(
        batch_size = request.matches.len(),
        user_id = %user.user_id
    )
)]
pub async fn record_matches(
    request: web::Json<RecordMatchesRequest>,
    pool: web::Data<PgPool>,
    settings: web::Data<LeagueSettings>,
    user: AuthenticatedUser,
) -> HttpResponse {
    match match_service(&pool, &settings).record_batch(&request.matches, user.user_id).await {
        Ok(matches) => {
            tracing::info!("Successfully recorded {} matches", matches.len());
            HttpResponse::Created().json(ApiResponse::success("Matches created successfully", matches))
        }
        Err(e) => {
            if e.is_retryable() {
                tracing::error!("Giving up on match batch after repeated conflicts: {}", e);
            } else {
                tracing::warn!("Rejected match batch: {}", e);
            }
            e.error_response()
        }
    }
}

#[tracing::instrument(name = "Get match detail", skip(pool, settings), fields(match_id = %match_id))]
pub async fn get_match(
    match_id: Uuid,
    pool: web::Data<PgPool>,
    settings: web::Data<LeagueSettings>,
) -> HttpResponse {
    match match_service(&pool, &settings).detail(match_id).await {
        Ok(game) => HttpResponse::Ok().json(ApiResponse::success("Match details retrieved successfully", game)),
        Err(e) => e.error_response(),
    }
}

#[tracing::instrument(name = "List matches", skip(pool, settings))]
pub async fn get_matches(
    pool: web::Data<PgPool>,
    settings: web::Data<LeagueSettings>,
) -> HttpResponse {
    match match_service(&pool, &settings).list().await {
        Ok(matches) => HttpResponse::Ok().json(ApiResponse::success("All matches retrieved successfully", matches)),
        Err(e) => e.error_response(),
    }
}
