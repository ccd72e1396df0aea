use actix_web::{web, HttpResponse, ResponseError};
use sqlx::PgPool;

use crate::league::standings::StandingsService;
use crate::models::common::ApiResponse;

#[tracing::instrument(name = "Get standings", skip(pool))]
pub async fn get_standings(pool: web::Data<PgPool>) -> HttpResponse {
    let standings_service = StandingsService::new(pool.get_ref().clone());

    match standings_service.rank().await {
        Ok(standings) => {
            tracing::info!("Successfully retrieved standings for {} clubs", standings.len());
            HttpResponse::Ok().json(ApiResponse::success("Standings retrieved successfully", standings))
        }
        Err(e) => {
            tracing::error!("Failed to get standings: {}", e);
            e.error_response()
        }
    }
}
