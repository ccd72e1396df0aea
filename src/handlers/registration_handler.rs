use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db::helpers::{ensure_not_exists, insert_result};
use crate::db::user_queries;
use crate::models::common::ApiResponse;
use crate::models::user::RegistrationRequest;
use crate::ok_or_return;

#[tracing::instrument(
    name = "Adding a new user",
    // Don't show arguments
    skip(user_form, pool),
    fields(
        username = %user_form.username,
        email = %user_form
    )
)]
pub async fn register_user(
    user_form: web::Json<RegistrationRequest>,
    pool: web::Data<PgPool>
) -> HttpResponse {
    let username = user_form.username.trim();
    if username.is_empty() || user_form.email.trim().is_empty() {
        return HttpResponse::BadRequest().json(ApiResponse::<()>::error("Username and email are required"));
    }

    ok_or_return!(ensure_not_exists(
        user_queries::find_by_username(pool.get_ref(), username).await,
        "Username already taken"
    ));

    // A concurrent registration can still win the race to the unique index
    let user_id = ok_or_return!(insert_result(
        user_queries::insert_user(pool.get_ref(), username, user_form.email.trim(), &user_form.password).await,
        "Username already taken"
    ));

    tracing::info!("Registered user {}", user_id);
    HttpResponse::Ok().json(ApiResponse::success("User registered successfully", user_id))
}
