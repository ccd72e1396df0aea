use actix_web::{web, HttpResponse};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use crate::auth::jwt::generate_token;
use crate::config::jwt::JwtSettings;
use crate::db::user_queries;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::utils::password::verify_password;

#[tracing::instrument(
    name = "Login user attempt",
    skip(login_form, pool, jwt_settings),
    fields(
        username = %login_form.username
    )
)]
pub async fn login_user(
    login_form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    jwt_settings: web::Data<JwtSettings>
) -> HttpResponse {
    let user = match user_queries::find_by_username(pool.get_ref(), &login_form.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::info!("User not found or invalid credentials");
            return HttpResponse::Unauthorized().finish();
        }
        Err(e) => {
            tracing::error!("Database error occurred: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    if !verify_password(login_form.password.expose_secret(), &user.password_hash) {
        tracing::info!("Invalid password");
        return HttpResponse::Unauthorized().finish();
    }

    match generate_token(user.id, &user.username, &jwt_settings) {
        Ok((token, expires_at)) => HttpResponse::Ok().json(LoginResponse {
            token,
            user_id: user.id,
            expires_at,
        }),
        Err(e) => {
            tracing::error!("Error generating JWT token: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
