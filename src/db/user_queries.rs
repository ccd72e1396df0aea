use secrecy::{ExposeSecret, SecretString};
use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::user::User;
use crate::utils::password::hash_password;

pub async fn find_by_username<'e>(executor: impl PgExecutor<'e>, username: &str) -> SqlxResult<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, username, password_hash, created_at, updated_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(executor)
    .await
}

pub async fn insert_user<'e>(
    executor: impl PgExecutor<'e>,
    username: &str,
    email: &str,
    password: &SecretString,
) -> SqlxResult<Uuid> {
    let password_hash = hash_password(password.expose_secret())
        .map_err(|e| sqlx::Error::Protocol(format!("Failed to hash password: {}", e)))?;

    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO users (id, username, password_hash, email, created_at, updated_at)
        VALUES ($1, $2, $3, $4, NOW(), NOW())
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(password_hash)
    .bind(email)
    .fetch_one(executor)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute user insert query: {:?}", e);
        e
    })
}
