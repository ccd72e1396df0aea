use actix_web::{
    dev::Payload, error::ErrorUnauthorized, http::header, web, Error as ActixError, FromRequest,
    HttpRequest,
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::config::jwt::JwtSettings;
use crate::models::auth::Claims;

/// Identity of the caller, taken from a valid bearer token.
///
/// Adding this extractor to a handler makes the endpoint reject
/// unauthenticated requests with 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ActixError> {
    let jwt_settings = req
        .app_data::<web::Data<JwtSettings>>()
        .ok_or_else(|| ErrorUnauthorized("JWT settings not found"))?;

    let auth_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ErrorUnauthorized("No authorization header"))?
        .to_str()
        .map_err(|_| ErrorUnauthorized("Invalid authorization header"))?;

    let token = auth_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or_else(|| ErrorUnauthorized("Invalid authorization scheme"))?;
    if token.is_empty() {
        return Err(ErrorUnauthorized("Empty token"));
    }

    let claims = decode_token(token, jwt_settings).map_err(|e| {
        tracing::warn!("Failed to decode token: {:?}", e);
        ErrorUnauthorized("Invalid token")
    })?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ErrorUnauthorized("Invalid token subject"))?;

    Ok(AuthenticatedUser {
        user_id,
        username: claims.username,
    })
}

pub fn generate_token(
    user_id: Uuid,
    username: &str,
    jwt_settings: &JwtSettings,
) -> Result<(String, DateTime<Utc>), jsonwebtoken::errors::Error> {
    let expires_at = Utc::now() + jwt_settings.token_lifetime();

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        exp: expires_at.timestamp() as usize,
    };

    let token = encode(&Header::default(), &claims, &jwt_settings.encoding_key())?;
    Ok((token, expires_at))
}

pub fn decode_token(
    token: &str,
    jwt_settings: &JwtSettings,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &jwt_settings.decoding_key(),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn settings() -> JwtSettings {
        JwtSettings::new("unit-test-secret".to_string(), 1)
    }

    #[test]
    fn test_token_round_trip_keeps_identity() {
        let settings = settings();
        let user_id = Uuid::new_v4();
        let (token, expires_at) = generate_token(user_id, "coach", &settings).unwrap();

        let claims = decode_token(&token, &settings).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.username, "coach");
        assert!(expires_at > Utc::now());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let (token, _) = generate_token(Uuid::new_v4(), "coach", &settings()).unwrap();
        let other = JwtSettings::new("another-secret".to_string(), 1);
        assert!(decode_token(&token, &other).is_err());
    }

    #[test]
    fn test_extractor_requires_bearer_header() {
        let settings = web::Data::new(settings());
        let user_id = Uuid::new_v4();
        let (token, _) = generate_token(user_id, "coach", &settings).unwrap();

        let missing = TestRequest::default()
            .app_data(settings.clone())
            .to_http_request();
        assert!(authenticate(&missing).is_err());

        let wrong_scheme = TestRequest::default()
            .app_data(settings.clone())
            .insert_header((header::AUTHORIZATION, format!("Basic {}", token)))
            .to_http_request();
        assert!(authenticate(&wrong_scheme).is_err());

        let valid = TestRequest::default()
            .app_data(settings)
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();
        assert_eq!(authenticate(&valid).unwrap().user_id, user_id);
    }
}
