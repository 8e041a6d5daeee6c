/// Bearer-token authentication
///
/// Validates `Authorization: Bearer <jwt>` headers and exposes the acting
/// user to handlers as the [`AuthUser`] extractor. Token issuance and
/// refresh live in the external identity service; this API only checks
/// signatures and expiry.
use crate::config::Config;
use crate::error::AppError;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// Expiration time (unix seconds)
    pub exp: usize,
    /// Issued at (unix seconds)
    pub iat: usize,
}

/// The authenticated user for the current request.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, AppError> {
    let config = req
        .app_data::<web::Data<Config>>()
        .ok_or_else(|| AppError::Internal("auth configuration missing".to_string()))?;

    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing authorization header".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("malformed authorization header".to_string()))?;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.auth.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("invalid or expired token".to_string()))?
    .claims;

    Ok(AuthUser { id: claims.sub })
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn test_config(secret: &str) -> Config {
        let mut cfg = Config::from_env().unwrap();
        cfg.auth.jwt_secret = secret.to_string();
        cfg
    }

    fn token(secret: &str, sub: Uuid, exp_offset: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub,
            exp: (now + exp_offset) as usize,
            iat: now as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_resolves_the_user() {
        let user_id = Uuid::new_v4();
        let req = TestRequest::default()
            .app_data(web::Data::new(test_config("s3cret")))
            .insert_header(("Authorization", format!("Bearer {}", token("s3cret", user_id, 3600))))
            .to_http_request();

        let user = authenticate(&req).unwrap();
        assert_eq!(user.id, user_id);
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let req = TestRequest::default()
            .app_data(web::Data::new(test_config("s3cret")))
            .to_http_request();

        assert!(matches!(
            authenticate(&req),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn wrong_secret_is_unauthorized() {
        let req = TestRequest::default()
            .app_data(web::Data::new(test_config("right")))
            .insert_header((
                "Authorization",
                format!("Bearer {}", token("wrong", Uuid::new_v4(), 3600)),
            ))
            .to_http_request();

        assert!(matches!(
            authenticate(&req),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let req = TestRequest::default()
            .app_data(web::Data::new(test_config("s3cret")))
            .insert_header((
                "Authorization",
                format!("Bearer {}", token("s3cret", Uuid::new_v4(), -3600)),
            ))
            .to_http_request();

        assert!(matches!(
            authenticate(&req),
            Err(AppError::Unauthorized(_))
        ));
    }
}
