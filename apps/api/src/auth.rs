use axum::{async_trait, extract::FromRequestParts, http::header, http::request::Parts};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// Claims carried in the HR session token. Issuance lives in the external
/// auth service; this module only verifies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HrClaims {
    /// HR identity — the authorization anchor for every bulk operation.
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    pub exp: usize,
}

/// Authenticated HR identity extractor.
///
/// Looks for a bearer token in the `Authorization` header first, then a
/// `token` cookie. Missing or invalid tokens reject with 401 — distinct
/// from the 403 the authorization guard returns for scope violations.
pub struct AuthHr(pub HrClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthHr {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .or_else(|| cookie_token(parts))
            .ok_or(AppError::Unauthorized)?;
        let claims = verify_token(&token, &state.config.jwt_secret)?;
        Ok(AuthHr(claims))
    }
}

pub fn verify_token(token: &str, secret: &str) -> Result<HrClaims, AppError> {
    decode::<HrClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("Token verification failed: {e}");
        AppError::Unauthorized
    })
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
}

fn cookie_token(parts: &Parts) -> Option<String> {
    let cookies = parts.headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == "token").then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn make_token(exp_offset_secs: i64) -> String {
        let claims = HrClaims {
            sub: Uuid::new_v4(),
            email: "hr@acme.test".to_string(),
            name: "Recruiter".to_string(),
            exp: (chrono::Utc::now().timestamp() + exp_offset_secs) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_round_trips() {
        let token = make_token(3600);
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.email, "hr@acme.test");
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = make_token(-3600);
        assert!(matches!(
            verify_token(&token, SECRET),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = make_token(3600);
        assert!(matches!(
            verify_token(&token, "other-secret"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(
            verify_token("not.a.jwt", SECRET),
            Err(AppError::Unauthorized)
        ));
    }
}
