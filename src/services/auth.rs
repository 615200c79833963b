use crate::models::{Agent, Caller, Role};
use actix_web::http::header;
use actix_web::HttpRequest;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while identifying or authorizing a caller
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Caller may not modify agent {0}")]
    Forbidden(Uuid),
}

/// JWT claims issued by the session provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub exp: i64,
}

/// HS256 token verifier
pub struct TokenVerifier {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Decode and check a token, returning the caller it identifies
    pub fn verify(&self, token: &str) -> Result<Caller, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;

        Ok(Caller {
            user_id: data.claims.sub,
            role: data.claims.role,
        })
    }

    /// Sign a token for `user_id`, valid for `ttl`
    pub fn issue(&self, user_id: Uuid, role: Role, ttl: chrono::Duration) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id,
            role,
            exp: (chrono::Utc::now() + ttl).timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Identify the caller from the request's `Authorization` header
    pub fn authenticate(&self, req: &HttpRequest) -> Result<Caller, AuthError> {
        let token = bearer_token(req).ok_or(AuthError::MissingToken)?;
        self.verify(token)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() {
        Some(token.trim())
    } else {
        None
    }
}

/// Only admins and the agent's own user may move an agent
pub fn authorize_location_update(caller: &Caller, agent: &Agent) -> Result<(), AuthError> {
    if caller.is_admin() || caller.user_id == agent.user_id {
        Ok(())
    } else {
        Err(AuthError::Forbidden(agent.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use chrono::Utc;

    fn agent_owned_by(user_id: Uuid) -> Agent {
        Agent {
            id: Uuid::new_v4(),
            user_id,
            name: "Owned".to_string(),
            latitude: None,
            longitude: None,
            is_available: true,
            average_rating: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let verifier = TokenVerifier::new("test-secret", 0);
        let user_id = Uuid::new_v4();

        let token = verifier.issue(user_id, Role::Agent, chrono::Duration::minutes(5)).unwrap();
        let caller = verifier.verify(&token).unwrap();

        assert_eq!(caller, Caller { user_id, role: Role::Agent });
    }

    #[test]
    fn test_rejects_wrong_secret_and_expired() {
        let issuer = TokenVerifier::new("one", 0);
        let verifier = TokenVerifier::new("two", 0);
        let token = issuer.issue(Uuid::new_v4(), Role::Admin, chrono::Duration::minutes(5)).unwrap();
        assert!(matches!(verifier.verify(&token), Err(AuthError::InvalidToken(_))));

        let expired = issuer.issue(Uuid::new_v4(), Role::Admin, chrono::Duration::minutes(-5)).unwrap();
        assert!(matches!(issuer.verify(&expired), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_bearer_token_parsing() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc.def"));

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic Zm9vOmJhcg=="))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = TestRequest::default().to_http_request();
        assert_eq!(bearer_token(&req), None);
    }

    #[test]
    fn test_authorize_location_update() {
        let owner = Uuid::new_v4();
        let agent = agent_owned_by(owner);

        let itself = Caller { user_id: owner, role: Role::Agent };
        let admin = Caller { user_id: Uuid::new_v4(), role: Role::Admin };
        let other = Caller { user_id: Uuid::new_v4(), role: Role::Agent };
        let employee = Caller { user_id: Uuid::new_v4(), role: Role::Employee };

        assert!(authorize_location_update(&itself, &agent).is_ok());
        assert!(authorize_location_update(&admin, &agent).is_ok());
        assert!(matches!(authorize_location_update(&other, &agent), Err(AuthError::Forbidden(_))));
        assert!(authorize_location_update(&employee, &agent).is_err());
    }
}
