use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Json},
    http::{StatusCode, request::Parts},
};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;

pub const ROLE_CUSTOMER: &str = "customer";
pub const ROLE_STAFF: &str = "staff";

const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // customer or staff id
    pub role: String,
    pub name: String,
    pub exp: usize,
}

impl Claims {
    pub fn is_staff(&self) -> bool {
        self.role == ROLE_STAFF
    }

    /// The customer id carried by a customer token
    pub fn customer_id(&self) -> Result<i32, DomainError> {
        if self.role != ROLE_CUSTOMER {
            return Err(DomainError::Forbidden(
                "This action requires a customer account".to_string(),
            ));
        }
        self.subject_id()
    }

    pub fn require_staff(&self) -> Result<(), DomainError> {
        if self.is_staff() {
            Ok(())
        } else {
            Err(DomainError::Forbidden(
                "This action requires a staff account".to_string(),
            ))
        }
    }

    pub fn subject_id(&self) -> Result<i32, DomainError> {
        self.sub
            .parse()
            .map_err(|_| DomainError::Unauthorized("Invalid token subject".to_string()))
    }
}

/// HS256 signing keys shared through the application state
#[derive(Clone)]
pub struct JwtKeys {
    secret: Arc<str>,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: Arc::from(secret),
        }
    }

    pub fn create(&self, subject: i32, role: &str, name: &str) -> Result<String, String> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
            .ok_or_else(|| "Token expiry overflow".to_string())?
            .timestamp();

        let claims = Claims {
            sub: subject.to_string(),
            role: role.to_owned(),
            name: name.to_owned(),
            exp: expiration as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| e.to_string())
    }

    pub fn decode(&self, token: &str) -> Result<Claims, String> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| e.to_string())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Claims
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "success": false, "message": "Missing Authorization header" })),
            ))?;

        let Some(token) = auth_header.strip_prefix("Bearer ") else {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "success": false, "message": "Invalid Authorization header format" })),
            ));
        };

        let state = AppState::from_ref(state);
        state.jwt.decode(token).map_err(|e| {
            tracing::debug!("Rejected token: {}", e);
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "success": false, "message": "Invalid or expired token" })),
            )
        })
    }
}

pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| e.to_string())?
        .to_string();
    Ok(password_hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, String> {
    let parsed_hash = PasswordHash::new(password_hash).map_err(|e| e.to_string())?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
