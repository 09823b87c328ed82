use axum::{extract::FromRequestParts, http::header};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{config::AppConfig, error::AppError, state::AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Customer,
    Vendor,
    Admin,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    /// Phone number for customers and vendors, the admin email for the admin.
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub jti: String,
    pub exp: usize,
}

/// Caller resolved from a bearer token.
#[derive(Debug, Clone)]
pub struct ActingIdentity {
    pub subject: String,
    pub email: String,
    pub role: Role,
}

impl ActingIdentity {
    /// Customer and vendor subjects are their phone numbers.
    pub fn phone_number(&self) -> &str {
        &self.subject
    }
}

impl From<Claims> for ActingIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

pub fn issue_token(
    config: &AppConfig,
    subject: &str,
    email: &str,
    role: Role,
) -> Result<String, AppError> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(config.jwt_ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: subject.to_string(),
        email: email.to_string(),
        role,
        jti: Uuid::new_v4().to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn decode_token(config: &AppConfig, token: &str) -> Result<ActingIdentity, AppError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::unauthorized("Invalid or expired token."))?;
    Ok(decoded.claims.into())
}

fn ensure_role(identity: &ActingIdentity, role: Role) -> Result<(), AppError> {
    if identity.role != role {
        return Err(AppError::unauthorized(format!(
            "This action requires the {role:?} role."
        )));
    }
    Ok(())
}

pub fn ensure_admin(identity: &ActingIdentity) -> Result<(), AppError> {
    ensure_role(identity, Role::Admin)
}

pub fn ensure_customer(identity: &ActingIdentity) -> Result<(), AppError> {
    ensure_role(identity, Role::Customer)
}

pub fn ensure_vendor(identity: &ActingIdentity) -> Result<(), AppError> {
    ensure_role(identity, Role::Vendor)
}

impl FromRequestParts<AppState> for ActingIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header."))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::unauthorized("Invalid Authorization header."))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization scheme."))?;

        decode_token(&state.config, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 0,
            jwt_secret: "unit-test-secret".into(),
            jwt_ttl_hours: 1,
            admin_email: "admin@marketplace.com".into(),
            admin_password: "Admin123".into(),
            allowed_email_domain: "marketplace.com".into(),
            notification_buffer: 16,
        }
    }

    #[test]
    fn issued_token_decodes_to_identity() {
        let config = config();
        let token = issue_token(&config, "+201234567890", "v@marketplace.com", Role::Vendor)
            .unwrap();
        let identity = decode_token(&config, &token).unwrap();
        assert_eq!(identity.phone_number(), "+201234567890");
        assert_eq!(identity.email, "v@marketplace.com");
        assert_eq!(identity.role, Role::Vendor);
        assert!(ensure_vendor(&identity).is_ok());
        assert!(matches!(ensure_admin(&identity), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let config = config();
        let mut other = config.clone();
        other.jwt_secret = "another-secret".into();
        let token = issue_token(&other, "x", "x@marketplace.com", Role::Customer).unwrap();
        assert!(matches!(
            decode_token(&config, &token),
            Err(AppError::Unauthorized(_))
        ));
    }
}
