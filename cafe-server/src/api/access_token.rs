//! Bearer token extractor for admin routes
//!
//! The server does not verify the token itself. It is forwarded to the
//! backend, whose row-level security decides what the caller may see.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::security_log;
use crate::utils::AppError;

/// Raw token from `Authorization: Bearer <token>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_header(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AccessToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match header.and_then(AccessToken::from_header) {
            Some(token) => Ok(AccessToken(token.to_string())),
            None => {
                security_log!(WARN, "auth_missing", uri = %parts.uri, has_header = header.is_some());
                Err(AppError::not_authenticated())
            }
        }
    }
}
