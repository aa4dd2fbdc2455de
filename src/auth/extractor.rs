use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::AppError;

/// The caller's `Authorization` header, forwarded untouched to Insights Hub.
#[derive(Debug, Clone)]
pub struct PassThroughToken(pub String);

impl PassThroughToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for PassThroughToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("No authorization token provided".to_string()))?;

        let value = header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?
            .trim();

        if value.is_empty() {
            return Err(AppError::Unauthorized(
                "No authorization token provided".to_string(),
            ));
        }

        Ok(PassThroughToken(value.to_string()))
    }
}
