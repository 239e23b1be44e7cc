//! `ActingUser` extractor — reads the acting user's ID from the request.
//!
//! Authentication lives in the upstream gateway; it injects the verified
//! user ID as the `X-User-Id` header. Bookings record it as `assigned_by`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use intake_core::error::AppError;

use crate::state::AppState;

/// The user a request acts on behalf of.
#[derive(Debug, Clone, Copy)]
pub struct ActingUser(pub Uuid);

impl ActingUser {
    /// Returns the user's ID.
    pub fn id(&self) -> Uuid {
        self.0
    }
}

impl FromRequestParts<AppState> for ActingUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::validation("Missing X-User-Id header"))?;

        let user_id = header
            .parse::<Uuid>()
            .map_err(|_| AppError::validation("X-User-Id header is not a valid UUID"))?;

        Ok(ActingUser(user_id))
    }
}
