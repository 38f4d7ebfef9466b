//! Session cookie handling and the authenticated-user extractor.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use common::{SessionToken, UserId};
use shop_store::ShopStore;

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the cookie issued on register and login.
pub const SESSION_COOKIE: &str = "session";

/// The authenticated user for a request.
///
/// Resolved from the `session` cookie or an `Authorization: Bearer`
/// header; extraction rejects with 401 when neither maps to a live
/// session.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: UserId,
    pub token: SessionToken,
}

impl<S: ShopStore + 'static> FromRequestParts<Arc<AppState<S>>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<S>>,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_parts(parts).ok_or(ApiError::Unauthorized)?;
        let user = state
            .auth
            .current_user(token)
            .await?
            .ok_or(ApiError::Unauthorized)?;
        Ok(CurrentUser { id: user.id, token })
    }
}

/// Builds the `Set-Cookie` value that issues a session.
pub fn session_cookie(token: SessionToken) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// Builds the `Set-Cookie` value that expires the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0")
}

fn token_from_parts(parts: &Parts) -> Option<SessionToken> {
    if let Some(value) = parts.headers.get(header::COOKIE)
        && let Ok(cookies) = value.to_str()
    {
        for pair in cookies.split(';') {
            if let Some((name, raw)) = pair.trim().split_once('=')
                && name == SESSION_COOKIE
                && let Ok(id) = uuid::Uuid::parse_str(raw)
            {
                return Some(SessionToken::from_uuid(id));
            }
        }
    }

    if let Some(value) = parts.headers.get(header::AUTHORIZATION)
        && let Ok(raw) = value.to_str()
        && let Some(bearer) = raw.strip_prefix("Bearer ")
        && let Ok(id) = uuid::Uuid::parse_str(bearer.trim())
    {
        return Some(SessionToken::from_uuid(id));
    }

    None
}
