//! Registration, login, and logout endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Form, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};
use shop_store::ShopStore;

use crate::error::ApiError;
use crate::session::{self, CurrentUser};
use crate::state::AppState;

// -- Request types --

#[derive(Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct AuthResponse {
    pub user_id: String,
    pub username: String,
    pub message: String,
}

// -- Handlers --

/// POST /register/ — creates an account and signs it in.
#[tracing::instrument(skip(state, form))]
pub async fn register<S: ShopStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, ApiError> {
    let (user, session) = state.auth.register(&form.username, &form.password).await?;
    let response = (
        StatusCode::CREATED,
        [(header::SET_COOKIE, session::session_cookie(session.token))],
        Json(AuthResponse {
            user_id: user.id.to_string(),
            username: user.username,
            message: "Registration successful!".to_string(),
        }),
    );
    Ok(response.into_response())
}

/// POST /login/ — authenticates and issues a fresh session cookie.
///
/// Wrong password and unknown username produce the same 401 body.
#[tracing::instrument(skip(state, form))]
pub async fn login<S: ShopStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, ApiError> {
    let (user, session) = state.auth.login(&form.username, &form.password).await?;
    let message = format!("Welcome back {}!", user.username);
    let response = (
        [(header::SET_COOKIE, session::session_cookie(session.token))],
        Json(AuthResponse {
            user_id: user.id.to_string(),
            username: user.username,
            message,
        }),
    );
    Ok(response.into_response())
}

/// POST /logout/ — deletes the session, clears the cookie, and sends
/// the client home.
#[tracing::instrument(skip(state))]
pub async fn logout<S: ShopStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: CurrentUser,
) -> Result<Response, ApiError> {
    state.auth.logout(user.token).await?;
    let response = (
        [(header::SET_COOKIE, session::clear_session_cookie())],
        Redirect::to("/"),
    );
    Ok(response.into_response())
}
