// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pages for visitors without a session: home, login, signup, password reset.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::session::{create_session_token, session_cookie};
use crate::routes::PageSet;
use crate::views::Notice;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/login", get(login_form).post(login))
        .route("/signup", get(signup_form).post(signup))
        .route("/reset", get(reset_form).post(reset))
}

async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    state.views.home_page(None)
}

// ─── Login ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

async fn login_form(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    state.views.login_page("", None)
}

/// Sign in and start a session, then land on the signed-in default page.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let (session_id, _session) = match state.auth.sign_in(&form.email, &form.password).await {
        Ok(signed_in) => signed_in,
        Err(e) => {
            tracing::info!(error = %e, "Login failed");
            let notice = Notice::Error(format!("Login failed: {}", e.user_message()));
            return Ok(state
                .views
                .login_page(&form.email, Some(&notice))?
                .into_response());
        }
    };

    let token = match create_session_token(
        &session_id,
        &state.config.session_signing_key,
        state.config.session_ttl_secs,
    ) {
        Ok(token) => token,
        Err(e) => {
            // Do not leave a session nobody can reach
            state.auth.sign_out(&session_id);
            return Err(AppError::Internal(e));
        }
    };

    let jar = jar.add(session_cookie(token, &state.config));
    Ok((jar, Redirect::to(PageSet::Authenticated.default_path())).into_response())
}

// ─── Sign-up ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_password: String,
}

async fn signup_form(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    state.views.signup_page("", None)
}

async fn signup(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SignupForm>,
) -> Result<Html<String>> {
    match state
        .auth
        .sign_up(&form.email, &form.password, &form.confirm_password)
        .await
    {
        Ok(()) => state.views.signup_page(
            "",
            Some(&Notice::Success(
                "Sign-up complete! Please log in.".to_string(),
            )),
        ),
        Err(e) => {
            let notice = match Notice::from(&e) {
                Notice::Error(msg) => Notice::Error(format!("Sign-up failed: {}", msg)),
                other => other,
            };
            state.views.signup_page(&form.email, Some(&notice))
        }
    }
}

// ─── Password reset ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetForm {
    #[serde(default)]
    email: String,
}

async fn reset_form(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    state.views.reset_page("", None)
}

async fn reset(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ResetForm>,
) -> Result<Html<String>> {
    match state.auth.send_password_reset(&form.email).await {
        Ok(()) => state.views.reset_page(
            "",
            Some(&Notice::Success("Password reset email sent.".to_string())),
        ),
        Err(e) => state.views.reset_page(
            &form.email,
            Some(&Notice::Error(format!("Failed: {}", e.user_message()))),
        ),
    }
}
