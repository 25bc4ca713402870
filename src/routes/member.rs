// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pages for signed-in users: logout, profile, to-do list.
//!
//! The uid always comes from the resolved session, never from the request,
//! so a user can only ever reach `users/{own uid}/todos`.

use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Extension, Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::session::expired_session_cookie;
use crate::middleware::CurrentSession;
use crate::views::Notice;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/logout", get(logout_form).post(logout))
        .route("/profile", get(profile))
        .route("/todos", get(list_todos).post(add_todo))
        .route("/todos/{id}/done", post(set_done))
        .route("/todos/{id}/delete", post(delete_todo))
}

/// Logout page. Signing out only happens on the form POST, so a plain
/// link to `/logout` cannot end a session.
async fn logout_form(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Html<String>> {
    state.views.logout_page(&current.session.email)
}

/// End the session and show the signed-out home page.
async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
    jar: CookieJar,
) -> Result<Response> {
    state.auth.sign_out(&current.session_id);
    let jar = jar.remove(expired_session_cookie(&state.config));
    let notice = Notice::Success("You have been logged out.".to_string());
    Ok((jar, state.views.home_page(Some(&notice))?).into_response())
}

async fn profile(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Html<String>> {
    match state.auth.get_account_info(&current.session.id_token).await {
        Ok(info) => state.views.profile_page(Some(&info), None),
        Err(e) => state.views.profile_page(None, Some(&Notice::from(&e))),
    }
}

// ─── To-do list ──────────────────────────────────────────────

/// Fetch the current list and render it. Called after every write so the
/// page always reflects the store.
async fn render_todos(
    state: &AppState,
    uid: &str,
    notice: Option<Notice>,
) -> Result<Html<String>> {
    match state.db.list_todos(uid).await {
        Ok(items) => state.views.todo_page(&items, notice.as_ref()),
        Err(e) => {
            tracing::warn!(uid, error = %e, "Failed to list to-dos");
            let notice = notice.unwrap_or_else(|| Notice::from(&e));
            state.views.todo_page(&[], Some(&notice))
        }
    }
}

/// Turn a failed write into a notice for the re-rendered list.
fn write_notice(result: Result<()>) -> Option<Notice> {
    result.err().map(|e| {
        tracing::warn!(error = %e, "To-do write failed");
        Notice::from(&e)
    })
}

async fn list_todos(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Html<String>> {
    render_todos(&state, &current.session.uid, None).await
}

#[derive(Deserialize)]
pub struct AddTodoForm {
    #[serde(default)]
    text: String,
}

async fn add_todo(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
    Form(form): Form<AddTodoForm>,
) -> Result<Html<String>> {
    let uid = &current.session.uid;
    let result = state.db.add_todo(uid, &form.text).await.map(|_| ());
    render_todos(&state, uid, write_notice(result)).await
}

#[derive(Deserialize)]
pub struct SetDoneForm {
    done: bool,
}

async fn set_done(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
    Path(todo_id): Path<String>,
    form: std::result::Result<Form<SetDoneForm>, FormRejection>,
) -> Result<Html<String>> {
    let uid = &current.session.uid;
    let result = match form {
        Ok(Form(form)) => state.db.set_done(uid, &todo_id, form.done).await,
        Err(rejection) => Err(AppError::Validation(rejection.body_text())),
    };
    render_todos(&state, uid, write_notice(result)).await
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
    Path(todo_id): Path<String>,
) -> Result<Html<String>> {
    let uid = &current.session.uid;
    let result = state.db.delete_todo(uid, &todo_id).await;
    render_todos(&state, uid, write_notice(result)).await
}
