// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers and the two-state page router.
//!
//! Which pages exist depends only on whether the request carries a live
//! session. Asking for a page of the other set redirects to the default
//! page of the set the request belongs to.

pub mod member;
pub mod public;

use crate::middleware::{require_guest, require_session};
use crate::AppState;
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// One entry in the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub path: &'static str,
    pub title: &'static str,
    /// Navigation group heading, if the set is grouped
    pub section: Option<&'static str>,
}

const UNAUTHENTICATED_PAGES: &[PageLink] = &[
    PageLink { path: "/", title: "Home", section: None },
    PageLink { path: "/login", title: "Log in", section: None },
    PageLink { path: "/signup", title: "Sign up", section: None },
    PageLink { path: "/reset", title: "Reset password", section: None },
];

const AUTHENTICATED_PAGES: &[PageLink] = &[
    PageLink { path: "/logout", title: "Log out", section: Some("Account") },
    PageLink { path: "/profile", title: "Profile", section: Some("Account") },
    PageLink { path: "/todos", title: "My to-dos", section: Some("Features") },
];

/// The two page sets a request can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSet {
    Unauthenticated,
    Authenticated,
}

impl PageSet {
    pub fn for_session(has_session: bool) -> Self {
        if has_session {
            PageSet::Authenticated
        } else {
            PageSet::Unauthenticated
        }
    }

    pub fn pages(self) -> &'static [PageLink] {
        match self {
            PageSet::Unauthenticated => UNAUTHENTICATED_PAGES,
            PageSet::Authenticated => AUTHENTICATED_PAGES,
        }
    }

    /// Where a request lands after entering this state.
    pub fn default_path(self) -> &'static str {
        match self {
            PageSet::Unauthenticated => "/",
            PageSet::Authenticated => "/todos",
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Pages for visitors without a session
    let public_routes = public::routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), require_guest));

    // Pages for signed-in users
    let member_routes = member::routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/health", get(health_check))
        .merge(public_routes)
        .merge(member_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::error_page::render_error_page,
        ))
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
