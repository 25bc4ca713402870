// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Render the HTML error page for errors that escaped a handler.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::views::Notice;
use crate::AppState;

/// Replace the plain-text body of an `AppError` response with the error page.
///
/// Responses without a [`Notice`] extension pass through untouched. If the
/// error page itself fails to render, the plain-text body is kept.
pub async fn render_error_page(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    let Some(notice) = response.extensions().get::<Notice>().cloned() else {
        return response;
    };

    match state.views.error_page(&notice) {
        Ok(page) => (response.status(), page).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to render error page");
            response
        }
    }
}
