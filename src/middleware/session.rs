// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session cookie handling and the page-set gate.
//!
//! The cookie carries an HS256 JWT whose subject is the session id. The
//! session itself lives in the server-side store, so signing out takes
//! effect immediately even if an old cookie is replayed.

use crate::config::Config;
use crate::routes::PageSet;
use crate::services::Session;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "todo_session";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (session id)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Session resolved for the current request.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub session_id: String,
    pub session: Session,
}

/// Resolve the request's session cookie to a live session.
pub fn resolve_session(state: &AppState, jar: &CookieJar) -> Option<CurrentSession> {
    let token = jar.get(SESSION_COOKIE)?.value().to_string();

    let key = DecodingKey::from_secret(&state.config.session_signing_key);
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(&token, &key, &validation).ok()?;

    let session = state.auth.session(&token_data.claims.sub)?;
    Some(CurrentSession {
        session_id: token_data.claims.sub,
        session,
    })
}

/// Gate for authenticated pages.
///
/// Without a live session the request is sent to the unauthenticated
/// default page and any stale cookie is cleared.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match resolve_session(&state, &jar) {
        Some(current) => {
            request.extensions_mut().insert(current);
            next.run(request).await
        }
        None => {
            tracing::debug!(path = %request.uri().path(), "No session, redirecting");
            let jar = if jar.get(SESSION_COOKIE).is_some() {
                jar.remove(expired_session_cookie(&state.config))
            } else {
                jar
            };
            (jar, Redirect::to(PageSet::Unauthenticated.default_path())).into_response()
        }
    }
}

/// Gate for unauthenticated pages: signed-in users go to their default page.
pub async fn require_guest(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    match PageSet::for_session(resolve_session(&state, &jar).is_some()) {
        PageSet::Unauthenticated => next.run(request).await,
        signed_in => Redirect::to(signed_in.default_path()).into_response(),
    }
}

/// Create a JWT naming a session id.
pub fn create_session_token(
    session_id: &str,
    signing_key: &[u8],
    ttl_secs: u64,
) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = usize::try_from(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())?;
    let ttl = usize::try_from(ttl_secs)?;

    let claims = Claims {
        sub: session_id.to_string(),
        iat: now,
        exp: now.saturating_add(ttl),
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Session cookie carrying a freshly signed token.
pub fn session_cookie(token: String, config: &Config) -> Cookie<'static> {
    let max_age = i64::try_from(config.session_ttl_secs).unwrap_or(i64::MAX);
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies())
        .max_age(time::Duration::seconds(max_age))
        .build()
}

/// Cookie matching `session_cookie`'s attributes, for removal.
pub fn expired_session_cookie(config: &Config) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies())
        .build()
}
