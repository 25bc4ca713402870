// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (session gate, security headers, error pages).

pub mod error_page;
pub mod security;
pub mod session;

pub use session::{require_guest, require_session, CurrentSession};
