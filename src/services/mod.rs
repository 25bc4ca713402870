// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - auth and session layer.

pub mod auth;
pub mod identity;
pub mod session;

pub use auth::AuthGateway;
pub use identity::IdentityClient;
pub use session::{Session, SessionStore};
