// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Personal to-do list web application.
//!
//! Users sign in with email and password through Firebase Authentication
//! and keep a private list of to-do items in Cloud Firestore under
//! `users/{uid}/todos`.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod random;
pub mod routes;
pub mod services;
pub mod views;

use config::Config;
use db::FirestoreDb;
use services::AuthGateway;
use views::Views;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub auth: AuthGateway,
    pub views: Views,
}
