// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! To-do item model for storage and rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single to-do item, stored at `users/{uid}/todos/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Document ID assigned by the store (not written as a field)
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: String,
    pub text: String,
    pub done: bool,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created: DateTime<Utc>,
}

impl TodoItem {
    /// A fresh, not-yet-stored item. The store fills in `id`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            text: text.into(),
            done: false,
            created: Utc::now(),
        }
    }
}

/// Partial document used when only the `done` flag changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoDonePatch {
    pub done: bool,
}
