// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed to-do operations.
//!
//! Every operation is scoped to a caller-supplied uid and touches only the
//! sub-collection `users/{uid}/todos`. There is no batching and no caching;
//! callers re-read the list after each write.

use std::sync::Arc;

use dashmap::DashMap;
use firestore::errors::FirestoreError;
use firestore::{FirestoreQueryDirection, FirestoreWritePrecondition};

use crate::db::collections;
use crate::error::AppError;
use crate::models::todo::TodoDonePatch;
use crate::models::TodoItem;
use crate::random::random_hex;

/// Length in bytes of locally generated document IDs (20 hex chars, like Firestore's).
const LOCAL_ID_BYTES: usize = 10;

#[derive(Clone)]
enum Backend {
    Firestore(firestore::FirestoreDb),
    /// Items per uid, in insertion order.
    Memory(Arc<DashMap<String, Vec<TodoItem>>>),
    Offline,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    backend: Backend,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator accepts any bearer token; skip credential discovery.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Store(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| AppError::Store(format!("Failed to connect to Firestore Emulator: {}", e)))?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a process-local store. Data is lost when the process exits.
    pub fn new_in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(DashMap::new())),
        }
    }

    /// Create a client with no backing store (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    fn offline() -> AppError {
        AppError::Store("Database not connected (offline mode)".to_string())
    }

    /// Path of the `users/{uid}` document that parents the to-do collection.
    fn user_parent(
        client: &firestore::FirestoreDb,
        uid: &str,
    ) -> Result<firestore::ParentPathBuilder, AppError> {
        client
            .parent_path(collections::USERS, uid)
            .map_err(|e| AppError::Store(e.to_string()))
    }

    // ─── To-do Operations ────────────────────────────────────────

    /// Add a to-do item for `uid`.
    ///
    /// Empty text is a no-op: nothing is written and `None` is returned.
    pub async fn add_todo(&self, uid: &str, text: &str) -> Result<Option<TodoItem>, AppError> {
        if text.is_empty() {
            tracing::debug!(uid, "Ignoring empty to-do text");
            return Ok(None);
        }

        let item = TodoItem::new(text);

        let stored = match &self.backend {
            Backend::Firestore(client) => {
                let parent = Self::user_parent(client, uid)?;
                client
                    .fluent()
                    .insert()
                    .into(collections::TODOS)
                    .generate_document_id()
                    .parent(&parent)
                    .object(&item)
                    .execute::<TodoItem>()
                    .await
                    .map_err(|e| AppError::Store(e.to_string()))?
            }
            Backend::Memory(todos) => {
                let id = random_hex(LOCAL_ID_BYTES)?;
                let stored = TodoItem { id, ..item };
                todos
                    .entry(uid.to_string())
                    .or_default()
                    .push(stored.clone());
                stored
            }
            Backend::Offline => return Err(Self::offline()),
        };

        tracing::info!(uid, todo_id = %stored.id, "To-do added");
        Ok(Some(stored))
    }

    /// Snapshot of `uid`'s to-do items, oldest first.
    pub async fn list_todos(&self, uid: &str) -> Result<Vec<TodoItem>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                let parent = Self::user_parent(client, uid)?;
                client
                    .fluent()
                    .select()
                    .from(collections::TODOS)
                    .parent(&parent)
                    .order_by([("created", FirestoreQueryDirection::Ascending)])
                    .obj()
                    .query()
                    .await
                    .map_err(|e| AppError::Store(e.to_string()))
            }
            Backend::Memory(todos) => Ok(todos
                .get(uid)
                .map(|items| items.value().clone())
                .unwrap_or_default()),
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Set the `done` flag of one item. A missing item is silently ignored.
    pub async fn set_done(&self, uid: &str, todo_id: &str, done: bool) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                let parent = Self::user_parent(client, uid)?;
                let result = client
                    .fluent()
                    .update()
                    .fields(["done"])
                    .in_col(collections::TODOS)
                    .precondition(FirestoreWritePrecondition::Exists(true))
                    .document_id(todo_id)
                    .parent(&parent)
                    .object(&TodoDonePatch { done })
                    .execute::<()>()
                    .await;

                match result {
                    Ok(()) => {}
                    Err(FirestoreError::DataNotFoundError(_)) => {
                        tracing::debug!(uid, todo_id, "To-do already gone, ignoring update");
                        return Ok(());
                    }
                    Err(e) => return Err(AppError::Store(e.to_string())),
                }
            }
            Backend::Memory(todos) => {
                if let Some(mut items) = todos.get_mut(uid) {
                    if let Some(item) = items.iter_mut().find(|item| item.id == todo_id) {
                        item.done = done;
                    }
                }
            }
            Backend::Offline => return Err(Self::offline()),
        }

        tracing::info!(uid, todo_id, done, "To-do updated");
        Ok(())
    }

    /// Delete one item. Deleting an already-deleted item succeeds.
    pub async fn delete_todo(&self, uid: &str, todo_id: &str) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                let parent = Self::user_parent(client, uid)?;
                client
                    .fluent()
                    .delete()
                    .from(collections::TODOS)
                    .document_id(todo_id)
                    .parent(&parent)
                    .execute()
                    .await
                    .map_err(|e| AppError::Store(e.to_string()))?;
            }
            Backend::Memory(todos) => {
                if let Some(mut items) = todos.get_mut(uid) {
                    items.retain(|item| item.id != todo_id);
                }
            }
            Backend::Offline => return Err(Self::offline()),
        }

        tracing::info!(uid, todo_id, "To-do deleted");
        Ok(())
    }
}
