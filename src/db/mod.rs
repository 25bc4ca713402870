//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// Parent collection, one document per uid
    pub const USERS: &str = "users";
    /// Per-user sub-collection under `users/{uid}`
    pub const TODOS: &str = "todos";
}
