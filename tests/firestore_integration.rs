// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running and
//! FIRESTORE_EMULATOR_HOST to point at it; otherwise they skip.

mod common;
use common::test_db;

/// Generate a unique uid for test isolation.
fn unique_uid() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("test-uid-{nanos}")
}

#[tokio::test]
async fn test_add_list_toggle_delete() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();

    assert!(db.list_todos(&uid).await.unwrap().is_empty());

    let item = db.add_todo(&uid, "Buy milk").await.unwrap().unwrap();
    assert!(!item.id.is_empty(), "store should assign an id");

    let items = db.list_todos(&uid).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, item.id);
    assert_eq!(items[0].text, "Buy milk");
    assert!(!items[0].done);

    db.set_done(&uid, &item.id, true).await.unwrap();
    db.set_done(&uid, &item.id, true).await.unwrap();
    let items = db.list_todos(&uid).await.unwrap();
    assert!(items[0].done);
    assert_eq!(items[0].text, "Buy milk", "partial update keeps other fields");

    db.delete_todo(&uid, &item.id).await.unwrap();
    assert!(db.list_todos(&uid).await.unwrap().is_empty());
    db.delete_todo(&uid, &item.id).await.unwrap();
}

#[tokio::test]
async fn test_set_done_on_deleted_item_does_not_recreate_it() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();

    let item = db.add_todo(&uid, "Ephemeral").await.unwrap().unwrap();
    db.delete_todo(&uid, &item.id).await.unwrap();

    db.set_done(&uid, &item.id, true).await.unwrap();
    assert!(db.list_todos(&uid).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_text_writes_nothing() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();

    assert!(db.add_todo(&uid, "").await.unwrap().is_none());
    assert!(db.list_todos(&uid).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_items_ordered_by_creation() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();

    for text in ["first", "second", "third"] {
        db.add_todo(&uid, text).await.unwrap();
    }

    let texts: Vec<String> = db
        .list_todos(&uid)
        .await
        .unwrap()
        .into_iter()
        .map(|item| item.text)
        .collect();
    assert_eq!(texts, ["first", "second", "third"]);
}

#[tokio::test]
async fn test_uids_are_isolated() {
    require_emulator!();

    let db = test_db().await;
    let alice = unique_uid();
    let bob = unique_uid();

    let item = db.add_todo(&alice, "Alice only").await.unwrap().unwrap();

    assert!(db.list_todos(&bob).await.unwrap().is_empty());
    db.delete_todo(&bob, &item.id).await.unwrap();
    assert_eq!(db.list_todos(&alice).await.unwrap().len(), 1);
}
