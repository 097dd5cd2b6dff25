// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use pocketledger::auth::UserManager;
use pocketledger::error::AuthError;
use pocketledger::store::{MemStore, Store};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn register_then_authenticate() {
    let store = MemStore::new();
    let mut users = UserManager::load(&store).unwrap();
    users.register("alice", "Str0ng!pass").unwrap();

    let session = users.authenticate("alice", "Str0ng!pass").unwrap();
    assert_eq!(session.username, "alice");
    assert!(users.exists("alice"));
    assert_eq!(users.balance("alice"), Decimal::ZERO);
}

#[test]
fn duplicate_registration_is_rejected() {
    let store = MemStore::new();
    let mut users = UserManager::load(&store).unwrap();
    users.register("alice", "Str0ng!pass").unwrap();
    assert!(matches!(
        users.register("alice", "Other1!secret"),
        Err(AuthError::DuplicateUser)
    ));
}

#[test]
fn weak_secret_is_rejected() {
    let store = MemStore::new();
    let mut users = UserManager::load(&store).unwrap();
    assert!(matches!(
        users.register("alice", "password"),
        Err(AuthError::WeakSecret)
    ));
    assert!(!users.exists("alice"));
}

#[test]
fn wrong_or_unknown_credentials_are_indistinguishable() {
    let store = MemStore::new();
    let mut users = UserManager::load(&store).unwrap();
    users.register("alice", "Str0ng!pass").unwrap();
    assert!(matches!(
        users.authenticate("alice", "Wrong1!pass"),
        Err(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        users.authenticate("nobody", "Str0ng!pass"),
        Err(AuthError::InvalidCredentials)
    ));
}

#[test]
fn balance_cache_applies_signed_deltas() {
    let store = MemStore::new();
    let mut users = UserManager::load(&store).unwrap();
    users.register("alice", "Str0ng!pass").unwrap();
    users.update_balance("alice", dec("1000")).unwrap();
    users.update_balance("alice", dec("-250")).unwrap();
    assert_eq!(users.balance("alice"), dec("750"));

    // persisted alongside the credential hash
    assert_eq!(store.load_users().unwrap()["alice"].balance, dec("750"));
}

#[test]
fn balance_updates_for_unknown_owner_are_a_no_op() {
    let store = MemStore::new();
    let mut users = UserManager::load(&store).unwrap();
    users.update_balance("ghost", dec("100")).unwrap();
    assert_eq!(users.balance("ghost"), Decimal::ZERO);
    assert!(store.load_users().unwrap().is_empty());
}
