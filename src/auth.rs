// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand_core::OsRng;
use rust_decimal::Decimal;

use crate::error::AuthError;
use crate::models::UserRecord;
use crate::store::{Store, UserMap};

#[derive(Debug, Clone)]
pub struct SessionUser {
    pub username: String,
}

/// Registration, authentication, and the per-owner running balance cache.
/// Secrets are stored as argon2 hashes; the balance is adjusted by the
/// command layer whenever a transaction is committed and is not recomputed
/// from the ledger by default.
pub struct UserManager<S: Store> {
    store: S,
    users: UserMap,
}

fn secret_is_strong(secret: &str) -> bool {
    secret.len() >= 8
        && secret.chars().any(|c| c.is_ascii_uppercase())
        && secret.chars().any(|c| c.is_ascii_lowercase())
        && secret.chars().any(|c| c.is_ascii_digit())
        && secret.chars().any(|c| !c.is_alphanumeric())
}

impl<S: Store> UserManager<S> {
    pub fn load(store: S) -> Result<Self, AuthError> {
        let users = store.load_users()?;
        Ok(UserManager { store, users })
    }

    pub fn register(&mut self, username: &str, secret: &str) -> Result<(), AuthError> {
        let username = username.trim();
        if username.is_empty() || secret.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        if self.users.contains_key(username) {
            return Err(AuthError::DuplicateUser);
        }
        if !secret_is_strong(secret) {
            return Err(AuthError::WeakSecret);
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| AuthError::Hash(e.to_string()))?
            .to_string();
        self.users.insert(
            username.to_string(),
            UserRecord {
                credential_hash: hash,
                balance: Decimal::ZERO,
            },
        );
        self.store.save_users(&self.users)?;
        Ok(())
    }

    pub fn authenticate(&self, username: &str, secret: &str) -> Result<SessionUser, AuthError> {
        let record = self
            .users
            .get(username.trim())
            .ok_or(AuthError::InvalidCredentials)?;
        let parsed =
            PasswordHash::new(&record.credential_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
        Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .map_err(|_| AuthError::InvalidCredentials)?;
        Ok(SessionUser {
            username: username.trim().to_string(),
        })
    }

    pub fn exists(&self, owner: &str) -> bool {
        self.users.contains_key(owner)
    }

    /// Cached running balance; zero for unknown owners.
    pub fn balance(&self, owner: &str) -> Decimal {
        self.users
            .get(owner)
            .map(|u| u.balance)
            .unwrap_or(Decimal::ZERO)
    }

    /// Apply a signed delta to the balance cache. Unknown owners are a
    /// no-op, matching the non-enforced owner relationship.
    pub fn update_balance(&mut self, owner: &str, delta: Decimal) -> Result<(), AuthError> {
        if let Some(record) = self.users.get_mut(owner) {
            record.balance += delta;
            self.store.save_users(&self.users)?;
        }
        Ok(())
    }
}
