// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures while reading or writing a backing collection. Parsing failures
/// on stored data are NOT represented here: corrupt files load as empty
/// collections (lenient recovery), only genuine I/O and write-side
/// serialization problems surface.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("store failure: {0}")]
    Other(String),
}

/// Domain error taxonomy for ledger, budget, goal, and recurrence
/// operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed amount, unknown kind/frequency, non-positive target or
    /// limit. The operation aborts with no partial mutation.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Unknown transaction id. Missing budgets/goals are reported as absent
    /// results, not through this variant.
    #[error("transaction not found")]
    NotFound,
    /// Load/save failure. In-memory state keeps whatever it had before the
    /// failed save; memory and disk may diverge.
    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username already exists")]
    DuplicateUser,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error(
        "password must be at least 8 characters and contain an uppercase \
         letter, a lowercase letter, a digit, and a special character"
    )]
    WeakSecret,
    #[error("credential hashing failed: {0}")]
    Hash(String),
    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),
}
