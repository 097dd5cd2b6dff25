// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The authoritative transaction collection. Owns the in-memory records for
//! every owner, assigns identifiers, and rewrites the whole backing
//! collection on each mutation. Save failures propagate without rollback, so
//! memory and disk may diverge until the next successful save.

use chrono::{NaiveDate, Utc};
use regex::RegexBuilder;
use rust_decimal::Decimal;

use crate::error::LedgerError;
use crate::models::{Transaction, TxKind};
use crate::store::Store;
use crate::utils::title_case;

/// Partial update for [`Ledger::edit`]. Omitted fields stay unchanged.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub kind: Option<TxKind>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub occurred_on: Option<NaiveDate>,
    pub payment_method: Option<String>,
}

pub struct Ledger<S: Store> {
    store: S,
    txns: Vec<Transaction>,
    next_id: i64,
}

impl<S: Store> Ledger<S> {
    pub fn load(store: S) -> Result<Self, LedgerError> {
        let txns = store.load_transactions()?;
        // max id + 1; never reissued within this store's lifetime.
        let next_id = txns.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Ok(Ledger {
            store,
            txns,
            next_id,
        })
    }

    /// Record a transaction dated today.
    pub fn add(
        &mut self,
        owner: &str,
        amount: Decimal,
        category: &str,
        description: &str,
        kind: TxKind,
        payment_method: Option<&str>,
    ) -> Result<&Transaction, LedgerError> {
        let today = Utc::now().date_naive();
        self.add_on(owner, amount, category, description, kind, payment_method, today)
    }

    /// Record a transaction with an explicit occurrence date.
    #[allow(clippy::too_many_arguments)]
    pub fn add_on(
        &mut self,
        owner: &str,
        amount: Decimal,
        category: &str,
        description: &str,
        kind: TxKind,
        payment_method: Option<&str>,
        occurred_on: NaiveDate,
    ) -> Result<&Transaction, LedgerError> {
        if amount.is_sign_negative() {
            return Err(LedgerError::InvalidInput(format!(
                "amount must be non-negative, got {}",
                amount
            )));
        }
        let txn = Transaction {
            id: self.next_id,
            owner: owner.to_string(),
            kind,
            amount: amount.round_dp(2),
            category: title_case(category),
            description: description.trim().to_string(),
            occurred_on,
            payment_method: payment_method.map(title_case),
        };
        self.next_id += 1;
        self.txns.push(txn);
        self.store.save_transactions(&self.txns)?;
        let idx = self.txns.len() - 1;
        Ok(&self.txns[idx])
    }

    /// All of an owner's transactions, in insertion order. Empty when the
    /// owner has none.
    pub fn list_for(&self, owner: &str) -> Vec<&Transaction> {
        self.txns.iter().filter(|t| t.owner == owner).collect()
    }

    pub fn get(&self, id: i64) -> Option<&Transaction> {
        self.txns.iter().find(|t| t.id == id)
    }

    /// Merge the provided fields into the transaction with this id. An empty
    /// patch leaves every field unchanged (and still re-persists).
    pub fn edit(&mut self, id: i64, patch: TransactionPatch) -> Result<&Transaction, LedgerError> {
        if let Some(amount) = patch.amount {
            if amount.is_sign_negative() {
                return Err(LedgerError::InvalidInput(format!(
                    "amount must be non-negative, got {}",
                    amount
                )));
            }
        }
        let idx = self
            .txns
            .iter()
            .position(|t| t.id == id)
            .ok_or(LedgerError::NotFound)?;
        {
            let t = &mut self.txns[idx];
            if let Some(kind) = patch.kind {
                t.kind = kind;
            }
            if let Some(amount) = patch.amount {
                t.amount = amount.round_dp(2);
            }
            if let Some(category) = patch.category {
                t.category = title_case(&category);
            }
            if let Some(description) = patch.description {
                t.description = description.trim().to_string();
            }
            if let Some(date) = patch.occurred_on {
                t.occurred_on = date;
            }
            if let Some(method) = patch.payment_method {
                t.payment_method = Some(title_case(&method));
            }
        }
        self.store.save_transactions(&self.txns)?;
        Ok(&self.txns[idx])
    }

    /// Remove the transaction with this id. Returns false (and skips the
    /// rewrite) when the id is absent.
    pub fn delete(&mut self, id: i64) -> Result<bool, LedgerError> {
        match self.txns.iter().position(|t| t.id == id) {
            Some(idx) => {
                self.txns.remove(idx);
                self.store.save_transactions(&self.txns)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Structured search: case-insensitive exact category match, inclusive
    /// date bounds.
    pub fn search(
        &self,
        owner: &str,
        category: Option<&str>,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Vec<&Transaction> {
        self.txns
            .iter()
            .filter(|t| t.owner == owner)
            .filter(|t| match category {
                Some(c) => t.category.eq_ignore_ascii_case(c.trim()),
                None => true,
            })
            .filter(|t| date_from.is_none_or(|from| t.occurred_on >= from))
            .filter(|t| date_to.is_none_or(|to| t.occurred_on <= to))
            .collect()
    }

    /// Keyword search over category and description, case-insensitive.
    pub fn find(&self, owner: &str, pattern: &str) -> Result<Vec<&Transaction>, LedgerError> {
        let re = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| LedgerError::InvalidInput(format!("invalid pattern: {}", e)))?;
        Ok(self
            .txns
            .iter()
            .filter(|t| t.owner == owner)
            .filter(|t| re.is_match(&t.category) || re.is_match(&t.description))
            .collect())
    }

    /// Read-only view for the report engine and goal tracker.
    pub fn snapshot(&self) -> &[Transaction] {
        &self.txns
    }
}
