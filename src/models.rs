// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Direction of a transaction. Exactly two values; anything else is
/// rejected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl FromStr for TxKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(LedgerError::InvalidInput(format!(
                "unknown transaction kind '{}', expected income|expense",
                other
            ))),
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxKind::Income => write!(f, "income"),
            TxKind::Expense => write!(f, "expense"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub owner: String,
    pub kind: TxKind,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub occurred_on: NaiveDate,
    pub payment_method: Option<String>,
}

/// Per-owner record in the users collection: argon2 hash plus the running
/// balance cache (income minus expense, maintained on commit).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub credential_hash: String,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub target: Decimal,
    pub saved: Decimal,
    pub created_at: String,
}

/// How often a recurring template fires. Offsets are fixed day counts;
/// "monthly" is 30 days, not calendar-aware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn offset_days(&self) -> i64 {
        match self {
            Frequency::Daily => 1,
            Frequency::Weekly => 7,
            Frequency::Monthly => 30,
        }
    }
}

impl FromStr for Frequency {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(LedgerError::InvalidInput(format!(
                "unknown frequency '{}', expected daily|weekly|monthly",
                other
            ))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTemplate {
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub kind: TxKind,
    pub frequency: Frequency,
    pub next_due_date: NaiveDate,
}
