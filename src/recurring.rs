// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Recurring-transaction templates. No background timer: due templates fire
//! only when `process` is invoked. Each call materializes at most one
//! occurrence per template and advances the cursor by the frequency's fixed
//! offset from its previous value, so elapsed periods are not backfilled.
//! Known limitation, kept deliberately.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::models::{Frequency, RecurringTemplate, Transaction, TxKind};
use crate::store::{RecurringMap, Store};
use crate::utils::title_case;

pub struct RecurrenceScheduler<S: Store> {
    store: S,
    templates: RecurringMap,
}

impl<S: Store> RecurrenceScheduler<S> {
    pub fn load(store: S) -> Result<Self, LedgerError> {
        let templates = store.load_recurring()?;
        Ok(RecurrenceScheduler { store, templates })
    }

    /// Register a template. The first occurrence is due immediately: the
    /// cursor starts at `today`.
    #[allow(clippy::too_many_arguments)]
    pub fn add(
        &mut self,
        owner: &str,
        amount: Decimal,
        category: &str,
        description: &str,
        kind: TxKind,
        frequency: Frequency,
        today: NaiveDate,
    ) -> Result<&RecurringTemplate, LedgerError> {
        if amount.is_sign_negative() {
            return Err(LedgerError::InvalidInput(format!(
                "amount must be non-negative, got {}",
                amount
            )));
        }
        let list = self.templates.entry(owner.to_string()).or_default();
        list.push(RecurringTemplate {
            amount: amount.round_dp(2),
            category: title_case(category),
            description: description.trim().to_string(),
            kind,
            frequency,
            next_due_date: today,
        });
        let idx = list.len() - 1;
        self.store.save_recurring(&self.templates)?;
        Ok(&self.templates[owner][idx])
    }

    pub fn list_for(&self, owner: &str) -> &[RecurringTemplate] {
        self.templates.get(owner).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Materialize one occurrence for every template due on or before
    /// `today`, advancing each cursor by its fixed offset from the previous
    /// due date. The ledger stamps the occurrence date at creation time.
    /// Returns the committed transactions.
    pub fn process<L: Store>(
        &mut self,
        ledger: &mut Ledger<L>,
        owner: &str,
        today: NaiveDate,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let Some(templates) = self.templates.get_mut(owner) else {
            return Ok(Vec::new());
        };
        let mut materialized = Vec::new();
        for tpl in templates.iter_mut() {
            if today < tpl.next_due_date {
                continue;
            }
            let txn = ledger
                .add(
                    owner,
                    tpl.amount,
                    &tpl.category,
                    &tpl.description,
                    tpl.kind,
                    None,
                )?
                .clone();
            materialized.push(txn);
            tpl.next_due_date = tpl.next_due_date + Duration::days(tpl.frequency.offset_days());
        }
        if !materialized.is_empty() {
            self.store.save_recurring(&self.templates)?;
        }
        Ok(materialized)
    }
}
