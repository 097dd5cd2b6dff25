// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Whole-collection persistence. Every save rewrites the full backing file;
//! there is no append log and no partial write. Concurrent processes writing
//! the same store lose updates (last writer wins) — accepted under the
//! single-operator assumption.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::models::{RecurringTemplate, SavingsGoal, Transaction, UserRecord};

pub type UserMap = BTreeMap<String, UserRecord>;
/// owner -> month (YYYY-MM) -> limit
pub type BudgetMap = BTreeMap<String, BTreeMap<String, Decimal>>;
/// owner -> goal name -> goal
pub type GoalMap = BTreeMap<String, BTreeMap<String, SavingsGoal>>;
/// owner -> templates, in creation order
pub type RecurringMap = BTreeMap<String, Vec<RecurringTemplate>>;

const TRANSACTIONS_FILE: &str = "transactions.csv";
const USERS_FILE: &str = "users.json";
const BUDGETS_FILE: &str = "budgets.json";
const GOALS_FILE: &str = "savings_goals.json";
const RECURRING_FILE: &str = "recurring_transactions.json";

/// Load/save of the backing collections, all-or-nothing. Implemented by the
/// file-backed store and by an in-memory fake with the same interface for
/// tests.
pub trait Store {
    fn load_transactions(&self) -> Result<Vec<Transaction>, StoreError>;
    fn save_transactions(&self, txns: &[Transaction]) -> Result<(), StoreError>;
    fn load_users(&self) -> Result<UserMap, StoreError>;
    fn save_users(&self, users: &UserMap) -> Result<(), StoreError>;
    fn load_budgets(&self) -> Result<BudgetMap, StoreError>;
    fn save_budgets(&self, budgets: &BudgetMap) -> Result<(), StoreError>;
    fn load_goals(&self) -> Result<GoalMap, StoreError>;
    fn save_goals(&self, goals: &GoalMap) -> Result<(), StoreError>;
    fn load_recurring(&self) -> Result<RecurringMap, StoreError>;
    fn save_recurring(&self, templates: &RecurringMap) -> Result<(), StoreError>;
}

impl<S: Store> Store for &S {
    fn load_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        (**self).load_transactions()
    }

    fn save_transactions(&self, txns: &[Transaction]) -> Result<(), StoreError> {
        (**self).save_transactions(txns)
    }

    fn load_users(&self) -> Result<UserMap, StoreError> {
        (**self).load_users()
    }

    fn save_users(&self, users: &UserMap) -> Result<(), StoreError> {
        (**self).save_users(users)
    }

    fn load_budgets(&self) -> Result<BudgetMap, StoreError> {
        (**self).load_budgets()
    }

    fn save_budgets(&self, budgets: &BudgetMap) -> Result<(), StoreError> {
        (**self).save_budgets(budgets)
    }

    fn load_goals(&self) -> Result<GoalMap, StoreError> {
        (**self).load_goals()
    }

    fn save_goals(&self, goals: &GoalMap) -> Result<(), StoreError> {
        (**self).save_goals(goals)
    }

    fn load_recurring(&self) -> Result<RecurringMap, StoreError> {
        (**self).load_recurring()
    }

    fn save_recurring(&self, templates: &RecurringMap) -> Result<(), StoreError> {
        (**self).save_recurring(templates)
    }
}

pub fn data_dir() -> Result<PathBuf, StoreError> {
    let proj = ProjectDirs::from("dev.pocketledger", "Pocketledger", "pocketledger")
        .ok_or_else(|| StoreError::Other("could not determine platform data dir".into()))?;
    Ok(proj.data_dir().to_path_buf())
}

/// Transactions live in a CSV file, everything else in JSON maps. Corrupt
/// files load as empty collections (lenient recovery); missing files are not
/// an error.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        FileStore { dir }
    }

    pub fn open_default() -> Result<Self, StoreError> {
        let dir = data_dir()?;
        fs::create_dir_all(&dir)?;
        Ok(FileStore { dir })
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn load_json<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T, StoreError> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(T::default());
        }
        let raw = fs::read_to_string(&path)?;
        // Corrupt content degrades to an empty collection.
        Ok(serde_json::from_str(&raw).unwrap_or_default())
    }

    fn save_json<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let raw = serde_json::to_string_pretty(value)?;
        fs::write(self.dir.join(file), raw)?;
        Ok(())
    }
}

impl Store for FileStore {
    fn load_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        let path = self.dir.join(TRANSACTIONS_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path)?;
        let mut rdr = csv::Reader::from_reader(raw.as_bytes());
        let mut txns = Vec::new();
        for rec in rdr.deserialize::<Transaction>() {
            match rec {
                Ok(t) => txns.push(t),
                // Corrupt row: drop the whole collection rather than crash.
                Err(_) => return Ok(Vec::new()),
            }
        }
        Ok(txns)
    }

    fn save_transactions(&self, txns: &[Transaction]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let mut wtr = csv::Writer::from_writer(Vec::new());
        for t in txns {
            wtr.serialize(t)?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| StoreError::Other(e.to_string()))?;
        fs::write(self.dir.join(TRANSACTIONS_FILE), bytes)?;
        Ok(())
    }

    fn load_users(&self) -> Result<UserMap, StoreError> {
        self.load_json(USERS_FILE)
    }

    fn save_users(&self, users: &UserMap) -> Result<(), StoreError> {
        self.save_json(USERS_FILE, users)
    }

    fn load_budgets(&self) -> Result<BudgetMap, StoreError> {
        self.load_json(BUDGETS_FILE)
    }

    fn save_budgets(&self, budgets: &BudgetMap) -> Result<(), StoreError> {
        self.save_json(BUDGETS_FILE, budgets)
    }

    fn load_goals(&self) -> Result<GoalMap, StoreError> {
        self.load_json(GOALS_FILE)
    }

    fn save_goals(&self, goals: &GoalMap) -> Result<(), StoreError> {
        self.save_json(GOALS_FILE, goals)
    }

    fn load_recurring(&self) -> Result<RecurringMap, StoreError> {
        self.load_json(RECURRING_FILE)
    }

    fn save_recurring(&self, templates: &RecurringMap) -> Result<(), StoreError> {
        self.save_json(RECURRING_FILE, templates)
    }
}

/// In-memory fake with the same whole-collection semantics. `fail_saves`
/// turns every save into an error so tests can exercise the
/// memory-keeps-state-on-failed-save contract.
#[derive(Debug, Default)]
pub struct MemStore {
    txns: RefCell<Vec<Transaction>>,
    users: RefCell<UserMap>,
    budgets: RefCell<BudgetMap>,
    goals: RefCell<GoalMap>,
    recurring: RefCell<RecurringMap>,
    fail_saves: Cell<bool>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    fn gate(&self) -> Result<(), StoreError> {
        if self.fail_saves.get() {
            Err(StoreError::Other("save failure injected".into()))
        } else {
            Ok(())
        }
    }
}

impl Store for MemStore {
    fn load_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.txns.borrow().clone())
    }

    fn save_transactions(&self, txns: &[Transaction]) -> Result<(), StoreError> {
        self.gate()?;
        *self.txns.borrow_mut() = txns.to_vec();
        Ok(())
    }

    fn load_users(&self) -> Result<UserMap, StoreError> {
        Ok(self.users.borrow().clone())
    }

    fn save_users(&self, users: &UserMap) -> Result<(), StoreError> {
        self.gate()?;
        *self.users.borrow_mut() = users.clone();
        Ok(())
    }

    fn load_budgets(&self) -> Result<BudgetMap, StoreError> {
        Ok(self.budgets.borrow().clone())
    }

    fn save_budgets(&self, budgets: &BudgetMap) -> Result<(), StoreError> {
        self.gate()?;
        *self.budgets.borrow_mut() = budgets.clone();
        Ok(())
    }

    fn load_goals(&self) -> Result<GoalMap, StoreError> {
        Ok(self.goals.borrow().clone())
    }

    fn save_goals(&self, goals: &GoalMap) -> Result<(), StoreError> {
        self.gate()?;
        *self.goals.borrow_mut() = goals.clone();
        Ok(())
    }

    fn load_recurring(&self) -> Result<RecurringMap, StoreError> {
        Ok(self.recurring.borrow().clone())
    }

    fn save_recurring(&self, templates: &RecurringMap) -> Result<(), StoreError> {
        self.gate()?;
        *self.recurring.borrow_mut() = templates.clone();
        Ok(())
    }
}
