//! Per-Tenant Entity Tables

use crate::model::{PointRule, Transaction};
use chrono::Utc;
use parking_lot::RwLock;

/// One merchant's isolated tables: point rules and the append-only ledger.
///
/// Every merchant gets an independent instance; nothing in here is ever
/// shared across namespaces. Row IDs are monotonic per instance and assigned
/// under the table's write lock, so id order equals insertion order.
pub struct TenantStore {
    rules: RwLock<RuleTable>,
    ledger: RwLock<LedgerTable>,
}

struct RuleTable {
    rows: Vec<PointRule>,
    next_id: u64,
}

struct LedgerTable {
    rows: Vec<Transaction>,
    next_id: u64,
}

/// Partial update for a point rule.
#[derive(Debug, Clone, Default)]
pub struct RuleUpdate {
    /// New name, if set
    pub name: Option<String>,
    /// New rate, if set
    pub rate: Option<f64>,
    /// New description, if set
    pub description: Option<String>,
}

impl TenantStore {
    /// Create empty tables for a freshly provisioned namespace.
    pub fn new() -> Self {
        Self {
            rules: RwLock::new(RuleTable {
                rows: Vec::new(),
                next_id: 1,
            }),
            ledger: RwLock::new(LedgerTable {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a point rule.
    pub fn create_rule(&self, name: &str, rate: f64, description: Option<String>) -> PointRule {
        let mut table = self.rules.write();
        let rule = PointRule {
            id: table.next_id,
            name: name.to_string(),
            rate,
            description,
        };
        table.next_id += 1;
        table.rows.push(rule.clone());
        rule
    }

    /// List all point rules.
    pub fn list_rules(&self) -> Vec<PointRule> {
        self.rules.read().rows.clone()
    }

    /// Apply a partial update; `None` if the rule does not exist.
    pub fn update_rule(&self, id: u64, update: RuleUpdate) -> Option<PointRule> {
        let mut table = self.rules.write();
        let rule = table.rows.iter_mut().find(|r| r.id == id)?;
        if let Some(name) = update.name {
            rule.name = name;
        }
        if let Some(rate) = update.rate {
            rule.rate = rate;
        }
        if let Some(description) = update.description {
            rule.description = Some(description);
        }
        Some(rule.clone())
    }

    /// Delete a rule; `false` if it does not exist.
    pub fn delete_rule(&self, id: u64) -> bool {
        let mut table = self.rules.write();
        let before = table.rows.len();
        table.rows.retain(|r| r.id != id);
        table.rows.len() != before
    }

    /// Balance of the most recent transaction for (uid, rule), if any.
    ///
    /// Callers appending must hold the per-key ledger lock across this read
    /// and the matching [`push_transaction`](Self::push_transaction).
    pub fn latest_balance(&self, uid: &str, point_rule_id: u64) -> Option<f64> {
        self.ledger
            .read()
            .rows
            .iter()
            .rev()
            .find(|t| t.uid == uid && t.point_rule_id == point_rule_id)
            .map(|t| t.balance)
    }

    /// Append a row with a precomputed balance and return it with its
    /// assigned id and timestamp.
    pub fn push_transaction(
        &self,
        uid: &str,
        point_rule_id: u64,
        amount: f64,
        balance: f64,
        detail: serde_json::Value,
    ) -> Transaction {
        let mut table = self.ledger.write();
        let tx = Transaction {
            id: table.next_id,
            uid: uid.to_string(),
            point_rule_id,
            amount,
            balance,
            detail,
            created_at: Utc::now(),
        };
        table.next_id += 1;
        table.rows.push(tx.clone());
        tx
    }

    /// Snapshot of the full ledger in insertion (id) order.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.ledger.read().rows.clone()
    }

    /// Number of ledger rows.
    pub fn transaction_count(&self) -> usize {
        self.ledger.read().rows.len()
    }
}

impl Default for TenantStore {
    fn default() -> Self {
        Self::new()
    }
}
