//! Ledger Service
//!
//! The serialized append. A fixed table of mutex shards plays the role of a
//! key-addressable advisory lock: the shard for (namespace, uid, rule) is
//! held across the read-latest-balance → compute → insert window, so
//! concurrent appends for the same key are strictly ordered while appends
//! for different keys proceed in parallel. A hash collision between two keys
//! only over-serializes them, which is harmless.

use crate::model::Transaction;
use crate::sort::{self, SortKey};
use crate::store::TenantStore;
use parking_lot::Mutex;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const LOCK_SHARDS: usize = 1024;

/// Append-only transaction log with serialized balance computation.
pub struct LedgerService {
    locks: Vec<Mutex<()>>,
}

impl LedgerService {
    /// Build the shard table. One instance serves all namespaces; the
    /// namespace is part of the lock key.
    pub fn new() -> Self {
        Self {
            locks: (0..LOCK_SHARDS).map(|_| Mutex::new(())).collect(),
        }
    }

    /// Stable fold of (namespace, uid, rule) into the shard table.
    fn lock_index(namespace: &str, uid: &str, point_rule_id: u64) -> usize {
        let mut hasher = DefaultHasher::new();
        namespace.hash(&mut hasher);
        uid.hash(&mut hasher);
        point_rule_id.hash(&mut hasher);
        (hasher.finish() % LOCK_SHARDS as u64) as usize
    }

    /// Append a transaction, preserving the running-balance invariant.
    ///
    /// The shard guard is held for the whole read-modify-write and released
    /// by RAII on every exit path, so a failed append never leaves the key
    /// locked nor a partial row visible.
    pub fn append(
        &self,
        store: &TenantStore,
        namespace: &str,
        uid: &str,
        point_rule_id: u64,
        amount: f64,
        detail: Option<serde_json::Value>,
    ) -> Transaction {
        let _guard = self.locks[Self::lock_index(namespace, uid, point_rule_id)].lock();

        let last_balance = store.latest_balance(uid, point_rule_id).unwrap_or(0.0);
        let balance = last_balance + amount;
        store.push_transaction(
            uid,
            point_rule_id,
            amount,
            balance,
            detail.unwrap_or_else(|| serde_json::Value::Object(Default::default())),
        )
    }

    /// Read-only listing. Rows are immutable once committed, so no locking
    /// beyond the table snapshot.
    pub fn list(&self, store: &TenantStore, keys: &[SortKey]) -> Vec<Transaction> {
        let mut rows = store.transactions();
        sort::apply(&mut rows, keys);
        rows
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::parse;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Walk rows in id order and check the running-balance invariant for
    /// every (uid, rule) key.
    fn assert_invariant(rows: &[Transaction]) {
        let mut rows = rows.to_vec();
        rows.sort_by_key(|t| t.id);
        let mut running: HashMap<(String, u64), f64> = HashMap::new();
        for tx in rows {
            let entry = running.entry((tx.uid.clone(), tx.point_rule_id)).or_insert(0.0);
            *entry += tx.amount;
            assert_eq!(tx.balance, *entry, "balance mismatch at tx {}", tx.id);
        }
    }

    #[test]
    fn test_sequential_balances() {
        let ledger = LedgerService::new();
        let store = TenantStore::new();

        let first = ledger.append(&store, "merchant_1", "u1", 1, 10.0, None);
        let second = ledger.append(&store, "merchant_1", "u1", 1, -3.0, None);

        assert_eq!(first.balance, 10.0);
        assert_eq!(second.balance, 7.0);
        assert!(second.id > first.id);
        assert_invariant(&store.transactions());
    }

    #[test]
    fn test_first_append_balance_equals_amount() {
        let ledger = LedgerService::new();
        let store = TenantStore::new();
        let tx = ledger.append(&store, "merchant_1", "u1", 1, -2.5, None);
        assert_eq!(tx.balance, -2.5);
    }

    #[test]
    fn test_detail_defaults_to_empty_object() {
        let ledger = LedgerService::new();
        let store = TenantStore::new();

        let bare = ledger.append(&store, "merchant_1", "u1", 1, 1.0, None);
        assert_eq!(bare.detail, serde_json::json!({}));

        let tagged = ledger.append(
            &store,
            "merchant_1",
            "u1",
            1,
            1.0,
            Some(serde_json::json!({"order": "A-17"})),
        );
        assert_eq!(tagged.detail["order"], "A-17");
    }

    #[test]
    fn test_keys_are_independent() {
        let ledger = LedgerService::new();
        let store = TenantStore::new();

        ledger.append(&store, "merchant_1", "u1", 1, 10.0, None);
        let other_rule = ledger.append(&store, "merchant_1", "u1", 2, 5.0, None);
        let other_user = ledger.append(&store, "merchant_1", "u2", 1, 3.0, None);

        // Each key starts from its own zero base.
        assert_eq!(other_rule.balance, 5.0);
        assert_eq!(other_user.balance, 3.0);
        assert_invariant(&store.transactions());
    }

    #[test]
    fn test_concurrent_same_key_appends() {
        let ledger = Arc::new(LedgerService::new());
        let store = Arc::new(TenantStore::new());

        // Two racing appends of 5 from balance 0: the invariant demands
        // final balances {5, 10}, never {5, 5} or {10, 10}.
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    ledger.append(&store, "merchant_1", "u1", 1, 5.0, None);
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let mut balances: Vec<f64> = store.transactions().iter().map(|t| t.balance).collect();
        balances.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(balances, vec![5.0, 10.0]);
        assert_invariant(&store.transactions());
    }

    #[test]
    fn test_sustained_contention() {
        let ledger = Arc::new(LedgerService::new());
        let store = Arc::new(TenantStore::new());

        // 4 writers on the same key, 2 on a second key, all interleaving.
        let mut handles = Vec::new();
        for _ in 0..4 {
            let ledger = Arc::clone(&ledger);
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    ledger.append(&store, "merchant_1", "hot", 1, 1.0, None);
                }
            }));
        }
        for _ in 0..2 {
            let ledger = Arc::clone(&ledger);
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    ledger.append(&store, "merchant_1", "cold", 7, 2.0, None);
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        let rows = store.transactions();
        assert_eq!(rows.len(), 600);
        assert_invariant(&rows);
        assert_eq!(store.latest_balance("hot", 1), Some(400.0));
        assert_eq!(store.latest_balance("cold", 7), Some(400.0));
    }

    #[test]
    fn test_list_sorted() {
        let ledger = LedgerService::new();
        let store = TenantStore::new();

        ledger.append(&store, "merchant_1", "b", 1, 1.0, None);
        ledger.append(&store, "merchant_1", "a", 1, 1.0, None);
        ledger.append(&store, "merchant_1", "a", 2, 1.0, None);

        let rows = ledger.list(&store, &parse("-id,uid"));
        let ids: Vec<u64> = rows.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        // Unknown and duplicate tokens change nothing.
        let same = ledger.list(&store, &parse("-id,uid,-id,bogus"));
        let same_ids: Vec<u64> = same.iter().map(|t| t.id).collect();
        assert_eq!(same_ids, ids);

        // Empty spec keeps insertion order.
        let default_order = ledger.list(&store, &parse(""));
        let default_ids: Vec<u64> = default_order.iter().map(|t| t.id).collect();
        assert_eq!(default_ids, vec![1, 2, 3]);

        // uid ties broken by the second key.
        let by_uid = ledger.list(&store, &parse("uid,point_rule_id"));
        let pairs: Vec<(String, u64)> = by_uid
            .iter()
            .map(|t| (t.uid.clone(), t.point_rule_id))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), 1),
                ("a".to_string(), 2),
                ("b".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_lock_index_deterministic() {
        let a = LedgerService::lock_index("merchant_1", "u1", 1);
        let b = LedgerService::lock_index("merchant_1", "u1", 1);
        assert_eq!(a, b);
        assert!(a < LOCK_SHARDS);
    }
}
