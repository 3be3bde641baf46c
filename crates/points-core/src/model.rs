//! Ledger Data Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Merchant identity record. Created at registration, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Merchant {
    /// Unique merchant ID
    pub id: u64,
    /// Unique display name
    pub name: String,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

/// Bearer credential bound to exactly one merchant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    /// Key ID
    pub id: u64,
    /// Owning merchant
    pub merchant_id: u64,
    /// Opaque random token, globally unique
    pub api_key: String,
    /// Expiry; `None` means the key never expires
    pub expires_at: Option<DateTime<Utc>>,
    /// Optional scope label
    pub scope: Option<String>,
    /// Deactivated keys are unusable regardless of expiry
    pub is_active: bool,
    /// Issuance time
    pub created_at: DateTime<Utc>,
}

impl ApiKey {
    /// Usable at `now`: active and not past expiry. All expiry comparisons
    /// in the system go through this single UTC basis.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at.map_or(true, |exp| exp > now)
    }
}

/// Tenant-scoped earning rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointRule {
    /// Rule ID, monotonic per namespace
    pub id: u64,
    /// Rule name
    pub name: String,
    /// Points per unit
    pub rate: f64,
    /// Free-form description
    pub description: Option<String>,
}

/// Append-only ledger row. Immutable once written, never deleted.
///
/// Invariant: for consecutive rows of the same (uid, point_rule_id) key in
/// id order, `balance == previous.balance + amount`; the first row of a key
/// has `balance == amount`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Row ID, monotonic per namespace
    pub id: u64,
    /// Opaque end-user identifier
    pub uid: String,
    /// Referenced rule; validity is not enforced by the ledger
    pub point_rule_id: u64,
    /// Signed point delta
    pub amount: f64,
    /// Running balance for this (uid, rule) key after the append
    pub balance: f64,
    /// Free-form structured payload, `{}` when absent
    pub detail: serde_json::Value,
    /// Append time
    pub created_at: DateTime<Utc>,
}

/// Deterministic namespace name for a merchant's isolated storage region.
pub fn namespace_for(merchant_id: u64) -> String {
    format!("merchant_{merchant_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_namespace_naming() {
        assert_eq!(namespace_for(7), "merchant_7");
        assert_eq!(namespace_for(7), namespace_for(7));
    }

    #[test]
    fn test_key_validity() {
        let now = Utc::now();
        let key = ApiKey {
            id: 1,
            merchant_id: 1,
            api_key: "pk_live_test".into(),
            expires_at: Some(now + Duration::days(30)),
            scope: None,
            is_active: true,
            created_at: now,
        };
        assert!(key.is_valid_at(now));

        let expired = ApiKey {
            expires_at: Some(now - Duration::seconds(1)),
            ..key.clone()
        };
        assert!(!expired.is_valid_at(now));

        let inactive = ApiKey {
            is_active: false,
            ..key.clone()
        };
        assert!(!inactive.is_valid_at(now));

        let perpetual = ApiKey {
            expires_at: None,
            ..key
        };
        assert!(perpetual.is_valid_at(now));
    }
}
