//! Tenant Directory
//!
//! The single shared catalogue mapping merchant identity to credentials.
//! Shared by all tenants; everything tenant-scoped lives in [`crate::store`].

use crate::model::{ApiKey, Merchant};
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use rand::{distributions::Alphanumeric, Rng};

/// Shared merchant catalogue and credential issuance.
pub struct TenantDirectory {
    merchants: RwLock<MerchantTable>,
    keys: RwLock<KeyTable>,
}

struct MerchantTable {
    rows: Vec<Merchant>,
    next_id: u64,
}

struct KeyTable {
    rows: Vec<ApiKey>,
    next_id: u64,
}

/// Directory errors.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Merchant name already registered; no partial state persists.
    #[error("merchant already exists: {0}")]
    DuplicateName(String),
    /// Unknown merchant id.
    #[error("merchant not found")]
    MerchantNotFound,
}

impl TenantDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            merchants: RwLock::new(MerchantTable {
                rows: Vec::new(),
                next_id: 1,
            }),
            keys: RwLock::new(KeyTable {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Register a merchant. Name uniqueness is checked and the row inserted
    /// under one write lock, so a duplicate attempt fails with no side
    /// effects.
    pub fn register(&self, name: &str) -> Result<Merchant, DirectoryError> {
        let mut table = self.merchants.write();
        if table.rows.iter().any(|m| m.name == name) {
            return Err(DirectoryError::DuplicateName(name.to_string()));
        }
        let merchant = Merchant {
            id: table.next_id,
            name: name.to_string(),
            created_at: Utc::now(),
        };
        table.next_id += 1;
        table.rows.push(merchant.clone());
        tracing::info!(merchant_id = merchant.id, name = %merchant.name, "merchant registered");
        Ok(merchant)
    }

    /// Look up a merchant by id.
    pub fn get(&self, id: u64) -> Result<Merchant, DirectoryError> {
        self.merchants
            .read()
            .rows
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(DirectoryError::MerchantNotFound)
    }

    /// List all merchants.
    pub fn list(&self) -> Vec<Merchant> {
        self.merchants.read().rows.clone()
    }

    /// Issue a credential for a merchant. `ttl_days` counts from now; a
    /// non-positive value yields an already-expired key, `None` a key that
    /// never expires. TTLs beyond the datetime range saturate (see
    /// [`expiry_for`]) rather than fail, since the value arrives from an
    /// unauthenticated request body. The only side effect is storing the
    /// credential.
    pub fn issue_key(
        &self,
        merchant_id: u64,
        ttl_days: Option<i64>,
    ) -> Result<ApiKey, DirectoryError> {
        self.get(merchant_id)?;

        let now = Utc::now();
        let mut keys = self.keys.write();
        let token = loop {
            let candidate = generate_token();
            if !keys.rows.iter().any(|k| k.api_key == candidate) {
                break candidate;
            }
        };
        let key = ApiKey {
            id: keys.next_id,
            merchant_id,
            api_key: token,
            expires_at: ttl_days.and_then(|d| expiry_for(now, d)),
            scope: None,
            is_active: true,
            created_at: now,
        };
        keys.next_id += 1;
        keys.rows.push(key.clone());
        tracing::info!(merchant_id, key_id = key.id, "api key issued");
        Ok(key)
    }

    /// Look up a credential by its token.
    pub fn find_key(&self, token: &str) -> Option<ApiKey> {
        self.keys
            .read()
            .rows
            .iter()
            .find(|k| k.api_key == token)
            .cloned()
    }

    /// List all credentials issued to a merchant.
    pub fn list_keys(&self, merchant_id: u64) -> Vec<ApiKey> {
        self.keys
            .read()
            .rows
            .iter()
            .filter(|k| k.merchant_id == merchant_id)
            .cloned()
            .collect()
    }

    /// Number of registered merchants.
    pub fn count(&self) -> usize {
        self.merchants.read().rows.len()
    }
}

impl Default for TenantDirectory {
    fn default() -> Self {
        Self::new()
    }
}

/// Expiry instant for a TTL in days, saturating at the representable range:
/// a TTL too large for the datetime type never expires, one too negative is
/// long expired. Never panics, whatever `ttl_days` holds.
fn expiry_for(now: DateTime<Utc>, ttl_days: i64) -> Option<DateTime<Utc>> {
    match Duration::try_days(ttl_days).and_then(|d| now.checked_add_signed(d)) {
        Some(at) => Some(at),
        None if ttl_days > 0 => None,
        None => Some(DateTime::<Utc>::MIN_UTC),
    }
}

fn generate_token() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    format!("pk_live_{suffix}")
}
