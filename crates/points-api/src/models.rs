//! API Models

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use points_core::{ApiKey, Merchant, PointRule, Transaction};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unified response envelope: `code` is 0 on success and the HTTP status on
/// error; error responses carry no payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            code: 0,
            message: message.to_string(),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    pub fn empty(message: &str) -> Self {
        Self {
            code: 0,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn error(status: StatusCode, message: &str) -> Self {
        Self {
            code: status.as_u16(),
            message: message.to_string(),
            data: None,
        }
    }
}

// ============ Merchants ============

/// Merchant registration request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterMerchant {
    pub name: String,
}

/// Registration response payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MerchantRegistered {
    pub id: u64,
    pub name: String,
}

/// Merchant listing entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MerchantOut {
    pub id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Merchant> for MerchantOut {
    fn from(m: Merchant) -> Self {
        Self {
            id: m.id,
            name: m.name,
            created_at: m.created_at,
        }
    }
}

// ============ API Keys ============

/// Credential issuance request
#[derive(Debug, Deserialize, ToSchema)]
pub struct IssueApiKey {
    /// Days until expiry; server default when omitted
    pub expires_in_days: Option<i64>,
}

/// Issuance response: the one place the full token is returned
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiKeyIssued {
    pub api_key: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl From<ApiKey> for ApiKeyIssued {
    fn from(k: ApiKey) -> Self {
        Self {
            api_key: k.api_key,
            expires_at: k.expires_at,
            is_active: k.is_active,
        }
    }
}

/// Credential listing entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiKeyOut {
    pub id: u64,
    pub api_key: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub scope: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ApiKey> for ApiKeyOut {
    fn from(k: ApiKey) -> Self {
        Self {
            id: k.id,
            api_key: k.api_key,
            expires_at: k.expires_at,
            is_active: k.is_active,
            scope: k.scope,
            created_at: k.created_at,
        }
    }
}

// ============ Point Rules ============

/// Rule creation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RuleCreate {
    pub name: String,
    pub rate: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial rule update
#[derive(Debug, Deserialize, ToSchema)]
pub struct RuleUpdateBody {
    pub name: Option<String>,
    pub rate: Option<f64>,
    pub description: Option<String>,
}

/// Rule response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RuleOut {
    pub id: u64,
    pub name: String,
    pub rate: f64,
    pub description: Option<String>,
}

impl From<PointRule> for RuleOut {
    fn from(r: PointRule) -> Self {
        Self {
            id: r.id,
            name: r.name,
            rate: r.rate,
            description: r.description,
        }
    }
}

// ============ Transactions ============

/// Append request
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransactionCreate {
    pub uid: String,
    pub point_rule_id: u64,
    pub amount: f64,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub detail: Option<serde_json::Value>,
}

/// Ledger row response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionOut {
    pub id: u64,
    pub uid: String,
    pub point_rule_id: u64,
    pub amount: f64,
    pub balance: f64,
    #[schema(value_type = Object)]
    pub detail: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionOut {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            uid: t.uid,
            point_rule_id: t.point_rule_id,
            amount: t.amount,
            balance: t.balance,
            detail: t.detail,
            created_at: t.created_at,
        }
    }
}
