//! Multi-Tenant Points Ledger Core
//!
//! Per-merchant isolated storage with serialized, balance-preserving appends.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        POINTS LEDGER CORE                           │
//! │                                                                     │
//! │  ┌──────────────────┐        ┌──────────────────────────────────┐  │
//! │  │ TENANT DIRECTORY │        │       SCHEMA PROVISIONER          │  │
//! │  │ merchants + keys │        │  merchant_1  merchant_2  ...      │  │
//! │  └────────┬─────────┘        └────────────────┬─────────────────┘  │
//! │           │                                   │                    │
//! │  ┌────────▼───────────────────────────────────▼─────────────────┐  │
//! │  │                      TENANT RESOLVER                          │  │
//! │  │     api key → merchant → namespace (request-scoped bind)      │  │
//! │  └────────────────────────────┬─────────────────────────────────┘  │
//! │                               │                                    │
//! │  ┌────────────────────────────▼─────────────────────────────────┐  │
//! │  │                       LEDGER SERVICE                          │  │
//! │  │   per-(uid, rule) advisory lock | read balance | append row   │  │
//! │  └──────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod directory;
pub mod ledger;
pub mod model;
pub mod provision;
pub mod resolver;
pub mod sort;
pub mod store;

pub use directory::{DirectoryError, TenantDirectory};
pub use ledger::LedgerService;
pub use model::{namespace_for, ApiKey, Merchant, PointRule, Transaction};
pub use provision::SchemaProvisioner;
pub use resolver::{ResolveError, TenantContext, TenantResolver};
pub use sort::{SortField, SortKey};
pub use store::{RuleUpdate, TenantStore};
