//! Tenant Resolver
//!
//! Turns a presented credential into a request-scoped binding to the owning
//! merchant's namespace. Every tenant-scoped operation passes through here.

use crate::directory::TenantDirectory;
use crate::model::{namespace_for, Merchant};
use crate::provision::SchemaProvisioner;
use crate::store::TenantStore;
use chrono::Utc;
use std::sync::Arc;

/// Request-scoped binding of one operation to one merchant's namespace.
///
/// Built fresh for every resolve; never cached or shared across requests,
/// since concurrent requests may belong to different merchants.
pub struct TenantContext {
    /// The resolved merchant
    pub merchant: Merchant,
    /// The merchant's namespace name
    pub namespace: String,
    /// The namespace's tables
    pub store: Arc<TenantStore>,
}

/// Resolution failures.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Credential unknown, inactive, or expired. Deliberately does not say
    /// which.
    #[error("invalid or expired api key")]
    Unauthorized,
    /// Merchant registered but its namespace was never provisioned.
    #[error("tenant not ready")]
    NotReady,
}

/// Credential → namespace resolution.
pub struct TenantResolver {
    directory: Arc<TenantDirectory>,
    provisioner: Arc<SchemaProvisioner>,
}

impl TenantResolver {
    /// Build a resolver over the shared directory and namespace registry.
    pub fn new(directory: Arc<TenantDirectory>, provisioner: Arc<SchemaProvisioner>) -> Self {
        Self {
            directory,
            provisioner,
        }
    }

    /// Resolve a token to a tenant context. Expiry is compared against
    /// `Utc::now()`, the same basis every timestamp in the system uses.
    pub fn resolve(&self, token: &str) -> Result<TenantContext, ResolveError> {
        let key = self
            .directory
            .find_key(token)
            .ok_or(ResolveError::Unauthorized)?;
        if !key.is_valid_at(Utc::now()) {
            return Err(ResolveError::Unauthorized);
        }
        let merchant = self
            .directory
            .get(key.merchant_id)
            .map_err(|_| ResolveError::Unauthorized)?;

        let namespace = namespace_for(merchant.id);
        let store = self.provisioner.lookup(&namespace).ok_or_else(|| {
            tracing::warn!(merchant_id = merchant.id, "merchant registered but not provisioned");
            ResolveError::NotReady
        })?;

        Ok(TenantContext {
            merchant,
            namespace,
            store,
        })
    }
}
