//! Schema Provisioner
//!
//! Creates the isolated storage namespace and tenant tables for a merchant.
//! Runs once at onboarding, but must be safe under at-least-once retry:
//! registration and provisioning are two steps, and the merchant row may
//! already be durable when provisioning is retried.

use crate::model::namespace_for;
use crate::store::TenantStore;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Namespace registry with create-if-absent provisioning.
///
/// DashMap locks per entry, so provisioning merchant A never stalls lookups
/// or appends for merchant B.
pub struct SchemaProvisioner {
    namespaces: DashMap<String, Arc<TenantStore>>,
}

impl SchemaProvisioner {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            namespaces: DashMap::new(),
        }
    }

    /// Create the merchant's namespace and tenant tables. Idempotent: a
    /// namespace that already exists is left untouched and its name
    /// returned.
    pub fn provision(&self, merchant_id: u64) -> String {
        let namespace = namespace_for(merchant_id);
        match self.namespaces.entry(namespace.clone()) {
            Entry::Occupied(_) => {}
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(TenantStore::new()));
                tracing::info!(merchant_id, namespace = %namespace, "namespace provisioned");
            }
        }
        namespace
    }

    /// Fetch a namespace's tables. `None` means the merchant is registered
    /// but not provisioned ("tenant not ready"), which callers must surface
    /// distinctly from an unknown merchant.
    pub fn lookup(&self, namespace: &str) -> Option<Arc<TenantStore>> {
        self.namespaces.get(namespace).map(|e| Arc::clone(e.value()))
    }

    /// Whether a merchant's namespace exists.
    pub fn is_provisioned(&self, merchant_id: u64) -> bool {
        self.namespaces.contains_key(&namespace_for(merchant_id))
    }

    /// Number of provisioned namespaces.
    pub fn count(&self) -> usize {
        self.namespaces.len()
    }
}

impl Default for SchemaProvisioner {
    fn default() -> Self {
        Self::new()
    }
}
