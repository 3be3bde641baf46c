//! Tenant Authentication
//!
//! Tenant-scoped routes take the [`Tenant`] extractor, which resolves the
//! `x-api-key` header through the core resolver. The resulting context is
//! request-scoped: two concurrent requests for different merchants each get
//! their own binding.

use crate::error::ApiError;
use crate::AppState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use points_core::TenantContext;
use std::sync::Arc;

/// Header carrying the credential.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Resolved tenant binding for the current request.
pub struct Tenant(pub TenantContext);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for Tenant {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;
        let ctx = state.resolver.resolve(token)?;
        Ok(Tenant(ctx))
    }
}
