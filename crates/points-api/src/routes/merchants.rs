//! Merchant onboarding and credential endpoints

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::*;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register_merchant))
        .route("/", get(list_merchants))
        .route("/:id", get(get_merchant))
        .route("/:id/apikey", post(create_api_key))
        .route("/:id/apikeys", get(list_api_keys))
}

/// Register a merchant and provision its namespace
#[utoipa::path(
    post,
    path = "/api/v1/merchants/register",
    request_body = RegisterMerchant,
    responses(
        (status = 200, description = "Merchant registered", body = MerchantRegistered),
        (status = 400, description = "Merchant name already registered")
    ),
    tag = "merchants"
)]
pub async fn register_merchant(
    State(state): State<Arc<AppState>>,
    Json(input): Json<RegisterMerchant>,
) -> Result<Json<Envelope<MerchantRegistered>>, ApiError> {
    // Step 1: durable merchant row. A duplicate fails here with nothing
    // else touched.
    let merchant = state.directory.register(&input.name)?;

    // Step 2: namespace + tenant tables. Idempotent, so a retry of a
    // half-finished registration converges.
    state.provisioner.provision(merchant.id);

    Ok(Json(Envelope::success(
        "Merchant registered",
        MerchantRegistered {
            id: merchant.id,
            name: merchant.name,
        },
    )))
}

/// List all merchants
#[utoipa::path(
    get,
    path = "/api/v1/merchants/",
    responses(
        (status = 200, description = "All registered merchants", body = [MerchantOut])
    ),
    tag = "merchants"
)]
pub async fn list_merchants(
    State(state): State<Arc<AppState>>,
) -> Json<Envelope<Vec<MerchantOut>>> {
    let merchants = state
        .directory
        .list()
        .into_iter()
        .map(MerchantOut::from)
        .collect();
    Json(Envelope::success("success", merchants))
}

/// Get merchant by id
#[utoipa::path(
    get,
    path = "/api/v1/merchants/{id}",
    params(("id" = u64, Path, description = "Merchant ID")),
    responses(
        (status = 200, description = "Merchant details", body = MerchantOut),
        (status = 404, description = "Merchant not found")
    ),
    tag = "merchants"
)]
pub async fn get_merchant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Envelope<MerchantOut>>, ApiError> {
    let merchant = state.directory.get(id)?;
    Ok(Json(Envelope::success("success", merchant.into())))
}

/// Issue an API key for a merchant
#[utoipa::path(
    post,
    path = "/api/v1/merchants/{id}/apikey",
    params(("id" = u64, Path, description = "Merchant ID")),
    request_body = IssueApiKey,
    responses(
        (status = 200, description = "Key created; the token is only returned here", body = ApiKeyIssued),
        (status = 404, description = "Merchant not found")
    ),
    tag = "merchants"
)]
pub async fn create_api_key(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(input): Json<IssueApiKey>,
) -> Result<Json<Envelope<ApiKeyIssued>>, ApiError> {
    let ttl = input
        .expires_in_days
        .unwrap_or(state.config.default_key_ttl_days);
    let key = state.directory.issue_key(id, Some(ttl))?;
    Ok(Json(Envelope::success("API key created", key.into())))
}

/// List a merchant's API keys
#[utoipa::path(
    get,
    path = "/api/v1/merchants/{id}/apikeys",
    params(("id" = u64, Path, description = "Merchant ID")),
    responses(
        (status = 200, description = "All keys issued to the merchant", body = [ApiKeyOut]),
        (status = 404, description = "Merchant not found")
    ),
    tag = "merchants"
)]
pub async fn list_api_keys(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Envelope<Vec<ApiKeyOut>>>, ApiError> {
    state.directory.get(id)?;
    let keys = state
        .directory
        .list_keys(id)
        .into_iter()
        .map(ApiKeyOut::from)
        .collect();
    Ok(Json(Envelope::success("success", keys)))
}
