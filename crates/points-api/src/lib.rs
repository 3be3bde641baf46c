//! Points Ledger API
//!
//! REST boundary over the multi-tenant points ledger core.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                          POINTS LEDGER API                         │
//! │                                                                    │
//! │  ┌──────────────────────────────────────────────────────────────┐  │
//! │  │                          REST API                            │  │
//! │  │     {code, message, data} envelope | x-api-key | OpenAPI     │  │
//! │  └──────────────────────────────────────────────────────────────┘  │
//! │                                                                    │
//! │  ┌────────────────┐  ┌────────────────┐  ┌──────────────────────┐  │
//! │  │   /merchants   │  │ /points/rules  │  │ /points/transactions │  │
//! │  │ register, keys │  │  tenant CRUD   │  │  serialized appends  │  │
//! │  └────────────────┘  └────────────────┘  └──────────────────────┘  │
//! └────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;

use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use points_core::{LedgerService, SchemaProvisioner, TenantDirectory, TenantResolver};

pub use config::ApiConfig;
pub use models::*;

/// Shared service state: the core components, built once at startup.
pub struct AppState {
    /// Process configuration
    pub config: ApiConfig,
    /// Shared merchant catalogue
    pub directory: Arc<TenantDirectory>,
    /// Namespace registry
    pub provisioner: Arc<SchemaProvisioner>,
    /// Credential → namespace resolution
    pub resolver: TenantResolver,
    /// Serialized ledger appends
    pub ledger: LedgerService,
}

impl AppState {
    /// Wire up the core components.
    pub fn new(config: ApiConfig) -> Self {
        let directory = Arc::new(TenantDirectory::new());
        let provisioner = Arc::new(SchemaProvisioner::new());
        let resolver = TenantResolver::new(Arc::clone(&directory), Arc::clone(&provisioner));
        Self {
            config,
            directory,
            provisioner,
            resolver,
            ledger: LedgerService::new(),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Points Ledger API",
        version = "1.0.0",
        description = "Multi-tenant points ledger with per-merchant isolated storage",
        license(name = "Apache-2.0")
    ),
    paths(
        routes::health::health_check,
        routes::merchants::register_merchant,
        routes::merchants::list_merchants,
        routes::merchants::get_merchant,
        routes::merchants::create_api_key,
        routes::merchants::list_api_keys,
        routes::points::create_transaction,
        routes::points::list_transactions,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            RegisterMerchant, MerchantRegistered, MerchantOut,
            IssueApiKey, ApiKeyIssued, ApiKeyOut,
            RuleCreate, RuleUpdateBody, RuleOut,
            TransactionCreate, TransactionOut
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "merchants", description = "Merchant onboarding and credentials"),
        (name = "points", description = "Tenant-scoped rules and ledger")
    )
)]
pub struct ApiDoc;

/// Build the API router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api/v1", api_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(routes::health::ping))
        // Merchant-scoped onboarding (unauthenticated by design)
        .nest("/merchants", routes::merchants::router())
        // Tenant-scoped, gated by the x-api-key resolver
        .nest("/points", routes::points::router())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
