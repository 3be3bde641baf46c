//! Tenant-scoped point rule and transaction endpoints
//!
//! Everything here requires a valid `x-api-key`; the [`Tenant`] extractor
//! binds each request to its merchant's namespace before the handler runs.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::middleware::auth::Tenant;
use crate::models::*;
use crate::AppState;
use points_core::{sort, RuleUpdate};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rules", get(list_rules).post(create_rule))
        .route("/rules/:id", put(update_rule).delete(delete_rule))
        .route("/transactions", post(create_transaction).get(list_transactions))
}

pub async fn create_rule(
    Tenant(ctx): Tenant,
    Json(input): Json<RuleCreate>,
) -> Json<Envelope<RuleOut>> {
    let rule = ctx.store.create_rule(&input.name, input.rate, input.description);
    Json(Envelope::success("created", rule.into()))
}

pub async fn list_rules(Tenant(ctx): Tenant) -> Json<Envelope<Vec<RuleOut>>> {
    let rules = ctx.store.list_rules().into_iter().map(RuleOut::from).collect();
    Json(Envelope::success("success", rules))
}

pub async fn update_rule(
    Tenant(ctx): Tenant,
    Path(id): Path<u64>,
    Json(input): Json<RuleUpdateBody>,
) -> Result<Json<Envelope<RuleOut>>, ApiError> {
    let rule = ctx
        .store
        .update_rule(
            id,
            RuleUpdate {
                name: input.name,
                rate: input.rate,
                description: input.description,
            },
        )
        .ok_or(ApiError::NotFound("rule"))?;
    Ok(Json(Envelope::success("updated", rule.into())))
}

pub async fn delete_rule(
    Tenant(ctx): Tenant,
    Path(id): Path<u64>,
) -> Result<Json<Envelope<()>>, ApiError> {
    if !ctx.store.delete_rule(id) {
        return Err(ApiError::NotFound("rule"));
    }
    Ok(Json(Envelope::empty("deleted")))
}

/// Append a ledger transaction
#[utoipa::path(
    post,
    path = "/api/v1/points/transactions",
    request_body = TransactionCreate,
    responses(
        (status = 200, description = "Appended row with its running balance", body = TransactionOut),
        (status = 401, description = "Missing, invalid, or expired api key")
    ),
    tag = "points",
    security(("api_key" = []))
)]
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Tenant(ctx): Tenant,
    Json(input): Json<TransactionCreate>,
) -> Json<Envelope<TransactionOut>> {
    let tx = state.ledger.append(
        &ctx.store,
        &ctx.namespace,
        &input.uid,
        input.point_rule_id,
        input.amount,
        input.detail,
    );
    Json(Envelope::success("created", tx.into()))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    sort: Option<String>,
}

/// List ledger transactions
#[utoipa::path(
    get,
    path = "/api/v1/points/transactions",
    params(
        ("sort" = Option<String>, Query, description = "Comma-separated fields from {id, uid, point_rule_id}; `-` prefix for descending")
    ),
    responses(
        (status = 200, description = "Ledger rows", body = [TransactionOut]),
        (status = 401, description = "Missing, invalid, or expired api key")
    ),
    tag = "points",
    security(("api_key" = []))
)]
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Tenant(ctx): Tenant,
    Query(params): Query<ListParams>,
) -> Json<Envelope<Vec<TransactionOut>>> {
    let keys = sort::parse(params.sort.as_deref().unwrap_or(""));
    let rows = state
        .ledger
        .list(&ctx.store, &keys)
        .into_iter()
        .map(TransactionOut::from)
        .collect();
    Json(Envelope::success("success", rows))
}
