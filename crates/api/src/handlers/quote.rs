//! Handlers for the `/quotes` resource and its items.
//!
//! Totals are derived fields: the repository recomputes them inside the
//! same transaction as every item mutation, so handlers never accept
//! subtotal/tax/total from the client.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use sitequote_core::error::CoreError;
use sitequote_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use sitequote_core::types::DbId;
use sitequote_db::models::quote::{
    CreateQuote, CreateQuoteItem, Quote, QuoteDetail, QuoteFilters, QuoteItem, UpdateQuote,
    UpdateQuoteItem,
};
use sitequote_db::repositories::{AuditLogRepo, QuoteRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::state::AppState;

/// GET /api/v1/quotes
pub async fn list(
    State(state): State<AppState>,
    Query(filters): Query<QuoteFilters>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Vec<Quote>>> {
    let limit = clamp_limit(page.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(page.skip);
    let quotes = QuoteRepo::list(&state.pool, &filters, limit, offset).await?;
    Ok(Json(quotes))
}

/// GET /api/v1/quotes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<QuoteDetail>> {
    let detail = QuoteRepo::detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Quote", id }))?;
    Ok(Json(detail))
}

/// POST /api/v1/quotes
///
/// Requires authentication; the creator is taken from the token. A duplicate
/// quote number maps to 409.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateQuote>,
) -> AppResult<(StatusCode, Json<QuoteDetail>)> {
    validate_tax_rate(input.tax_rate)?;
    for item in &input.items {
        validate_item(item.quantity, Some(item.unit_price))?;
    }

    let detail = QuoteRepo::create(&state.pool, &input, auth.user_id).await?;
    record_audit(
        &state,
        Some(auth.user_id),
        "quote.created",
        detail.quote.id,
        None,
        Some(&detail.quote),
    )
    .await;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT /api/v1/quotes/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateQuote>,
) -> AppResult<Json<Quote>> {
    validate_tax_rate(input.tax_rate)?;

    let before = QuoteRepo::find_by_id(&state.pool, id).await?;
    let quote = QuoteRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Quote", id }))?;

    record_audit(
        &state,
        Some(auth.user_id),
        "quote.updated",
        id,
        before.as_ref(),
        Some(&quote),
    )
    .await;
    Ok(Json(quote))
}

/// DELETE /api/v1/quotes/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let before = QuoteRepo::find_by_id(&state.pool, id).await?;
    let deleted = QuoteRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Quote", id }));
    }

    record_audit(
        &state,
        Some(auth.user_id),
        "quote.deleted",
        id,
        before.as_ref(),
        None,
    )
    .await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// GET /api/v1/quotes/{id}/items
pub async fn list_items(
    State(state): State<AppState>,
    Path(quote_id): Path<DbId>,
) -> AppResult<Json<Vec<QuoteItem>>> {
    if QuoteRepo::find_by_id(&state.pool, quote_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Quote",
            id: quote_id,
        }));
    }
    let items = QuoteRepo::list_items(&state.pool, quote_id).await?;
    Ok(Json(items))
}

/// POST /api/v1/quotes/{id}/items
pub async fn add_item(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(quote_id): Path<DbId>,
    Json(input): Json<CreateQuoteItem>,
) -> AppResult<(StatusCode, Json<QuoteItem>)> {
    validate_item(input.quantity, Some(input.unit_price))?;

    let item = QuoteRepo::add_item(&state.pool, quote_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Quote",
            id: quote_id,
        }))?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/v1/quotes/{id}/items/{item_id}
pub async fn update_item(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((quote_id, item_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateQuoteItem>,
) -> AppResult<Json<QuoteItem>> {
    validate_item(input.quantity, input.unit_price)?;

    let item = QuoteRepo::update_item(&state.pool, quote_id, item_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "QuoteItem",
            id: item_id,
        }))?;
    Ok(Json(item))
}

/// DELETE /api/v1/quotes/{id}/items/{item_id}
pub async fn delete_item(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((quote_id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = QuoteRepo::delete_item(&state.pool, quote_id, item_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "QuoteItem",
            id: item_id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn validate_tax_rate(tax_rate: Option<f64>) -> Result<(), AppError> {
    if let Some(rate) = tax_rate {
        if !(0.0..=100.0).contains(&rate) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "tax_rate must be between 0 and 100, got {rate}"
            ))));
        }
    }
    Ok(())
}

fn validate_item(quantity: Option<i32>, unit_price: Option<f64>) -> Result<(), AppError> {
    if quantity.is_some_and(|q| q <= 0) {
        return Err(AppError::Core(CoreError::Validation(
            "quantity must be positive".into(),
        )));
    }
    if unit_price.is_some_and(|p| p <= 0.0) {
        return Err(AppError::Core(CoreError::Validation(
            "unit_price must be positive".into(),
        )));
    }
    Ok(())
}

/// Append an audit entry; failures are logged, never surfaced to the caller.
async fn record_audit(
    state: &AppState,
    user_id: Option<DbId>,
    action: &str,
    quote_id: DbId,
    old: Option<&Quote>,
    new: Option<&Quote>,
) {
    let old_values = old.and_then(|q| serde_json::to_value(q).ok());
    let new_values = new.and_then(|q| serde_json::to_value(q).ok());
    if let Err(e) = AuditLogRepo::record(
        &state.pool,
        user_id,
        action,
        "quote",
        quote_id,
        old_values.as_ref(),
        new_values.as_ref(),
    )
    .await
    {
        tracing::warn!(error = %e, action, quote_id, "Failed to record audit entry");
    }
}
