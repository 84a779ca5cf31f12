//! Handler for `/calculator/rate-card`.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use sitequote_core::rate_card;

use crate::error::AppResult;
use crate::state::AppState;

/// Request body for `POST /calculator/rate-card`.
#[derive(Debug, Deserialize)]
pub struct RateCardRequest {
    pub client_name: String,
    pub region: String,
    pub product_sor: String,
    pub sor_code: Option<String>,
    pub sor_description: Option<String>,
    /// Risk uplift percentage in `[0, 100]`. Defaults to 0.
    #[serde(default)]
    pub risk_uplift: f64,
    /// Selected additional-support items, each priced at the configured
    /// per-item cost.
    #[serde(default)]
    pub additional_support: Vec<String>,
}

/// POST /api/v1/calculator/rate-card
///
/// Price a rate card from the configured base amount, the selected support
/// items, the risk uplift, and the configured tax rate.
pub async fn rate_card(
    State(state): State<AppState>,
    Json(input): Json<RateCardRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let quote = rate_card::calculate(
        input.risk_uplift,
        input.additional_support.len(),
        &state.config.rate_card,
    )?;

    Ok(Json(serde_json::json!({
        "base_amount": quote.base_amount,
        "support_amount": quote.support_amount,
        "subtotal": quote.subtotal,
        "total_amount": quote.total_amount,
        "breakdown": {
            "base_rate": quote.base_amount,
            "support_items": quote.support_amount,
            "risk_uplift_percent": quote.risk_uplift,
            "risk_multiplier": quote.risk_multiplier,
            "tax_rate": quote.tax_rate,
            "tax_amount": quote.tax_amount,
            "sor_code": input.sor_code,
            "sor_description": input.sor_description,
        },
    })))
}
