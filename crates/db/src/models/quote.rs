//! Quote and quote item entity models and DTOs.

use serde::{Deserialize, Serialize};
use sitequote_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::enums::{QuoteItemType, QuoteStatus};

/// A row from the `quotes` table.
///
/// `subtotal` / `tax_amount` / `total_amount` are derived from the quote's
/// items and recomputed by the repository after every item mutation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quote {
    pub id: DbId,
    pub quote_number: String,
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_address: Option<String>,
    pub project_name: String,
    pub project_description: Option<String>,
    pub sor_code: Option<String>,
    pub sor_description: Option<String>,
    pub region: Option<String>,
    pub status: QuoteStatus,
    pub subtotal: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    pub valid_until: Option<Timestamp>,
    pub notes: Option<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `quote_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuoteItem {
    pub id: DbId,
    pub quote_id: DbId,
    pub item_type: QuoteItemType,
    pub item_name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_price: f64,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// A quote together with its items, ordered by `sort_order`.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteDetail {
    #[serde(flatten)]
    pub quote: Quote,
    pub items: Vec<QuoteItem>,
}

/// DTO for creating a new quote, optionally with initial items.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuote {
    /// Server-generated (`Q-YYYY-NNNN`) when omitted.
    pub quote_number: Option<String>,
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_address: Option<String>,
    pub project_name: String,
    pub project_description: Option<String>,
    pub sor_code: Option<String>,
    pub sor_description: Option<String>,
    pub region: Option<String>,
    /// Defaults to `draft` if omitted.
    pub status: Option<QuoteStatus>,
    /// Percentage applied to the item subtotal. Defaults to 0.
    pub tax_rate: Option<f64>,
    pub valid_until: Option<Timestamp>,
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<CreateQuoteItem>,
}

/// DTO for updating an existing quote. All fields are optional. Totals are
/// not accepted from the client; changing `tax_rate` triggers a recompute.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuote {
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_address: Option<String>,
    pub project_name: Option<String>,
    pub project_description: Option<String>,
    pub sor_code: Option<String>,
    pub sor_description: Option<String>,
    pub region: Option<String>,
    pub status: Option<QuoteStatus>,
    pub tax_rate: Option<f64>,
    pub valid_until: Option<Timestamp>,
    pub notes: Option<String>,
}

/// DTO for adding an item to a quote.
///
/// `total_price` is computed server-side as `quantity x unit_price`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuoteItem {
    pub item_type: QuoteItemType,
    pub item_name: String,
    pub description: Option<String>,
    /// Defaults to 1 if omitted.
    pub quantity: Option<i32>,
    pub unit_price: f64,
    /// Display ordering; defaults to 0.
    pub sort_order: Option<i32>,
}

/// DTO for updating a quote item. All fields are optional; the line total is
/// recomputed from the resulting quantity and unit price.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuoteItem {
    pub item_type: Option<QuoteItemType>,
    pub item_name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub unit_price: Option<f64>,
    pub sort_order: Option<i32>,
}

/// Optional filters for quote listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteFilters {
    pub search: Option<String>,
    pub status: Option<QuoteStatus>,
}
