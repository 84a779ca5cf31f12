//! Repository for the `quotes` and `quote_items` tables.
//!
//! Quote totals are derived fields: every item mutation runs in a
//! transaction that recomputes subtotal, tax, and grand total before
//! committing, so the stored quote row never disagrees with its items.

use chrono::Datelike;
use sitequote_core::pricing::{line_total, QuoteTotals};
use sitequote_core::search::ilike_pattern;
use sitequote_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::quote::{
    CreateQuote, CreateQuoteItem, Quote, QuoteDetail, QuoteFilters, QuoteItem, UpdateQuote,
    UpdateQuoteItem,
};

/// Column list for `quotes` queries.
const COLUMNS: &str = "id, quote_number, client_name, client_email, client_phone, \
     client_address, project_name, project_description, sor_code, sor_description, region, \
     status, subtotal, tax_rate, tax_amount, total_amount, valid_until, notes, created_by, \
     created_at, updated_at";

/// Column list for `quote_items` queries.
const ITEM_COLUMNS: &str = "id, quote_id, item_type, item_name, description, quantity, \
     unit_price, total_price, sort_order, created_at";

/// Provides CRUD operations and total recomputation for quotes.
pub struct QuoteRepo;

impl QuoteRepo {
    /// Create a quote (and any initial items) in one transaction.
    ///
    /// Generates a `Q-YYYY-NNNN` quote number when the input does not carry
    /// one, then computes the totals from the inserted items.
    pub async fn create(
        pool: &PgPool,
        input: &CreateQuote,
        created_by: DbId,
    ) -> Result<QuoteDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let quote_number = match &input.quote_number {
            Some(number) => number.clone(),
            None => Self::next_quote_number(&mut tx).await?,
        };

        let query = format!(
            "INSERT INTO quotes
                (quote_number, client_name, client_email, client_phone, client_address,
                 project_name, project_description, sor_code, sor_description, region,
                 status, tax_rate, valid_until, notes, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                     COALESCE($11, 'draft'), COALESCE($12, 0), $13, $14, $15)
             RETURNING {COLUMNS}"
        );
        let quote = sqlx::query_as::<_, Quote>(&query)
            .bind(&quote_number)
            .bind(&input.client_name)
            .bind(&input.client_email)
            .bind(&input.client_phone)
            .bind(&input.client_address)
            .bind(&input.project_name)
            .bind(&input.project_description)
            .bind(&input.sor_code)
            .bind(&input.sor_description)
            .bind(&input.region)
            .bind(input.status)
            .bind(input.tax_rate)
            .bind(input.valid_until)
            .bind(&input.notes)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        for item in &input.items {
            Self::insert_item(&mut tx, quote.id, item).await?;
        }
        Self::recompute_totals(&mut tx, quote.id).await?;

        let quote = Self::fetch_one(&mut tx, quote.id).await?;
        let items = Self::fetch_items(&mut tx, quote.id).await?;
        tx.commit().await?;

        Ok(QuoteDetail { quote, items })
    }

    /// Find a quote by internal ID, without its items.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quotes WHERE id = $1");
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a quote together with its items, ordered for display.
    pub async fn detail(pool: &PgPool, id: DbId) -> Result<Option<QuoteDetail>, sqlx::Error> {
        let Some(quote) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let items = Self::list_items(pool, id).await?;
        Ok(Some(QuoteDetail { quote, items }))
    }

    /// List quotes with optional filters, newest first.
    ///
    /// The search term matches quote number, client name, and project name
    /// case-insensitively.
    pub async fn list(
        pool: &PgPool,
        filters: &QuoteFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Quote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quotes
             WHERE ($1::text IS NULL
                    OR quote_number ILIKE $1 OR client_name ILIKE $1 OR project_name ILIKE $1)
               AND ($2::quote_status IS NULL OR status = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(filters.search.as_deref().map(ilike_pattern))
            .bind(filters.status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a quote's descriptive fields. Only non-`None` fields are
    /// applied; totals are recomputed afterwards in case the tax rate moved.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuote,
    ) -> Result<Option<Quote>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE quotes SET
                client_name = COALESCE($2, client_name),
                client_email = COALESCE($3, client_email),
                client_phone = COALESCE($4, client_phone),
                client_address = COALESCE($5, client_address),
                project_name = COALESCE($6, project_name),
                project_description = COALESCE($7, project_description),
                sor_code = COALESCE($8, sor_code),
                sor_description = COALESCE($9, sor_description),
                region = COALESCE($10, region),
                status = COALESCE($11, status),
                tax_rate = COALESCE($12, tax_rate),
                valid_until = COALESCE($13, valid_until),
                notes = COALESCE($14, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .bind(&input.client_name)
            .bind(&input.client_email)
            .bind(&input.client_phone)
            .bind(&input.client_address)
            .bind(&input.project_name)
            .bind(&input.project_description)
            .bind(&input.sor_code)
            .bind(&input.sor_description)
            .bind(&input.region)
            .bind(input.status)
            .bind(input.tax_rate)
            .bind(input.valid_until)
            .bind(&input.notes)
            .fetch_optional(&mut *tx)
            .await?;

        if updated.is_none() {
            return Ok(None);
        }

        Self::recompute_totals(&mut tx, id).await?;
        let quote = Self::fetch_one(&mut tx, id).await?;
        tx.commit().await?;

        Ok(Some(quote))
    }

    /// Delete a quote by ID. Items cascade at the database level.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Items ---------------------------------------------------------------

    /// List a quote's items ordered by `sort_order`.
    pub async fn list_items(pool: &PgPool, quote_id: DbId) -> Result<Vec<QuoteItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM quote_items
             WHERE quote_id = $1 ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, QuoteItem>(&query)
            .bind(quote_id)
            .fetch_all(pool)
            .await
    }

    /// Add an item to a quote and recompute its totals.
    ///
    /// Returns `None` if the quote does not exist.
    pub async fn add_item(
        pool: &PgPool,
        quote_id: DbId,
        input: &CreateQuoteItem,
    ) -> Result<Option<QuoteItem>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM quotes WHERE id = $1)")
                .bind(quote_id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Ok(None);
        }

        let item = Self::insert_item(&mut tx, quote_id, input).await?;
        Self::recompute_totals(&mut tx, quote_id).await?;
        tx.commit().await?;

        Ok(Some(item))
    }

    /// Update a quote item and recompute the quote's totals.
    ///
    /// The line total is re-derived from the resulting quantity and unit
    /// price. Returns `None` if the item does not exist on that quote.
    pub async fn update_item(
        pool: &PgPool,
        quote_id: DbId,
        item_id: DbId,
        input: &UpdateQuoteItem,
    ) -> Result<Option<QuoteItem>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE quote_items SET
                item_type = COALESCE($3, item_type),
                item_name = COALESCE($4, item_name),
                description = COALESCE($5, description),
                quantity = COALESCE($6, quantity),
                unit_price = COALESCE($7, unit_price),
                total_price = COALESCE($6, quantity) * COALESCE($7, unit_price),
                sort_order = COALESCE($8, sort_order)
             WHERE id = $1 AND quote_id = $2
             RETURNING {ITEM_COLUMNS}"
        );
        let item = sqlx::query_as::<_, QuoteItem>(&query)
            .bind(item_id)
            .bind(quote_id)
            .bind(input.item_type)
            .bind(&input.item_name)
            .bind(&input.description)
            .bind(input.quantity)
            .bind(input.unit_price)
            .bind(input.sort_order)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(item) = item else {
            return Ok(None);
        };

        Self::recompute_totals(&mut tx, quote_id).await?;
        tx.commit().await?;

        Ok(Some(item))
    }

    /// Delete a quote item and recompute the quote's totals.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete_item(
        pool: &PgPool,
        quote_id: DbId,
        item_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query("DELETE FROM quote_items WHERE id = $1 AND quote_id = $2")
            .bind(item_id)
            .bind(quote_id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        Self::recompute_totals(&mut tx, quote_id).await?;
        tx.commit().await?;

        Ok(true)
    }

    // -- Internals -----------------------------------------------------------

    /// Generate the next `Q-YYYY-NNNN` quote number for the current year.
    async fn next_quote_number(conn: &mut PgConnection) -> Result<String, sqlx::Error> {
        let year = chrono::Utc::now().year();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotes WHERE quote_number LIKE $1")
            .bind(format!("Q-{year}-%"))
            .fetch_one(conn)
            .await?;
        Ok(format!("Q-{year}-{:04}", count + 1))
    }

    /// Insert one item row with its line total computed from the snapshot.
    async fn insert_item(
        conn: &mut PgConnection,
        quote_id: DbId,
        input: &CreateQuoteItem,
    ) -> Result<QuoteItem, sqlx::Error> {
        let quantity = input.quantity.unwrap_or(1);
        let total_price = line_total(quantity, input.unit_price);

        let query = format!(
            "INSERT INTO quote_items
                (quote_id, item_type, item_name, description, quantity, unit_price,
                 total_price, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 0))
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, QuoteItem>(&query)
            .bind(quote_id)
            .bind(input.item_type)
            .bind(&input.item_name)
            .bind(&input.description)
            .bind(quantity)
            .bind(input.unit_price)
            .bind(total_price)
            .bind(input.sort_order)
            .fetch_one(conn)
            .await
    }

    /// Re-derive subtotal, tax, and grand total from the quote's items.
    async fn recompute_totals(conn: &mut PgConnection, quote_id: DbId) -> Result<(), sqlx::Error> {
        let tax_rate: f64 = sqlx::query_scalar("SELECT tax_rate FROM quotes WHERE id = $1")
            .bind(quote_id)
            .fetch_one(&mut *conn)
            .await?;

        let subtotal: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_price), 0) FROM quote_items WHERE quote_id = $1",
        )
        .bind(quote_id)
        .fetch_one(&mut *conn)
        .await?;

        let totals = QuoteTotals::from_subtotal(subtotal, tax_rate);

        sqlx::query(
            "UPDATE quotes
             SET subtotal = $2, tax_amount = $3, total_amount = $4, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(quote_id)
        .bind(totals.subtotal)
        .bind(totals.tax_amount)
        .bind(totals.total_amount)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Fetch a quote row inside a transaction.
    async fn fetch_one(conn: &mut PgConnection, id: DbId) -> Result<Quote, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quotes WHERE id = $1");
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .fetch_one(conn)
            .await
    }

    /// Fetch a quote's items inside a transaction.
    async fn fetch_items(conn: &mut PgConnection, quote_id: DbId) -> Result<Vec<QuoteItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM quote_items
             WHERE quote_id = $1 ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, QuoteItem>(&query)
            .bind(quote_id)
            .fetch_all(conn)
            .await
    }
}
