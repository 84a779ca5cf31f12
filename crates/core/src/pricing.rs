//! Line-item and rollup arithmetic for projects and quotes.
//!
//! Every priced row stores a snapshot `total_price` computed once at attach
//! time; these helpers are the single place that arithmetic lives so the
//! repository and API layers never re-derive it ad hoc.

use serde::Serialize;

/// Total for a quantity-priced line (materials, equipment, quote items).
pub fn line_total(quantity: i32, unit_price: f64) -> f64 {
    f64::from(quantity) * unit_price
}

/// Total for a labour line: persons x hours x per-person rate.
pub fn labour_total(persons: i32, hours: i32, unit_rate: f64) -> f64 {
    f64::from(persons) * f64::from(hours) * unit_rate
}

/// Derived quote totals, recomputed from the item subtotal on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuoteTotals {
    pub subtotal: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
}

impl QuoteTotals {
    /// Compute tax and grand total from a subtotal and a percentage tax rate.
    ///
    /// A quote with no items yields all-zero totals, not an error.
    pub fn from_subtotal(subtotal: f64, tax_rate: f64) -> Self {
        let tax_amount = subtotal * (tax_rate / 100.0);
        Self {
            subtotal,
            tax_rate,
            tax_amount,
            total_amount: subtotal + tax_amount,
        }
    }
}

/// Per-category cost rollup for a project.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostRollup {
    pub materials: f64,
    pub equipment: f64,
    pub labour: f64,
    pub external: f64,
    pub grand_total: f64,
}

impl CostRollup {
    /// Build a rollup from category sums; the grand total is their sum.
    pub fn new(materials: f64, equipment: f64, labour: f64, external: f64) -> Self {
        Self {
            materials,
            equipment,
            labour,
            external,
            grand_total: materials + equipment + labour + external,
        }
    }

    /// Rollup for a project with no component rows.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_multiplies_quantity() {
        assert_eq!(line_total(3, 12.5), 37.5);
    }

    #[test]
    fn labour_total_multiplies_persons_hours_rate() {
        // 2 persons x 8 hours x 45.0/person-hour
        assert_eq!(labour_total(2, 8, 45.0), 720.0);
    }

    #[test]
    fn quote_totals_apply_percentage_tax() {
        let totals = QuoteTotals::from_subtotal(200.0, 10.0);
        assert_eq!(totals.tax_amount, 20.0);
        assert_eq!(totals.total_amount, 220.0);
    }

    #[test]
    fn quote_totals_zero_items_are_all_zero() {
        let totals = QuoteTotals::from_subtotal(0.0, 10.0);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.tax_amount, 0.0);
        assert_eq!(totals.total_amount, 0.0);
    }

    #[test]
    fn rollup_grand_total_sums_categories() {
        let rollup = CostRollup::new(100.0, 50.0, 25.0, 10.0);
        assert_eq!(rollup.grand_total, 185.0);
    }

    #[test]
    fn rollup_zero_is_not_an_error() {
        assert_eq!(CostRollup::zero().grand_total, 0.0);
    }
}
