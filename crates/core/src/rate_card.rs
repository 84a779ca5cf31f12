//! Rate-card quoting: base rate plus support items, uplifted for risk and
//! taxed.
//!
//! The knobs (base rate, per-item support cost, tax rate) are deployment
//! configuration rather than business constants; [`RateCardConfig::default`]
//! carries the standard values.

use serde::Serialize;

use crate::error::CoreError;

/// Default base amount applied to every rate-card quote.
pub const DEFAULT_BASE_AMOUNT: f64 = 1000.0;

/// Default cost per selected additional-support item.
pub const DEFAULT_SUPPORT_UNIT_COST: f64 = 100.0;

/// Default GST percentage applied to the uplifted subtotal.
pub const DEFAULT_TAX_RATE: f64 = 10.0;

/// Tunable rate-card parameters.
#[derive(Debug, Clone, Copy)]
pub struct RateCardConfig {
    pub base_amount: f64,
    pub support_unit_cost: f64,
    pub tax_rate: f64,
}

impl Default for RateCardConfig {
    fn default() -> Self {
        Self {
            base_amount: DEFAULT_BASE_AMOUNT,
            support_unit_cost: DEFAULT_SUPPORT_UNIT_COST,
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

/// Fully itemised rate-card quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateCardQuote {
    pub base_amount: f64,
    pub support_amount: f64,
    pub risk_uplift: f64,
    pub risk_multiplier: f64,
    pub subtotal: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
}

/// Price a rate card.
///
/// ```text
/// support  = support_count x support_unit_cost
/// subtotal = (base + support) x (1 + risk_uplift/100)
/// tax      = subtotal x tax_rate/100
/// total    = subtotal + tax
/// ```
///
/// `risk_uplift` is a percentage and must lie in `[0, 100]`.
pub fn calculate(
    risk_uplift: f64,
    support_count: usize,
    config: &RateCardConfig,
) -> Result<RateCardQuote, CoreError> {
    if !(0.0..=100.0).contains(&risk_uplift) {
        return Err(CoreError::Validation(format!(
            "risk_uplift must be between 0 and 100, got {risk_uplift}"
        )));
    }

    let support_amount = support_count as f64 * config.support_unit_cost;
    let risk_multiplier = 1.0 + risk_uplift / 100.0;
    let subtotal = (config.base_amount + support_amount) * risk_multiplier;
    let tax_amount = subtotal * (config.tax_rate / 100.0);

    Ok(RateCardQuote {
        base_amount: config.base_amount,
        support_amount,
        risk_uplift,
        risk_multiplier,
        subtotal,
        tax_rate: config.tax_rate,
        tax_amount,
        total_amount: subtotal + tax_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_quote_with_two_support_items() {
        // 10% uplift on (1000 + 2x100), then 10% tax.
        let quote = calculate(10.0, 2, &RateCardConfig::default()).unwrap();
        assert_eq!(quote.support_amount, 200.0);
        assert_eq!(quote.subtotal, 1320.0);
        assert_eq!(quote.tax_amount, 132.0);
        assert_eq!(quote.total_amount, 1452.0);
    }

    #[test]
    fn no_support_no_uplift() {
        let quote = calculate(0.0, 0, &RateCardConfig::default()).unwrap();
        assert_eq!(quote.subtotal, 1000.0);
        assert_eq!(quote.total_amount, 1100.0);
    }

    #[test]
    fn uplift_out_of_range_is_rejected() {
        let err = calculate(150.0, 0, &RateCardConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = calculate(-1.0, 0, &RateCardConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn config_overrides_are_honoured() {
        let config = RateCardConfig {
            base_amount: 500.0,
            support_unit_cost: 50.0,
            tax_rate: 0.0,
        };
        let quote = calculate(0.0, 3, &config).unwrap();
        assert_eq!(quote.subtotal, 650.0);
        assert_eq!(quote.tax_amount, 0.0);
        assert_eq!(quote.total_amount, 650.0);
    }
}
