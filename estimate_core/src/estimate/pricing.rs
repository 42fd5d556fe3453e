//! # Pricing Roll-up
//!
//! Turns summed labor hours and paint volume into money:
//!
//! ```text
//! laborCost          = laborHours × crewHourlyCost
//! materialCost       = materialGallons × paintUnitCost
//! base               = laborCost + materialCost
//! overhead           = base × overheadPct / 100
//! priceBeforeTax     = base + overhead
//! subtotalWithMarkup = priceBeforeTax × (1 + markupPct / 100)
//! tax                = subtotalWithMarkup × taxRate / 100
//! grandTotal         = subtotalWithMarkup + tax
//! ```
//!
//! The chain runs on unrounded values; every reported field is rounded to
//! cents (hours and gallons to two decimals as well). Reported gallons are
//! first rounded up to the next half gallon.
//!
//! Every step is passed through [`saturate`], so absurd but finite inputs
//! (a crew rate of `1e308`) cap at `f64::MAX` instead of overflowing into
//! infinity and then NaN.

use serde::{Deserialize, Serialize};

use crate::settings::EstimateSettings;
use crate::units::{Gallons, LaborHours};

/// Final numbers for an estimate, as returned to the estimate builder.
///
/// ## JSON Example
///
/// ```json
/// {
///   "laborHours": 7.99,
///   "laborCost": 279.56,
///   "materialGallons": 4.0,
///   "materialCost": 179.14,
///   "overhead": 0.0,
///   "priceBeforeTax": 458.71,
///   "subtotalWithMarkup": 458.71,
///   "tax": 0.0,
///   "grandTotal": 458.71
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateTotals {
    pub labor_hours: f64,
    pub labor_cost: f64,
    /// Rounded up to a multiple of 0.5
    pub material_gallons: f64,
    pub material_cost: f64,
    pub overhead: f64,
    pub price_before_tax: f64,
    pub subtotal_with_markup: f64,
    pub tax: f64,
    pub grand_total: f64,
}

/// Price summed labor and paint under the given settings.
///
/// ```rust
/// use estimate_core::estimate::pricing::roll_up;
/// use estimate_core::settings::EstimateSettings;
/// use estimate_core::units::{Gallons, LaborHours};
///
/// let settings = EstimateSettings {
///     crew_hourly_cost: 50.0,
///     paint_unit_cost: 25.0,
///     ..Default::default()
/// };
/// let totals = roll_up(LaborHours(2.0), Gallons(2.0), &settings);
/// assert_eq!(totals.grand_total, 150.0);
/// ```
pub fn roll_up(labor: LaborHours, paint: Gallons, settings: &EstimateSettings) -> EstimateTotals {
    let hours = saturate(labor.value());
    let gallons = saturate(paint.value());

    let labor_cost = saturate(hours * settings.crew_hourly_cost);
    let material_cost = saturate(gallons * settings.paint_unit_cost);
    let base = saturate(labor_cost + material_cost);
    let overhead = saturate(base * (settings.overhead_pct / 100.0));
    let price_before_tax = saturate(base + overhead);
    let subtotal_with_markup = saturate(price_before_tax * (1.0 + settings.markup_pct / 100.0));
    let tax = saturate(subtotal_with_markup * (settings.tax_rate / 100.0));
    let grand_total = saturate(subtotal_with_markup + tax);

    tracing::debug!(
        labor_hours = hours,
        gallons = gallons,
        base,
        grand_total,
        "priced estimate"
    );

    EstimateTotals {
        labor_hours: round2(hours),
        labor_cost: round2(labor_cost),
        material_gallons: round2(Gallons(gallons).ceil_to_half().value()),
        material_cost: round2(material_cost),
        overhead: round2(overhead),
        price_before_tax: round2(price_before_tax),
        subtotal_with_markup: round2(subtotal_with_markup),
        tax: round2(tax),
        grand_total: round2(grand_total),
    }
}

/// Clamp to a finite value: infinities cap at `f64::MAX`/`f64::MIN`, NaN is 0.
pub fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(f64::MIN, f64::MAX)
    }
}

/// Round to two decimal places (half away from zero), never returning -0.0
/// or a non-finite number.
pub fn round2(value: f64) -> f64 {
    let value = saturate(value);
    // already integral at this magnitude, and scaling by 100 would overflow
    if value.abs() >= 2f64.powi(52) {
        return value;
    }
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_chain() {
        // laborCost 100, materialCost 50
        let settings = EstimateSettings {
            crew_hourly_cost: 50.0,
            paint_unit_cost: 25.0,
            overhead_pct: 10.0,
            markup_pct: 20.0,
            tax_rate: 8.0,
            ..Default::default()
        };
        let totals = roll_up(LaborHours(2.0), Gallons(2.0), &settings);

        assert_eq!(totals.labor_cost, 100.0);
        assert_eq!(totals.material_cost, 50.0);
        assert_eq!(totals.overhead, 15.0);
        assert_eq!(totals.price_before_tax, 165.0);
        assert_eq!(totals.subtotal_with_markup, 198.0);
        assert_eq!(totals.tax, 15.84);
        assert_eq!(totals.grand_total, 213.84);
    }

    #[test]
    fn test_gallons_round_up_to_half() {
        let totals = roll_up(LaborHours(0.0), Gallons(3.2), &EstimateSettings::default());
        assert_eq!(totals.material_gallons, 3.5);
        // cost is on the computed volume, not the rounded purchase
        assert_eq!(totals.material_cost, 144.0);
    }

    #[test]
    fn test_zero_everything() {
        let totals = roll_up(LaborHours(0.0), Gallons(0.0), &EstimateSettings::default());
        assert_eq!(totals, EstimateTotals::default());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_000_1), 1.24);
        assert_eq!(round2(198.000_000_000_03), 198.0);
        assert!(round2(-0.001).is_sign_positive());
    }

    #[test]
    fn test_huge_rates_saturate() {
        let settings = EstimateSettings {
            crew_hourly_cost: 1e308,
            markup_pct: 1e308,
            ..Default::default()
        };
        let totals = roll_up(LaborHours(4.0), Gallons(1.0), &settings);

        assert_eq!(totals.labor_cost, f64::MAX);
        assert_eq!(totals.overhead, 0.0);
        assert_eq!(totals.grand_total, f64::MAX);
        let json = serde_json::to_value(totals).unwrap();
        assert!(json.as_object().unwrap().values().all(|v| v.is_f64()));
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(f64::INFINITY), f64::MAX);
        assert_eq!(saturate(f64::NEG_INFINITY), f64::MIN);
        assert_eq!(saturate(f64::NAN), 0.0);
        assert_eq!(saturate(12.5), 12.5);
        assert_eq!(round2(f64::INFINITY), f64::MAX);
        assert_eq!(round2(f64::NAN), 0.0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(EstimateTotals::default()).unwrap();
        for key in [
            "laborHours",
            "laborCost",
            "materialGallons",
            "materialCost",
            "overhead",
            "priceBeforeTax",
            "subtotalWithMarkup",
            "tax",
            "grandTotal",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
