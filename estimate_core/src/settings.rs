//! # Estimate Settings
//!
//! Pricing knobs that apply to one estimate: crew cost, paint cost, waste,
//! per-area setup and cleanup allowances, overhead, markup and tax.
//!
//! Settings arrive in layers. A request may override any field; anything it
//! leaves out (or sends as garbage, or negative) comes from the stored shop
//! defaults; anything still missing uses the built-in constant:
//!
//! ```text
//! request value  >  stored global default  >  built-in constant
//! ```
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::settings::{EstimateSettings, SettingsOverrides};
//! use serde_json::json;
//!
//! let request: SettingsOverrides = serde_json::from_value(json!({ "markupPct": "20" })).unwrap();
//! let stored: SettingsOverrides =
//!     serde_json::from_value(json!({ "crewHourlyCost": 42, "markupPct": 15 })).unwrap();
//!
//! let settings = EstimateSettings::resolve(&request, &stored);
//! assert_eq!(settings.markup_pct, 20.0);
//! assert_eq!(settings.crew_hourly_cost, 42.0);
//! assert_eq!(settings.paint_unit_cost, 45.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::numeric::Loose;

/// Default crew cost per hour
pub const DEFAULT_CREW_HOURLY_COST: f64 = 35.0;
/// Default paint cost per gallon
pub const DEFAULT_PAINT_UNIT_COST: f64 = 45.0;
/// Default waste allowance on paint volume (%)
pub const DEFAULT_WASTE_PAINT_PCT: f64 = 10.0;
/// Default setup time charged once per area (minutes)
pub const DEFAULT_SETUP_MINUTES_PER_AREA: f64 = 10.0;
/// Default cleanup buffer on each area's labor (%)
pub const DEFAULT_CLEANUP_BUFFER_PCT: f64 = 5.0;

/// Settings as they arrive on the wire or from the stored defaults.
///
/// Every field is optional and read leniently. Accepts both the camelCase
/// keys the dashboard sends and the snake_case column names of the settings
/// table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOverrides {
    #[serde(default, alias = "tax_rate", skip_serializing_if = "Loose::is_missing")]
    pub tax_rate: Loose,
    #[serde(default, alias = "overhead_pct", skip_serializing_if = "Loose::is_missing")]
    pub overhead_pct: Loose,
    #[serde(default, alias = "markup_pct", skip_serializing_if = "Loose::is_missing")]
    pub markup_pct: Loose,
    #[serde(default, alias = "crew_hourly_cost", skip_serializing_if = "Loose::is_missing")]
    pub crew_hourly_cost: Loose,
    #[serde(default, alias = "waste_paint_pct", skip_serializing_if = "Loose::is_missing")]
    pub waste_paint_pct: Loose,
    #[serde(default, alias = "setup_minutes_per_area", skip_serializing_if = "Loose::is_missing")]
    pub setup_minutes_per_area: Loose,
    #[serde(default, alias = "cleanup_buffer_pct", skip_serializing_if = "Loose::is_missing")]
    pub cleanup_buffer_pct: Loose,
    #[serde(default, alias = "paint_unit_cost", skip_serializing_if = "Loose::is_missing")]
    pub paint_unit_cost: Loose,
}

impl SettingsOverrides {
    /// Field names paired with their values, in wire order.
    ///
    /// Lets validation walk the settings without repeating every field.
    pub fn fields(&self) -> [(&'static str, &Loose); 8] {
        [
            ("taxRate", &self.tax_rate),
            ("overheadPct", &self.overhead_pct),
            ("markupPct", &self.markup_pct),
            ("crewHourlyCost", &self.crew_hourly_cost),
            ("wastePaintPct", &self.waste_paint_pct),
            ("setupMinutesPerArea", &self.setup_minutes_per_area),
            ("cleanupBufferPct", &self.cleanup_buffer_pct),
            ("paintUnitCost", &self.paint_unit_cost),
        ]
    }
}

/// Fully resolved settings. Every field is finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateSettings {
    /// Sales tax (%)
    pub tax_rate: f64,
    /// Overhead on labor + material (%)
    pub overhead_pct: f64,
    /// Markup on price before tax (%)
    pub markup_pct: f64,
    /// Crew cost per labor hour
    pub crew_hourly_cost: f64,
    /// Waste allowance on paint volume (%)
    pub waste_paint_pct: f64,
    /// Setup minutes added once per area
    pub setup_minutes_per_area: f64,
    /// Cleanup buffer applied to each area's labor (%)
    pub cleanup_buffer_pct: f64,
    /// Paint cost per gallon
    pub paint_unit_cost: f64,
}

impl Default for EstimateSettings {
    fn default() -> Self {
        EstimateSettings {
            tax_rate: 0.0,
            overhead_pct: 0.0,
            markup_pct: 0.0,
            crew_hourly_cost: DEFAULT_CREW_HOURLY_COST,
            waste_paint_pct: DEFAULT_WASTE_PAINT_PCT,
            setup_minutes_per_area: DEFAULT_SETUP_MINUTES_PER_AREA,
            cleanup_buffer_pct: DEFAULT_CLEANUP_BUFFER_PCT,
            paint_unit_cost: DEFAULT_PAINT_UNIT_COST,
        }
    }
}

impl EstimateSettings {
    /// Resolve a single layer of overrides against the built-in defaults.
    pub fn from_overrides(overrides: &SettingsOverrides) -> Self {
        Self::resolve(overrides, &SettingsOverrides::default())
    }

    /// Resolve request overrides over stored defaults over built-ins.
    pub fn resolve(request: &SettingsOverrides, stored: &SettingsOverrides) -> Self {
        let builtin = EstimateSettings::default();
        let pick = |req: &Loose, st: &Loose, fallback: f64| {
            req.non_negative().or_else(|| st.non_negative()).unwrap_or(fallback)
        };

        EstimateSettings {
            tax_rate: pick(&request.tax_rate, &stored.tax_rate, builtin.tax_rate),
            overhead_pct: pick(&request.overhead_pct, &stored.overhead_pct, builtin.overhead_pct),
            markup_pct: pick(&request.markup_pct, &stored.markup_pct, builtin.markup_pct),
            crew_hourly_cost: pick(
                &request.crew_hourly_cost,
                &stored.crew_hourly_cost,
                builtin.crew_hourly_cost,
            ),
            waste_paint_pct: pick(
                &request.waste_paint_pct,
                &stored.waste_paint_pct,
                builtin.waste_paint_pct,
            ),
            setup_minutes_per_area: pick(
                &request.setup_minutes_per_area,
                &stored.setup_minutes_per_area,
                builtin.setup_minutes_per_area,
            ),
            cleanup_buffer_pct: pick(
                &request.cleanup_buffer_pct,
                &stored.cleanup_buffer_pct,
                builtin.cleanup_buffer_pct,
            ),
            paint_unit_cost: pick(
                &request.paint_unit_cost,
                &stored.paint_unit_cost,
                builtin.paint_unit_cost,
            ),
        }
    }

    /// Multiplier applied to raw paint volume, `1 + waste/100`
    pub fn waste_factor(&self) -> f64 {
        1.0 + self.waste_paint_pct / 100.0
    }

    /// Multiplier applied to each area's labor, `1 + cleanup/100`
    pub fn cleanup_factor(&self) -> f64 {
        1.0 + self.cleanup_buffer_pct / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn overrides(value: serde_json::Value) -> SettingsOverrides {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_builtin_defaults() {
        let settings = EstimateSettings::from_overrides(&SettingsOverrides::default());
        assert_eq!(settings, EstimateSettings::default());
        assert_eq!(settings.crew_hourly_cost, 35.0);
        assert_eq!(settings.waste_paint_pct, 10.0);
        assert_eq!(settings.setup_minutes_per_area, 10.0);
        assert_eq!(settings.cleanup_buffer_pct, 5.0);
        assert_eq!(settings.paint_unit_cost, 45.0);
        assert_eq!(settings.tax_rate, 0.0);
    }

    #[test]
    fn test_merge_precedence() {
        let request = overrides(json!({ "taxRate": 8, "crewHourlyCost": "bogus" }));
        let stored = overrides(json!({ "tax_rate": 6, "crew_hourly_cost": 40, "markup_pct": 25 }));

        let settings = EstimateSettings::resolve(&request, &stored);
        assert_eq!(settings.tax_rate, 8.0);
        assert_eq!(settings.crew_hourly_cost, 40.0);
        assert_eq!(settings.markup_pct, 25.0);
        assert_eq!(settings.paint_unit_cost, 45.0);
    }

    #[test]
    fn test_negative_values_fall_through() {
        let request = overrides(json!({ "wastePaintPct": -5, "cleanupBufferPct": 0 }));
        let settings = EstimateSettings::from_overrides(&request);
        assert_eq!(settings.waste_paint_pct, 10.0);
        // zero is a legitimate override
        assert_eq!(settings.cleanup_buffer_pct, 0.0);
    }

    #[test]
    fn test_factors() {
        let settings = EstimateSettings::default();
        assert!((settings.waste_factor() - 1.1).abs() < 1e-12);
        assert!((settings.cleanup_factor() - 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_overrides_serialize_sparse() {
        let request = overrides(json!({ "markupPct": 20 }));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, json!({ "markupPct": 20.0 }));
    }
}
