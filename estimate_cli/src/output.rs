//! Plain-text rendering for terminal output.

use std::fmt;

use estimate_core::estimate::{EstimateReport, EstimateTotals};
use estimate_core::rates::{MethodRates, RateBook};
use estimate_core::settings::EstimateSettings;
use estimate_core::validation::ValidationIssue;

/// Totals block plus one line per area.
pub struct ReportView<'a>(pub &'a EstimateReport);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        if !report.areas.is_empty() {
            writeln!(f, "Areas")?;
            for area in &report.areas {
                let name = if area.name.is_empty() { "(unnamed)" } else { area.name.as_str() };
                writeln!(
                    f,
                    "  {name:<24} {:>8.2} h {:>8.2} gal   {} surfaces, {} prep",
                    area.labor_hours, area.material_gallons, area.surface_count, area.prep_count
                )?;
            }
            writeln!(f)?;
        }
        write!(f, "{}", TotalsView(&report.totals))
    }
}

pub struct TotalsView<'a>(pub &'a EstimateTotals);

impl fmt::Display for TotalsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.0;
        writeln!(f, "Totals")?;
        writeln!(f, "  {:<22} {:>12.2}", "Labor hours", t.labor_hours)?;
        writeln!(f, "  {:<22} {:>12.2}", "Labor cost", t.labor_cost)?;
        writeln!(f, "  {:<22} {:>12.1}", "Paint (gal)", t.material_gallons)?;
        writeln!(f, "  {:<22} {:>12.2}", "Material cost", t.material_cost)?;
        writeln!(f, "  {:<22} {:>12.2}", "Overhead", t.overhead)?;
        writeln!(f, "  {:<22} {:>12.2}", "Price before tax", t.price_before_tax)?;
        writeln!(f, "  {:<22} {:>12.2}", "With markup", t.subtotal_with_markup)?;
        writeln!(f, "  {:<22} {:>12.2}", "Tax", t.tax)?;
        writeln!(f, "  {:<22} {:>12.2}", "Grand total", t.grand_total)
    }
}

/// Effective settings and rate book.
pub struct DefaultsView<'a> {
    pub settings: &'a EstimateSettings,
    pub rates: &'a RateBook,
}

impl fmt::Display for DefaultsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.settings;
        writeln!(f, "Settings")?;
        writeln!(f, "  {:<26} {:>8}", "taxRate (%)", s.tax_rate)?;
        writeln!(f, "  {:<26} {:>8}", "overheadPct (%)", s.overhead_pct)?;
        writeln!(f, "  {:<26} {:>8}", "markupPct (%)", s.markup_pct)?;
        writeln!(f, "  {:<26} {:>8}", "crewHourlyCost", s.crew_hourly_cost)?;
        writeln!(f, "  {:<26} {:>8}", "paintUnitCost", s.paint_unit_cost)?;
        writeln!(f, "  {:<26} {:>8}", "wastePaintPct (%)", s.waste_paint_pct)?;
        writeln!(f, "  {:<26} {:>8}", "setupMinutesPerArea", s.setup_minutes_per_area)?;
        writeln!(f, "  {:<26} {:>8}", "cleanupBufferPct (%)", s.cleanup_buffer_pct)?;

        let r = self.rates;
        writeln!(f)?;
        writeln!(f, "Rates{:>24}{:>8}", "roll", "spray")?;
        method_row(f, "finish coverage sqft/gal", &r.finish_coverage)?;
        method_row(f, "primer coverage sqft/gal", &r.primer_coverage)?;
        method_row(f, "walls sqft/hr", &r.walls)?;
        method_row(f, "ceiling sqft/hr", &r.ceiling)?;
        method_row(f, "trim lf/hr", &r.trim)?;
        method_row(f, "door sqft/hr", &r.door)?;
        writeln!(f, "  {:<26} {:>8}", "other surfaces sqft/hr", r.fallback_production)?;
        writeln!(f, "  {:<26} {:>8}", "door sqft per side", r.door_sqft_per_side)?;

        let p = &r.prep;
        writeln!(f)?;
        writeln!(f, "Prep")?;
        writeln!(f, "  {:<26} {:>8}", "minor patch min each", p.minor_patch_minutes)?;
        writeln!(f, "  {:<26} {:>8}", "major patch sqft/hr", p.major_patch_rate)?;
        writeln!(f, "  {:<26} {:>8}", "caulk lf/hr", p.caulk_rate)?;
        writeln!(f, "  {:<26} {:>8}", "masking lf/hr", p.masking_rate)?;
        writeln!(f, "  {:<26} {:>8}", "floor protection sqft/hr", p.floor_protection_rate)?;
        writeln!(f, "  {:<26} {:>8}", "spot prime min each", p.spot_prime_minutes)
    }
}

fn method_row(f: &mut fmt::Formatter<'_>, label: &str, rates: &MethodRates) -> fmt::Result {
    writeln!(f, "  {label:<26} {:>5} {:>7}", rates.roll, rates.spray)
}

/// One issue per line, or a single all-clear line.
pub struct IssuesView<'a>(pub &'a [ValidationIssue]);

impl fmt::Display for IssuesView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No issues found");
        }
        for issue in self.0 {
            writeln!(f, "{issue}")?;
        }
        writeln!(f, "{} issue(s)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimate_core::estimate::AreaSummary;
    use estimate_core::validation::IssueKind;

    #[test]
    fn test_report_lists_areas_and_totals() {
        let report = EstimateReport {
            settings: EstimateSettings::default(),
            totals: EstimateTotals {
                labor_hours: 7.99,
                grand_total: 458.71,
                ..Default::default()
            },
            areas: vec![AreaSummary {
                name: String::new(),
                labor_hours: 7.99,
                material_gallons: 3.98,
                surface_count: 1,
                prep_count: 1,
            }],
        };
        let text = ReportView(&report).to_string();
        assert!(text.contains("(unnamed)"));
        assert!(text.contains("1 surfaces, 1 prep"));
        assert!(text.contains("458.71"));
    }

    #[test]
    fn test_defaults_view_shows_rates() {
        let text = DefaultsView {
            settings: &EstimateSettings::default(),
            rates: &RateBook::default(),
        }
        .to_string();
        assert!(text.contains("crewHourlyCost"));
        assert!(text.contains("175"));
        assert!(text.contains("spot prime"));
    }

    #[test]
    fn test_issues_view() {
        assert_eq!(IssuesView(&[]).to_string(), "No issues found\n");
        let issue = ValidationIssue::new(
            "areas[0].surfaces[0].unit",
            IssueKind::UnitMismatch,
            "trim measured in 'sqft'",
        );
        let text = IssuesView(&[issue]).to_string();
        assert!(text.starts_with("areas[0].surfaces[0].unit: trim measured"));
        assert!(text.ends_with("1 issue(s)\n"));
    }
}
