//! # Strict Validation
//!
//! The engine is deliberately forgiving: an unknown prep type adds no hours, a
//! door measured in linear feet adds nothing, a garbage number becomes its
//! default. That keeps the estimate builder responsive while someone is
//! halfway through typing, but it can also hide a typo. This module lists
//! every such silent substitution so a caller can refuse to save (see
//! [`ensure_valid`]) or at least show a warning.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::input::{AreaInput, EstimateRequest, PrepItemInput};
//! use estimate_core::validation::{validate_request, IssueKind};
//!
//! let request = EstimateRequest {
//!     areas: vec![AreaInput::default().with_prep(PrepItemInput::new("caulking", 20.0))],
//!     ..Default::default()
//! };
//!
//! let issues = validate_request(&request);
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].kind, IssueKind::UnknownPrepType);
//! assert_eq!(issues[0].path, "areas[0].prepItems[0].prepType");
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcResult, EstimateError};
use crate::estimate::prep::PrepTask;
use crate::estimate::surface::{ApplicationMethod, Surface, SurfaceKind};
use crate::input::{AreaInput, EstimateRequest, SurfaceInput};
use crate::numeric::Loose;

/// Category of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// surfaceType is not walls, ceiling, trim or door
    UnknownSurfaceType,
    /// prepType has no formula; contributes zero hours
    UnknownPrepType,
    /// method is neither roll nor spray; treated as roll
    UnknownMethod,
    /// unit can't be used for this surface type; contributes nothing
    UnitMismatch,
    /// numeric field present but unreadable; default used
    InvalidNumber,
    /// numeric field negative; default used
    NegativeValue,
    /// zero (or a fractional coat count) where only a positive value is used; default used
    NotPositive,
    /// primer requested on trim, which is never primed
    IgnoredPrimer,
}

/// One thing the engine would silently paper over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Location in the request, e.g. `areas[1].surfaces[0].unit`
    pub path: String,
    pub kind: IssueKind,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        ValidationIssue {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// List every silent substitution the engine would make for this request.
pub fn validate_request(request: &EstimateRequest) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (name, value) in request.settings.fields() {
        check_number(&mut issues, &format!("settings.{name}"), value);
    }
    for (index, area) in request.areas.iter().enumerate() {
        check_area(&mut issues, &format!("areas[{index}]"), area);
    }

    issues
}

/// Fail with [`EstimateError::ValidationFailed`] if any issue is found.
pub fn ensure_valid(request: &EstimateRequest) -> CalcResult<()> {
    let issues = validate_request(request);
    if issues.is_empty() {
        return Ok(());
    }
    for issue in &issues {
        tracing::warn!(path = %issue.path, kind = ?issue.kind, "{}", issue.message);
    }
    Err(EstimateError::validation_failed(issues))
}

fn check_area(issues: &mut Vec<ValidationIssue>, path: &str, area: &AreaInput) {
    check_number(issues, &format!("{path}.length"), &area.length);
    check_number(issues, &format!("{path}.width"), &area.width);
    check_number(issues, &format!("{path}.height"), &area.height);

    for (index, surface) in area.surfaces.iter().enumerate() {
        check_surface(issues, &format!("{path}.surfaces[{index}]"), surface);
    }

    for (index, item) in area.prep_items.iter().enumerate() {
        let item_path = format!("{path}.prepItems[{index}]");
        if !PrepTask::from_input(item).is_recognized() {
            issues.push(ValidationIssue::new(
                format!("{item_path}.prepType"),
                IssueKind::UnknownPrepType,
                format!("unknown prep type '{}' contributes no hours", item.prep_type),
            ));
        }
        check_number(issues, &format!("{item_path}.quantity"), &item.quantity);
        check_positive(issues, &format!("{item_path}.rate"), &item.rate, 0.0);
        check_positive(issues, &format!("{item_path}.minutesEach"), &item.minutes_each, 0.0);
    }
}

fn check_surface(issues: &mut Vec<ValidationIssue>, path: &str, input: &SurfaceInput) {
    let surface = Surface::from_input(input);

    if let SurfaceKind::Other(raw) = surface.kind() {
        issues.push(ValidationIssue::new(
            format!("{path}.surfaceType"),
            IssueKind::UnknownSurfaceType,
            format!("unknown surface type '{raw}' priced at the fallback production rate"),
        ));
    }

    if let Some(method) = input.method.as_deref() {
        if !method.trim().is_empty() && ApplicationMethod::parse(method).is_none() {
            issues.push(ValidationIssue::new(
                format!("{path}.method"),
                IssueKind::UnknownMethod,
                format!("unknown method '{method}' treated as roll"),
            ));
        }
    }

    if surface.is_unmeasured() {
        let expected = match surface {
            Surface::Trim { .. } => "lf",
            Surface::Door { .. } => "count",
            _ => "sqft",
        };
        issues.push(ValidationIssue::new(
            format!("{path}.unit"),
            IssueKind::UnitMismatch,
            format!(
                "{} measured in '{}' contributes nothing; expected '{expected}'",
                surface.kind(),
                input.unit.as_deref().unwrap_or(""),
            ),
        ));
    }

    if matches!(surface, Surface::Trim { .. }) && input.primer.is_set() {
        issues.push(ValidationIssue::new(
            format!("{path}.primer"),
            IssueKind::IgnoredPrimer,
            "primer is not applied to trim",
        ));
    }

    check_positive(issues, &format!("{path}.coats"), &input.coats, 1.0);
    check_number(issues, &format!("{path}.measurement"), &input.measurement);
    check_positive(issues, &format!("{path}.productionRate"), &input.production_rate, 0.0);
    check_positive(issues, &format!("{path}.coverageRate"), &input.coverage_rate, 0.0);
    check_positive(issues, &format!("{path}.doorSides"), &input.door_sides, 0.0);
    check_number(issues, &format!("{path}.openingSqft"), &input.opening_sqft);
}

/// Like [`check_number`], and also flags values in `[0, minimum)`, or exactly
/// zero when `minimum` is 0.
fn check_positive(issues: &mut Vec<ValidationIssue>, path: &str, value: &Loose, minimum: f64) {
    check_number(issues, path, value);
    if let Loose::Value(v) = value {
        let too_small = if minimum > 0.0 { *v < minimum } else { *v == 0.0 };
        if *v >= 0.0 && too_small {
            issues.push(ValidationIssue::new(
                path,
                IssueKind::NotPositive,
                format!("{v} is ignored; default used"),
            ));
        }
    }
}

fn check_number(issues: &mut Vec<ValidationIssue>, path: &str, value: &Loose) {
    match value {
        Loose::Invalid(raw) => issues.push(ValidationIssue::new(
            path,
            IssueKind::InvalidNumber,
            format!("'{raw}' is not a number; default used"),
        )),
        Loose::Value(v) if *v < 0.0 => issues.push(ValidationIssue::new(
            path,
            IssueKind::NegativeValue,
            format!("{v} is negative; default used"),
        )),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> EstimateRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_clean_request_has_no_issues() {
        let request = request(json!({
            "settings": { "taxRate": 8 },
            "areas": [{
                "length": 10, "width": 12, "height": 8,
                "surfaces": [
                    { "surfaceType": "walls", "method": "spray" },
                    { "surfaceType": "trim", "unit": "lf", "measurement": 44 },
                    { "surfaceType": "door", "unit": "count", "measurement": 1 }
                ],
                "prepItems": [{ "prepType": "taping", "quantity": 40 }]
            }]
        }));
        assert!(validate_request(&request).is_empty());
        assert!(ensure_valid(&request).is_ok());
    }

    #[test]
    fn test_reports_unit_mismatches() {
        let request = request(json!({
            "areas": [{
                "surfaces": [
                    { "surfaceType": "trim", "unit": "sqft", "measurement": 44 },
                    { "surfaceType": "door", "unit": "lf", "measurement": 2 }
                ]
            }]
        }));
        let issues = validate_request(&request);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.kind == IssueKind::UnitMismatch));
        assert_eq!(issues[1].path, "areas[0].surfaces[1].unit");
        assert!(issues[1].message.contains("expected 'count'"));
    }

    #[test]
    fn test_unknown_surface_type_without_sqft_reports_twice() {
        let request = request(json!({
            "areas": [{ "surfaces": [{ "surfaceType": "deck", "unit": "lf" }] }]
        }));
        let kinds: Vec<_> = validate_request(&request).into_iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![IssueKind::UnknownSurfaceType, IssueKind::UnitMismatch]);
    }

    #[test]
    fn test_reports_bad_numbers_and_method() {
        let request = request(json!({
            "settings": { "markupPct": "lots", "taxRate": -1 },
            "areas": [{
                "surfaces": [{ "surfaceType": "walls", "method": "airless", "coats": "two" }]
            }]
        }));
        let issues = validate_request(&request);
        let paths: Vec<_> = issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "settings.taxRate",
                "settings.markupPct",
                "areas[0].surfaces[0].method",
                "areas[0].surfaces[0].coats",
            ]
        );
        assert_eq!(issues[0].kind, IssueKind::NegativeValue);
        assert_eq!(issues[1].kind, IssueKind::InvalidNumber);
    }

    #[test]
    fn test_reports_ignored_zeros_and_trim_primer() {
        let request = request(json!({
            "areas": [{
                "surfaces": [
                    { "surfaceType": "trim", "unit": "lf", "measurement": 40, "primer": true },
                    {
                        "surfaceType": "door", "unit": "count", "measurement": 2,
                        "coats": 0.5, "productionRate": 0, "coverageRate": "0", "doorSides": 0
                    }
                ],
                "prepItems": [{ "prepType": "caulk", "quantity": 10, "rate": 0, "minutesEach": 3 }]
            }]
        }));
        let issues = validate_request(&request);
        let found: Vec<_> = issues.iter().map(|i| (i.path.as_str(), i.kind)).collect();
        assert_eq!(
            found,
            vec![
                ("areas[0].surfaces[0].primer", IssueKind::IgnoredPrimer),
                ("areas[0].surfaces[1].coats", IssueKind::NotPositive),
                ("areas[0].surfaces[1].productionRate", IssueKind::NotPositive),
                ("areas[0].surfaces[1].coverageRate", IssueKind::NotPositive),
                ("areas[0].surfaces[1].doorSides", IssueKind::NotPositive),
                ("areas[0].prepItems[0].rate", IssueKind::NotPositive),
            ]
        );
    }

    #[test]
    fn test_primer_on_walls_is_fine() {
        let request = request(json!({
            "areas": [{ "surfaces": [{ "surfaceType": "walls", "primer": true, "coats": 1 }] }]
        }));
        assert!(validate_request(&request).is_empty());
    }

    #[test]
    fn test_ensure_valid_returns_issues() {
        let request = request(json!({
            "areas": [{ "prepItems": [{ "prepType": "sanding", "quantity": 3 }] }]
        }));
        match ensure_valid(&request) {
            Err(EstimateError::ValidationFailed { issues }) => {
                assert_eq!(issues.len(), 1);
                let text = issues[0].to_string();
                assert!(text.starts_with("areas[0].prepItems[0].prepType: "));
                assert!(text.ends_with("unknown prep type 'sanding' contributes no hours"));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }
}
