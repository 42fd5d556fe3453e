//! # Estimate Documents
//!
//! An `EstimateDocument` is the saved form of one estimate: a header, the
//! request exactly as the estimator entered it, and the totals from the last
//! recompute. Documents serialize to human-readable JSON (see [`crate::file_io`]
//! for atomic saves and locking).
//!
//! ## Structure
//!
//! ```text
//! EstimateDocument
//! ├── meta: EstimateMeta (version, id, estimate number, lead, timestamps)
//! ├── request: EstimateRequest (settings overrides + areas, verbatim)
//! └── totals: Option<EstimateTotals> (last computed)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::document::EstimateDocument;
//! use estimate_core::estimate::Estimator;
//! use estimate_core::input::{AreaInput, SurfaceInput};
//! use estimate_core::settings::SettingsOverrides;
//!
//! let mut doc = EstimateDocument::new("Smith kitchen repaint", Some(1042));
//! let kitchen = AreaInput::room("Kitchen", 12.0, 10.0, 8.0);
//! doc.add_area(kitchen.with_surface(SurfaceInput::new("walls")));
//!
//! let totals = doc.recompute(&Estimator::default(), &SettingsOverrides::default());
//! assert!(totals.grand_total > 0.0);
//! assert!(doc.meta.estimate_number.starts_with("EST-"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::estimate::{EstimateTotals, Estimator};
use crate::input::{AreaInput, EstimateRequest};
use crate::settings::SettingsOverrides;

/// Current schema version for estimate documents
pub const SCHEMA_VERSION: &str = "0.1.0";

/// One saved estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateDocument {
    pub meta: EstimateMeta,

    /// Settings overrides and areas as entered. Unreadable values are kept
    /// as-is so reopening the document shows what was typed.
    pub request: EstimateRequest,

    /// Totals from the last [`EstimateDocument::recompute`]; `None` until then
    #[serde(default)]
    pub totals: Option<EstimateTotals>,
}

impl EstimateDocument {
    /// Create an empty estimate.
    ///
    /// # Arguments
    ///
    /// * `project_title` - Title shown on the estimate
    /// * `lead_id` - CRM lead this estimate belongs to, if any
    pub fn new(project_title: impl Into<String>, lead_id: Option<i64>) -> Self {
        Self::from_request(project_title, lead_id, EstimateRequest::default())
    }

    /// Create an estimate around an existing request.
    pub fn from_request(
        project_title: impl Into<String>,
        lead_id: Option<i64>,
        request: EstimateRequest,
    ) -> Self {
        let id = Uuid::new_v4();
        let now = Utc::now();
        EstimateDocument {
            meta: EstimateMeta {
                version: SCHEMA_VERSION.to_string(),
                id,
                estimate_number: estimate_number(now, &id),
                lead_id,
                project_title: project_title.into(),
                created: now,
                modified: now,
            },
            request,
            totals: None,
        }
    }

    /// Append an area. Returns its index.
    pub fn add_area(&mut self, area: AreaInput) -> usize {
        self.request.areas.push(area);
        self.touch();
        self.request.areas.len() - 1
    }

    /// Remove an area by index.
    ///
    /// Returns the removed area if the index was in range.
    pub fn remove_area(&mut self, index: usize) -> Option<AreaInput> {
        if index >= self.request.areas.len() {
            return None;
        }
        let area = self.request.areas.remove(index);
        self.touch();
        Some(area)
    }

    /// Recompute totals against `stored` shop defaults and keep them.
    pub fn recompute(
        &mut self,
        estimator: &Estimator,
        stored: &SettingsOverrides,
    ) -> &EstimateTotals {
        let report = estimator.quote(&self.request, stored);
        self.touch();
        self.totals.insert(report.totals)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn area_count(&self) -> usize {
        self.request.areas.len()
    }
}

/// Header stored at the top of every estimate document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateMeta {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub id: Uuid,

    /// Human-facing number, `EST-YYYYMMDD-XXXX`
    pub estimate_number: String,

    #[serde(default)]
    pub lead_id: Option<i64>,

    pub project_title: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// Format an estimate number from the creation date and the first four hex
/// digits of the id.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use estimate_core::document::estimate_number;
/// use uuid::Uuid;
///
/// let id = Uuid::parse_str("a1b2c3d4-0000-4000-8000-000000000000").unwrap();
/// let created = Utc.with_ymd_and_hms(2025, 3, 7, 15, 0, 0).unwrap();
/// assert_eq!(estimate_number(created, &id), "EST-20250307-A1B2");
/// ```
pub fn estimate_number(created: DateTime<Utc>, id: &Uuid) -> String {
    let hex = id.simple().to_string();
    format!("EST-{}-{}", created.format("%Y%m%d"), hex[..4].to_ascii_uppercase())
}
