//! # Estimate Computation
//!
//! The cost engine. Given settings and a list of areas, it derives labor
//! hours, paint volume and a price. Computation follows the calculation
//! pattern used throughout the crate:
//!
//! - input records in, plain results out, nothing retained between calls
//! - no I/O; inputs are never mutated
//! - never fails: unreadable numbers were already replaced by defaults
//!
//! ## Per-area flow
//!
//! ```text
//! for each area:
//!     hours   = Σ surface labor + Σ prep labor + setupMinutesPerArea / 60
//!     hours  *= 1 + cleanupBufferPct / 100
//!     gallons = Σ surface paint
//! totals = roll_up(Σ hours, Σ gallons)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::estimate::compute_totals;
//! use estimate_core::input::{AreaInput, PrepItemInput, SurfaceInput};
//! use estimate_core::settings::SettingsOverrides;
//!
//! let area = AreaInput::room("Den", 12.0, 10.0, 8.0)
//!     .with_surface(SurfaceInput::new("walls").measured(400.0, "sqft").coats(2.0).primed())
//!     .with_prep(PrepItemInput::new("minor_patch", 5.0));
//!
//! let totals = compute_totals(&SettingsOverrides::default(), &[area]);
//! assert_eq!(totals.material_gallons, 4.0);
//! assert!((totals.labor_hours - 7.99).abs() < 0.011);
//! ```

pub mod prep;
pub mod pricing;
pub mod surface;

use serde::{Deserialize, Serialize};

use crate::input::{AreaInput, EstimateRequest};
use crate::rates::RateBook;
use crate::settings::{EstimateSettings, SettingsOverrides};
use crate::units::{Gallons, LaborHours, SqFt};

pub use prep::PrepTask;
pub use pricing::{roll_up, round2, saturate, EstimateTotals};
pub use surface::{ApplicationMethod, Surface, SurfaceKind, SurfaceWork};

/// Room dimensions in feet. A dimension is present only when positive.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl RoomDimensions {
    pub fn from_input(area: &AreaInput) -> Self {
        RoomDimensions {
            length: area.length.positive(),
            width: area.width.positive(),
            height: area.height.positive(),
        }
    }

    /// Length × width, when both are known
    pub fn floor_area(&self) -> Option<SqFt> {
        Some(SqFt(self.length? * self.width?))
    }

    /// Perimeter × height, when all three are known
    pub fn wall_area(&self) -> Option<SqFt> {
        let perimeter = 2.0 * (self.length? + self.width?);
        Some(SqFt(perimeter * self.height?))
    }
}

/// Typed view of one area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub name: String,
    pub room: RoomDimensions,
    pub surfaces: Vec<Surface>,
    pub prep: Vec<PrepTask>,
}

impl Area {
    pub fn from_input(input: &AreaInput) -> Self {
        Area {
            name: input.name.clone(),
            room: RoomDimensions::from_input(input),
            surfaces: input.surfaces.iter().map(Surface::from_input).collect(),
            prep: input.prep_items.iter().map(PrepTask::from_input).collect(),
        }
    }

    /// Labor (including setup and cleanup allowances) and paint for this area.
    pub fn work(&self, settings: &EstimateSettings, rates: &RateBook) -> SurfaceWork {
        let mut labor = LaborHours(0.0);
        let mut paint = Gallons(0.0);

        for surface in &self.surfaces {
            let work = surface.work(&self.room, settings, rates);
            labor += work.labor;
            paint += work.paint;
        }
        labor += self.prep.iter().map(|task| task.hours(rates)).sum::<LaborHours>();

        labor += LaborHours::from_minutes(settings.setup_minutes_per_area);
        labor = labor * settings.cleanup_factor();

        SurfaceWork { labor, paint }
    }
}

/// Per-area line of an [`EstimateReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaSummary {
    pub name: String,
    /// Hours including setup and cleanup, rounded to 2 decimals
    pub labor_hours: f64,
    /// Paint volume rounded to 2 decimals (not rounded to half gallons)
    pub material_gallons: f64,
    pub surface_count: usize,
    pub prep_count: usize,
}

/// Totals plus a per-area breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReport {
    pub settings: EstimateSettings,
    pub totals: EstimateTotals,
    pub areas: Vec<AreaSummary>,
}

/// The estimating engine. Holds only an immutable rate book, so one instance
/// can serve any number of concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    rates: RateBook,
}

impl Estimator {
    pub fn new(rates: RateBook) -> Self {
        Estimator { rates }
    }

    pub fn rates(&self) -> &RateBook {
        &self.rates
    }

    /// Compute totals and a per-area breakdown.
    pub fn compute(&self, settings: &EstimateSettings, areas: &[AreaInput]) -> EstimateReport {
        let mut labor = LaborHours(0.0);
        let mut paint = Gallons(0.0);
        let mut summaries = Vec::with_capacity(areas.len());

        for input in areas {
            let area = Area::from_input(input);
            let work = area.work(settings, &self.rates);
            tracing::debug!(
                area = %area.name,
                labor_hours = work.labor.value(),
                gallons = work.paint.value(),
                "estimated area"
            );

            labor += work.labor;
            paint += work.paint;
            summaries.push(AreaSummary {
                name: area.name,
                labor_hours: round2(work.labor.value()),
                material_gallons: round2(work.paint.value()),
                surface_count: area.surfaces.len(),
                prep_count: area.prep.len(),
            });
        }

        EstimateReport {
            settings: *settings,
            totals: roll_up(labor, paint, settings),
            areas: summaries,
        }
    }

    pub fn compute_totals(
        &self,
        settings: &EstimateSettings,
        areas: &[AreaInput],
    ) -> EstimateTotals {
        self.compute(settings, areas).totals
    }

    /// Merge a request's settings over stored defaults, then compute.
    ///
    /// This is the route-handler calling convention: request values win over
    /// stored shop defaults, which win over built-in constants.
    pub fn quote(&self, request: &EstimateRequest, stored: &SettingsOverrides) -> EstimateReport {
        let settings = EstimateSettings::resolve(&request.settings, stored);
        self.compute(&settings, &request.areas)
    }
}

/// Compute totals with the built-in rate book, resolving `settings` against
/// the built-in defaults.
pub fn compute_totals(settings: &SettingsOverrides, areas: &[AreaInput]) -> EstimateTotals {
    Estimator::default().compute_totals(&EstimateSettings::from_overrides(settings), areas)
}
