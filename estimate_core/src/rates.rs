//! # Rate Book
//!
//! Production and coverage rates used whenever a surface or prep item does not
//! carry its own override. The built-in book reflects typical residential
//! repaint numbers; a shop can load a partial override from configuration and
//! inject it into an [`Estimator`](crate::estimate::Estimator).
//!
//! ## Built-in Tables
//!
//! | Category                      | roll | spray |
//! |-------------------------------|------|-------|
//! | finish coverage (sqft/gal)    | 350  | 275   |
//! | primer coverage (sqft/gal)    | 300  | 250   |
//! | production: walls (sqft/hr)   | 175  | 240   |
//! | production: ceiling (sqft/hr) | 150  | 220   |
//! | production: trim (lf/hr)      | 60   | 80    |
//! | production: door (sqft/hr)    | 45   | 55    |
//!
//! Prep work has its own defaults, see [`PrepRates`].

use serde::{Deserialize, Serialize};

use crate::errors::{CalcResult, EstimateError};
use crate::estimate::surface::{ApplicationMethod, SurfaceKind};

/// A rate that depends on how paint is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodRates {
    pub roll: f64,
    pub spray: f64,
}

impl MethodRates {
    pub const fn new(roll: f64, spray: f64) -> Self {
        MethodRates { roll, spray }
    }

    /// Look up the rate for an application method
    pub fn get(&self, method: ApplicationMethod) -> f64 {
        match method {
            ApplicationMethod::Roll => self.roll,
            ApplicationMethod::Spray => self.spray,
        }
    }
}

/// Default throughput for prep tasks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepRates {
    /// Minutes per small patch
    pub minor_patch_minutes: f64,
    /// Large patching, sqft/hr
    pub major_patch_rate: f64,
    /// Caulking, lf/hr
    pub caulk_rate: f64,
    /// Masking / taping, lf/hr
    pub masking_rate: f64,
    /// Floor protection / plastic sheeting, sqft/hr
    pub floor_protection_rate: f64,
    /// Minutes per spot-primed repair
    pub spot_prime_minutes: f64,
}

impl PrepRates {
    pub const BUILT_IN: PrepRates = PrepRates {
        minor_patch_minutes: 7.0,
        major_patch_rate: 50.0,
        caulk_rate: 120.0,
        masking_rate: 200.0,
        floor_protection_rate: 400.0,
        spot_prime_minutes: 5.0,
    };
}

impl Default for PrepRates {
    fn default() -> Self {
        PrepRates::BUILT_IN
    }
}

/// Immutable rate lookup shared by every estimate computation.
///
/// Deserializes with every field optional, down to the individual roll/spray
/// entry, so configuration files only need to name the rates they change.
/// Anything left out keeps its built-in value:
///
/// ```rust
/// use estimate_core::rates::RateBook;
///
/// let book: RateBook = serde_json::from_str(r#"{ "walls": { "roll": 180.0 } }"#).unwrap();
/// assert_eq!(book.walls.roll, 180.0);
/// assert_eq!(book.walls.spray, 240.0);
/// assert_eq!(book.ceiling.roll, 150.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RateBookOverrides")]
pub struct RateBook {
    /// Finish coat coverage, sqft/gal
    pub finish_coverage: MethodRates,
    /// Primer coverage, sqft/gal
    pub primer_coverage: MethodRates,
    /// Wall production, sqft/hr
    pub walls: MethodRates,
    /// Ceiling production, sqft/hr
    pub ceiling: MethodRates,
    /// Trim production, lf/hr
    pub trim: MethodRates,
    /// Door production, sqft/hr
    pub door: MethodRates,
    /// Production for surface types the book doesn't know, sqft/hr
    pub fallback_production: f64,
    /// Paintable area of one side of a standard door
    pub door_sqft_per_side: f64,
    pub prep: PrepRates,
}

impl RateBook {
    pub const BUILT_IN: RateBook = RateBook {
        finish_coverage: MethodRates::new(350.0, 275.0),
        primer_coverage: MethodRates::new(300.0, 250.0),
        walls: MethodRates::new(175.0, 240.0),
        ceiling: MethodRates::new(150.0, 220.0),
        trim: MethodRates::new(60.0, 80.0),
        door: MethodRates::new(45.0, 55.0),
        fallback_production: 150.0,
        door_sqft_per_side: 21.0,
        prep: PrepRates::BUILT_IN,
    };

    /// Production rate for a surface type and application method.
    ///
    /// ```rust
    /// use estimate_core::rates::RateBook;
    /// use estimate_core::estimate::surface::{ApplicationMethod, SurfaceKind};
    ///
    /// let book = RateBook::default();
    /// assert_eq!(book.production_rate(&SurfaceKind::Walls, ApplicationMethod::Spray), 240.0);
    /// let deck = SurfaceKind::Other("deck".into());
    /// assert_eq!(book.production_rate(&deck, ApplicationMethod::Roll), 150.0);
    /// ```
    pub fn production_rate(&self, kind: &SurfaceKind, method: ApplicationMethod) -> f64 {
        match kind {
            SurfaceKind::Walls => self.walls.get(method),
            SurfaceKind::Ceiling => self.ceiling.get(method),
            SurfaceKind::Trim => self.trim.get(method),
            SurfaceKind::Door => self.door.get(method),
            SurfaceKind::Other(_) => self.fallback_production,
        }
    }

    /// Finish coverage for an application method, sqft/gal
    pub fn finish_coverage(&self, method: ApplicationMethod) -> f64 {
        self.finish_coverage.get(method)
    }

    /// Primer coverage for an application method, sqft/gal
    pub fn primer_coverage(&self, method: ApplicationMethod) -> f64 {
        self.primer_coverage.get(method)
    }

    /// Reject rates that would divide by zero or produce nonsense.
    pub fn validate(&self) -> CalcResult<()> {
        let method_tables = [
            ("finish_coverage", &self.finish_coverage),
            ("primer_coverage", &self.primer_coverage),
            ("walls", &self.walls),
            ("ceiling", &self.ceiling),
            ("trim", &self.trim),
            ("door", &self.door),
        ];
        for (name, rates) in method_tables {
            check_positive(&format!("rates.{name}.roll"), rates.roll)?;
            check_positive(&format!("rates.{name}.spray"), rates.spray)?;
        }

        check_positive("rates.fallback_production", self.fallback_production)?;
        check_positive("rates.door_sqft_per_side", self.door_sqft_per_side)?;

        let prep = &self.prep;
        check_positive("rates.prep.minor_patch_minutes", prep.minor_patch_minutes)?;
        check_positive("rates.prep.major_patch_rate", prep.major_patch_rate)?;
        check_positive("rates.prep.caulk_rate", prep.caulk_rate)?;
        check_positive("rates.prep.masking_rate", prep.masking_rate)?;
        check_positive("rates.prep.floor_protection_rate", prep.floor_protection_rate)?;
        check_positive("rates.prep.spot_prime_minutes", prep.spot_prime_minutes)?;
        Ok(())
    }
}

impl Default for RateBook {
    fn default() -> Self {
        RateBook::BUILT_IN
    }
}

/// Wire form of a partial [`MethodRates`].
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct MethodOverrides {
    roll: Option<f64>,
    spray: Option<f64>,
}

impl MethodOverrides {
    fn over(self, base: MethodRates) -> MethodRates {
        MethodRates {
            roll: self.roll.unwrap_or(base.roll),
            spray: self.spray.unwrap_or(base.spray),
        }
    }
}

/// Wire form of a partial [`RateBook`].
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct RateBookOverrides {
    finish_coverage: MethodOverrides,
    primer_coverage: MethodOverrides,
    walls: MethodOverrides,
    ceiling: MethodOverrides,
    trim: MethodOverrides,
    door: MethodOverrides,
    fallback_production: Option<f64>,
    door_sqft_per_side: Option<f64>,
    prep: PrepRates,
}

impl From<RateBookOverrides> for RateBook {
    fn from(o: RateBookOverrides) -> Self {
        let base = RateBook::BUILT_IN;
        RateBook {
            finish_coverage: o.finish_coverage.over(base.finish_coverage),
            primer_coverage: o.primer_coverage.over(base.primer_coverage),
            walls: o.walls.over(base.walls),
            ceiling: o.ceiling.over(base.ceiling),
            trim: o.trim.over(base.trim),
            door: o.door.over(base.door),
            fallback_production: o.fallback_production.unwrap_or(base.fallback_production),
            door_sqft_per_side: o.door_sqft_per_side.unwrap_or(base.door_sqft_per_side),
            prep: o.prep,
        }
    }
}

fn check_positive(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EstimateError::invalid_input(
            field,
            value.to_string(),
            "Rate must be a positive number",
        ))
    }
}
