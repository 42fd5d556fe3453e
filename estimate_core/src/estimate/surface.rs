//! # Surfaces
//!
//! Typed view of one paintable element. The wire record carries a single
//! `measurement` whose meaning depends on `surfaceType` and `unit`; here each
//! surface type gets its own variant holding only the extent that type can
//! actually use:
//!
//! | Variant        | Extent                                                     |
//! |----------------|------------------------------------------------------------|
//! | `Walls`        | measured sqft, or derived from room perimeter × height     |
//! | `Ceiling`      | measured sqft, or derived from room length × width         |
//! | `Trim`         | linear feet (only when given in `lf`)                      |
//! | `Door`         | door count × sides (only when given as `count`)            |
//! | `Unrecognized` | measured sqft (only when given in `sqft`)                  |
//!
//! A trim run given in sqft, or a door given in lf, has no usable extent and
//! contributes nothing; [`crate::validation`] reports those combinations.

use serde::{Deserialize, Serialize};

use crate::input::SurfaceInput;
use crate::rates::RateBook;
use crate::settings::EstimateSettings;
use crate::units::{Gallons, LaborHours, LinearFeet, SqFt};

use super::RoomDimensions;

/// Default finish coats for walls, ceilings and doors
pub const DEFAULT_COATS: u32 = 2;
/// Default finish coats for trim
pub const DEFAULT_TRIM_COATS: u32 = 1;
/// Default sides painted per door
pub const DEFAULT_DOOR_SIDES: f64 = 2.0;

/// What kind of surface is being painted (selects the formula branch).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    Walls,
    Ceiling,
    Trim,
    Door,
    /// Anything else; painted at the fallback production rate
    Other(String),
}

impl SurfaceKind {
    /// Parse a wire `surfaceType` (case-insensitive, whitespace-trimmed)
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "walls" | "wall" => SurfaceKind::Walls,
            "ceiling" | "ceilings" => SurfaceKind::Ceiling,
            "trim" => SurfaceKind::Trim,
            "door" | "doors" => SurfaceKind::Door,
            _ => SurfaceKind::Other(raw.trim().to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SurfaceKind::Other(_))
    }
}

impl std::fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceKind::Walls => write!(f, "walls"),
            SurfaceKind::Ceiling => write!(f, "ceiling"),
            SurfaceKind::Trim => write!(f, "trim"),
            SurfaceKind::Door => write!(f, "door"),
            SurfaceKind::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// How the paint goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationMethod {
    #[default]
    Roll,
    Spray,
}

impl ApplicationMethod {
    /// Parse a wire `method`; returns `None` for unrecognized values.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "roll" | "brush" | "brush_roll" => Some(ApplicationMethod::Roll),
            "spray" => Some(ApplicationMethod::Spray),
            _ => None,
        }
    }

    /// Resolve an optional wire value, defaulting to roll
    pub fn from_input(raw: Option<&str>) -> Self {
        raw.and_then(ApplicationMethod::parse).unwrap_or_default()
    }
}

/// Unit the raw measurement was taken in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasureUnit {
    SquareFeet,
    LinearFeet,
    Count,
    /// Missing or unrecognized; dimension-derived where the surface allows it
    Other(String),
}

impl MeasureUnit {
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = raw.unwrap_or("").trim();
        match raw.to_ascii_lowercase().as_str() {
            "sqft" | "sf" | "sq ft" => MeasureUnit::SquareFeet,
            "lf" | "linear_ft" | "linear ft" => MeasureUnit::LinearFeet,
            "count" | "ea" | "each" => MeasureUnit::Count,
            _ => MeasureUnit::Other(raw.to_string()),
        }
    }
}

/// Finish parameters shared by every surface type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Finish {
    pub method: ApplicationMethod,
    /// Finish coats, at least 1
    pub coats: u32,
    /// One extra primer coat (labor and material; ignored for trim)
    pub primer: bool,
    /// Units/hour override, only kept when positive
    pub production_override: Option<f64>,
    /// Sqft/gallon override for finish coats, only kept when positive
    pub coverage_override: Option<f64>,
}

impl Finish {
    fn from_input(input: &SurfaceInput, default_coats: u32) -> Self {
        let coats = input
            .coats
            .positive()
            .map(f64::floor)
            .filter(|c| *c >= 1.0)
            .map(|c| c.min(u32::MAX as f64) as u32)
            .unwrap_or(default_coats);

        Finish {
            method: ApplicationMethod::from_input(input.method.as_deref()),
            coats,
            primer: input.primer.is_set(),
            production_override: input.production_rate.positive(),
            coverage_override: input.coverage_rate.positive(),
        }
    }
}

/// Wall area source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WallExtent {
    /// Given directly in square feet
    Measured(SqFt),
    /// Perimeter × height less openings; `fallback` when the room lacks dimensions
    FromRoom { opening: SqFt, fallback: SqFt },
}

/// Ceiling area source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CeilingExtent {
    Measured(SqFt),
    /// Length × width; `fallback` when the room lacks dimensions
    FromRoom { fallback: SqFt },
}

/// Door quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorLeaves {
    pub count: f64,
    pub sides: f64,
}

/// One paintable element with a typed extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Surface {
    Walls { extent: WallExtent, finish: Finish },
    Ceiling { extent: CeilingExtent, finish: Finish },
    /// `run` is `None` unless the measurement was given in linear feet
    Trim { run: Option<LinearFeet>, finish: Finish },
    /// `leaves` is `None` unless the measurement was given as a count
    Door { leaves: Option<DoorLeaves>, finish: Finish },
    /// `measured` is `None` unless the measurement was given in sqft
    Unrecognized { kind: String, measured: Option<SqFt>, finish: Finish },
}

/// Labor and paint attributable to one surface (before area overhead).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceWork {
    pub labor: LaborHours,
    pub paint: Gallons,
}

impl Surface {
    /// Interpret a wire record.
    ///
    /// ```rust
    /// use estimate_core::estimate::surface::{Surface, WallExtent};
    /// use estimate_core::input::SurfaceInput;
    /// use estimate_core::units::SqFt;
    ///
    /// let surface = Surface::from_input(&SurfaceInput::new("walls").measured(400.0, "sqft"));
    /// assert!(matches!(
    ///     surface,
    ///     Surface::Walls { extent: WallExtent::Measured(SqFt(s)), .. } if s == 400.0
    /// ));
    /// ```
    pub fn from_input(input: &SurfaceInput) -> Self {
        let kind = SurfaceKind::parse(&input.surface_type);
        let unit = MeasureUnit::parse(input.unit.as_deref());
        let measurement = input.measurement.non_negative_or(0.0);

        match kind {
            SurfaceKind::Walls => Surface::Walls {
                extent: match unit {
                    MeasureUnit::SquareFeet => WallExtent::Measured(SqFt(measurement)),
                    _ => WallExtent::FromRoom {
                        opening: SqFt(input.opening_sqft.non_negative_or(0.0)),
                        fallback: SqFt(measurement),
                    },
                },
                finish: Finish::from_input(input, DEFAULT_COATS),
            },
            SurfaceKind::Ceiling => Surface::Ceiling {
                extent: match unit {
                    MeasureUnit::SquareFeet => CeilingExtent::Measured(SqFt(measurement)),
                    _ => CeilingExtent::FromRoom {
                        fallback: SqFt(measurement),
                    },
                },
                finish: Finish::from_input(input, DEFAULT_COATS),
            },
            SurfaceKind::Trim => Surface::Trim {
                run: (unit == MeasureUnit::LinearFeet).then_some(LinearFeet(measurement)),
                finish: Finish::from_input(input, DEFAULT_TRIM_COATS),
            },
            SurfaceKind::Door => Surface::Door {
                leaves: (unit == MeasureUnit::Count).then(|| DoorLeaves {
                    count: measurement,
                    sides: input.door_sides.positive_or(DEFAULT_DOOR_SIDES),
                }),
                finish: Finish::from_input(input, DEFAULT_COATS),
            },
            SurfaceKind::Other(kind) => Surface::Unrecognized {
                measured: (unit == MeasureUnit::SquareFeet).then_some(SqFt(measurement)),
                kind,
                finish: Finish::from_input(input, DEFAULT_COATS),
            },
        }
    }

    pub fn kind(&self) -> SurfaceKind {
        match self {
            Surface::Walls { .. } => SurfaceKind::Walls,
            Surface::Ceiling { .. } => SurfaceKind::Ceiling,
            Surface::Trim { .. } => SurfaceKind::Trim,
            Surface::Door { .. } => SurfaceKind::Door,
            Surface::Unrecognized { kind, .. } => SurfaceKind::Other(kind.clone()),
        }
    }

    pub fn finish(&self) -> &Finish {
        match self {
            Surface::Walls { finish, .. }
            | Surface::Ceiling { finish, .. }
            | Surface::Trim { finish, .. }
            | Surface::Door { finish, .. }
            | Surface::Unrecognized { finish, .. } => finish,
        }
    }

    /// True when the unit given can't be used by this surface type, so the
    /// surface contributes nothing.
    pub fn is_unmeasured(&self) -> bool {
        matches!(
            self,
            Surface::Trim { run: None, .. }
                | Surface::Door { leaves: None, .. }
                | Surface::Unrecognized { measured: None, .. }
        )
    }

    /// Effective paintable area. Trim has none (it's priced per linear foot).
    pub fn square_feet(&self, room: &RoomDimensions, rates: &RateBook) -> SqFt {
        match self {
            Surface::Walls { extent, .. } => match *extent {
                WallExtent::Measured(sqft) => sqft,
                WallExtent::FromRoom { opening, fallback } => match room.wall_area() {
                    Some(gross) => (gross - opening).at_least_zero(),
                    None => fallback,
                },
            },
            Surface::Ceiling { extent, .. } => match *extent {
                CeilingExtent::Measured(sqft) => sqft,
                CeilingExtent::FromRoom { fallback } => room.floor_area().unwrap_or(fallback),
            },
            Surface::Door { leaves, .. } => leaves
                .map(|l| SqFt(l.count * rates.door_sqft_per_side * l.sides))
                .unwrap_or_default(),
            Surface::Unrecognized { measured, .. } => measured.unwrap_or_default(),
            Surface::Trim { .. } => SqFt(0.0),
        }
    }

    /// Labor and paint for this surface.
    pub fn work(
        &self,
        room: &RoomDimensions,
        settings: &EstimateSettings,
        rates: &RateBook,
    ) -> SurfaceWork {
        let finish = self.finish();
        let coats = f64::from(finish.coats);
        let production = finish
            .production_override
            .unwrap_or_else(|| rates.production_rate(&self.kind(), finish.method));

        if let Surface::Trim { run, .. } = self {
            let run = run.unwrap_or_default();
            return SurfaceWork {
                labor: run.hours_at(production) * coats,
                paint: Gallons(0.0),
            };
        }

        let sqft = self.square_feet(room, rates);
        let finish_coverage = finish
            .coverage_override
            .unwrap_or_else(|| rates.finish_coverage(finish.method));
        let waste = settings.waste_factor();

        let mut labor = sqft.hours_at(production) * coats;
        let mut paint = (sqft * coats).gallons_at(finish_coverage) * waste;
        if finish.primer {
            labor += sqft.hours_at(production);
            paint += sqft.gallons_at(rates.primer_coverage(finish.method)) * waste;
        }

        SurfaceWork { labor, paint }
    }
}
