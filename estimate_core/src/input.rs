//! # Wire Records
//!
//! The estimate payload exactly as the estimate builder posts it: global
//! settings plus a list of areas, each with surfaces and prep items. Nothing
//! here is interpreted yet; numbers are [`Loose`] and enumerations are raw
//! strings so an unexpected value never fails deserialization. The typed model
//! in [`crate::estimate`] is built from these records.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "settings": { "markupPct": 20, "taxRate": 8.25 },
//!   "areas": [
//!     {
//!       "name": "Living Room",
//!       "length": 14, "width": 12, "height": 8,
//!       "surfaces": [
//!         { "surfaceType": "walls", "method": "roll", "coats": 2, "openingSqft": 35 },
//!         { "surfaceType": "ceiling", "unit": "sqft", "measurement": 168 },
//!         { "surfaceType": "trim", "unit": "lf", "measurement": 52, "coats": 1 },
//!         { "surfaceType": "door", "unit": "count", "measurement": 2, "doorSides": 1 }
//!       ],
//!       "prepItems": [
//!         { "prepType": "minor_patch", "quantity": 6 },
//!         { "prepType": "caulk", "quantity": 40 }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::numeric::{Flag, Loose};
use crate::settings::SettingsOverrides;

/// Full estimate request: settings overrides plus areas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    #[serde(default)]
    pub settings: SettingsOverrides,
    #[serde(default)]
    pub areas: Vec<AreaInput>,
}

/// One room or zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaInput {
    #[serde(default)]
    pub name: String,
    /// Room length (ft)
    #[serde(default, skip_serializing_if = "Loose::is_missing")]
    pub length: Loose,
    /// Room width (ft)
    #[serde(default, skip_serializing_if = "Loose::is_missing")]
    pub width: Loose,
    /// Wall height (ft)
    #[serde(default, skip_serializing_if = "Loose::is_missing")]
    pub height: Loose,
    #[serde(default)]
    pub surfaces: Vec<SurfaceInput>,
    #[serde(default, alias = "prep_items", alias = "prep")]
    pub prep_items: Vec<PrepItemInput>,
}

impl AreaInput {
    /// Start an area with room dimensions in feet
    pub fn room(name: impl Into<String>, length: f64, width: f64, height: f64) -> Self {
        AreaInput {
            name: name.into(),
            length: length.into(),
            width: width.into(),
            height: height.into(),
            ..Default::default()
        }
    }

    /// Builder-style surface append
    pub fn with_surface(mut self, surface: SurfaceInput) -> Self {
        self.surfaces.push(surface);
        self
    }

    /// Builder-style prep item append
    pub fn with_prep(mut self, item: PrepItemInput) -> Self {
        self.prep_items.push(item);
        self
    }
}

/// One paintable element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceInput {
    /// `walls`, `ceiling`, `trim` or `door`
    #[serde(default, alias = "surface_type")]
    pub surface_type: String,
    /// `roll` (default) or `spray`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Loose::is_missing")]
    pub coats: Loose,
    #[serde(default)]
    pub primer: Flag,
    #[serde(default, skip_serializing_if = "Loose::is_missing")]
    pub measurement: Loose,
    /// `sqft`, `lf` or `count`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Units per hour, overrides the rate book
    #[serde(default, alias = "production_rate", skip_serializing_if = "Loose::is_missing")]
    pub production_rate: Loose,
    /// Sqft per gallon, overrides the rate book
    #[serde(default, alias = "coverage_rate", skip_serializing_if = "Loose::is_missing")]
    pub coverage_rate: Loose,
    #[serde(default, alias = "door_sides", skip_serializing_if = "Loose::is_missing")]
    pub door_sides: Loose,
    /// Door/window area subtracted from derived wall area
    #[serde(default, alias = "opening_sqft", skip_serializing_if = "Loose::is_missing")]
    pub opening_sqft: Loose,
}

impl SurfaceInput {
    /// A surface of the given type with everything else defaulted
    pub fn new(surface_type: impl Into<String>) -> Self {
        SurfaceInput {
            surface_type: surface_type.into(),
            ..Default::default()
        }
    }

    /// Set the raw measurement and its unit
    pub fn measured(mut self, measurement: f64, unit: impl Into<String>) -> Self {
        self.measurement = measurement.into();
        self.unit = Some(unit.into());
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn coats(mut self, coats: f64) -> Self {
        self.coats = coats.into();
        self
    }

    pub fn primed(mut self) -> Self {
        self.primer = Flag(true);
        self
    }

    pub fn opening_sqft(mut self, sqft: f64) -> Self {
        self.opening_sqft = sqft.into();
        self
    }
}

/// One preparatory task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepItemInput {
    #[serde(default, alias = "prep_type")]
    pub prep_type: String,
    /// Count, sqft or lf depending on the type
    #[serde(default, skip_serializing_if = "Loose::is_missing")]
    pub quantity: Loose,
    /// Units per hour override
    #[serde(default, skip_serializing_if = "Loose::is_missing")]
    pub rate: Loose,
    /// Minutes per unit override (minor_patch, spot_prime)
    #[serde(default, alias = "minutes_each", skip_serializing_if = "Loose::is_missing")]
    pub minutes_each: Loose,
}

impl PrepItemInput {
    pub fn new(prep_type: impl Into<String>, quantity: f64) -> Self {
        PrepItemInput {
            prep_type: prep_type.into(),
            quantity: quantity.into(),
            ..Default::default()
        }
    }
}
