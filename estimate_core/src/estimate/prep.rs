//! # Prep Tasks
//!
//! Preparatory work inside an area. Prep adds labor only, never paint.
//!
//! | prepType                      | hours                          | default        |
//! |-------------------------------|--------------------------------|----------------|
//! | `minor_patch`                 | minutes each × quantity / 60   | 7 min          |
//! | `major_patch`                 | quantity / rate                | 50 sqft/hr     |
//! | `caulk`                       | quantity / rate                | 120 lf/hr      |
//! | `masking`, `taping`           | quantity / rate                | 200 lf/hr      |
//! | `floor_protection`, `plastic` | quantity / rate                | 400 sqft/hr    |
//! | `spot_prime`                  | minutes each × quantity / 60   | 5 min          |
//!
//! Any other type contributes zero hours. Strict validation flags it.

use serde::{Deserialize, Serialize};

use crate::input::PrepItemInput;
use crate::rates::RateBook;
use crate::units::LaborHours;

/// One prep task with its quantity and any per-item override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrepTask {
    MinorPatch { count: f64, minutes_each: Option<f64> },
    MajorPatch { sqft: f64, rate: Option<f64> },
    Caulk { linear_ft: f64, rate: Option<f64> },
    Masking { linear_ft: f64, rate: Option<f64> },
    FloorProtection { sqft: f64, rate: Option<f64> },
    SpotPrime { count: f64, minutes_each: Option<f64> },
    /// Unknown prep type, kept so callers can see what was ignored
    Unrecognized { prep_type: String },
}

impl PrepTask {
    /// Interpret a wire record. Type matching is case-insensitive.
    pub fn from_input(input: &PrepItemInput) -> Self {
        let quantity = input.quantity.non_negative_or(0.0);
        let rate = input.rate.positive();
        let minutes_each = input.minutes_each.positive();

        match input.prep_type.trim().to_ascii_lowercase().as_str() {
            "minor_patch" => PrepTask::MinorPatch {
                count: quantity,
                minutes_each,
            },
            "major_patch" => PrepTask::MajorPatch { sqft: quantity, rate },
            "caulk" => PrepTask::Caulk {
                linear_ft: quantity,
                rate,
            },
            "masking" | "taping" => PrepTask::Masking {
                linear_ft: quantity,
                rate,
            },
            "floor_protection" | "plastic" => PrepTask::FloorProtection { sqft: quantity, rate },
            "spot_prime" => PrepTask::SpotPrime {
                count: quantity,
                minutes_each,
            },
            _ => PrepTask::Unrecognized {
                prep_type: input.prep_type.clone(),
            },
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, PrepTask::Unrecognized { .. })
    }

    /// Crew time for this task.
    ///
    /// ```rust
    /// use estimate_core::estimate::prep::PrepTask;
    /// use estimate_core::input::PrepItemInput;
    /// use estimate_core::rates::RateBook;
    ///
    /// let caulk = PrepTask::from_input(&PrepItemInput::new("caulk", 240.0));
    /// assert_eq!(caulk.hours(&RateBook::default()).value(), 2.0);
    /// ```
    pub fn hours(&self, rates: &RateBook) -> LaborHours {
        let prep = &rates.prep;
        match *self {
            PrepTask::MinorPatch { count, minutes_each } => {
                LaborHours::from_minutes(minutes_each.unwrap_or(prep.minor_patch_minutes) * count)
            }
            PrepTask::SpotPrime { count, minutes_each } => {
                LaborHours::from_minutes(minutes_each.unwrap_or(prep.spot_prime_minutes) * count)
            }
            PrepTask::MajorPatch { sqft, rate } => {
                LaborHours(sqft / rate.unwrap_or(prep.major_patch_rate))
            }
            PrepTask::Caulk { linear_ft, rate } => {
                LaborHours(linear_ft / rate.unwrap_or(prep.caulk_rate))
            }
            PrepTask::Masking { linear_ft, rate } => {
                LaborHours(linear_ft / rate.unwrap_or(prep.masking_rate))
            }
            PrepTask::FloorProtection { sqft, rate } => {
                LaborHours(sqft / rate.unwrap_or(prep.floor_protection_rate))
            }
            PrepTask::Unrecognized { .. } => LaborHours(0.0),
        }
    }
}
