//! # Unit Types
//!
//! Lightweight newtype wrappers for the quantities an estimate moves between:
//! paintable area, linear runs of trim, paint volume and crew time.
//!
//! ## Design Philosophy
//!
//! Plain f64 wrappers rather than a units library:
//! - Estimating only ever uses a handful of US customary units
//! - JSON serialization stays clean (just numbers)
//! - Rate conversions are explicit methods, so "sqft / gallons-per-sqft" can't
//!   be mixed up with "sqft / sqft-per-hour"
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::units::{SqFt, LinearFeet};
//!
//! let wall = SqFt(350.0);
//! assert_eq!(wall.hours_at(175.0).value(), 2.0);
//! assert_eq!(wall.gallons_at(350.0).value(), 1.0);
//!
//! let baseboard = LinearFeet(120.0);
//! assert_eq!(baseboard.hours_at(60.0).value(), 2.0);
//! ```

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

// ============================================================================
// Extent Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

/// Length in linear feet (trim, caulk beads, masking runs)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinearFeet(pub f64);

impl SqFt {
    /// Crew time to cover this area once at `sqft_per_hour`
    pub fn hours_at(self, sqft_per_hour: f64) -> LaborHours {
        LaborHours(self.0 / sqft_per_hour)
    }

    /// Paint needed to cover this area once at `sqft_per_gallon`
    pub fn gallons_at(self, sqft_per_gallon: f64) -> Gallons {
        Gallons(self.0 / sqft_per_gallon)
    }

    /// Clamp negative areas (over-subtracted openings) to zero
    pub fn at_least_zero(self) -> Self {
        SqFt(self.0.max(0.0))
    }
}

impl LinearFeet {
    /// Crew time to run this length once at `feet_per_hour`
    pub fn hours_at(self, feet_per_hour: f64) -> LaborHours {
        LaborHours(self.0 / feet_per_hour)
    }
}

// ============================================================================
// Consumption Units
// ============================================================================

/// Paint volume in US gallons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gallons(pub f64);

/// Crew labor in hours
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaborHours(pub f64);

impl LaborHours {
    /// Convert a minute count into hours
    pub fn from_minutes(minutes: f64) -> Self {
        LaborHours(minutes / 60.0)
    }
}

impl Gallons {
    /// Round up to the next half gallon (purchasing granularity)
    ///
    /// ```rust
    /// use estimate_core::units::Gallons;
    /// assert_eq!(Gallons(3.2).ceil_to_half().value(), 3.5);
    /// assert_eq!(Gallons(4.0).ceil_to_half().value(), 4.0);
    /// ```
    pub fn ceil_to_half(self) -> Self {
        Gallons((self.0 * 2.0).ceil() / 2.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl AddAssign for $type {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self(0.0), |acc, x| acc + x)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(SqFt);
impl_arithmetic!(LinearFeet);
impl_arithmetic!(Gallons);
impl_arithmetic!(LaborHours);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_conversions() {
        assert_eq!(SqFt(400.0).hours_at(200.0).value(), 2.0);
        assert_eq!(SqFt(700.0).gallons_at(350.0).value(), 2.0);
        assert_eq!(LinearFeet(160.0).hours_at(80.0).value(), 2.0);
        assert_eq!(LaborHours::from_minutes(90.0).value(), 1.5);
    }

    #[test]
    fn test_ceil_to_half() {
        assert_eq!(Gallons(0.0).ceil_to_half().value(), 0.0);
        assert_eq!(Gallons(0.01).ceil_to_half().value(), 0.5);
        assert_eq!(Gallons(3.981).ceil_to_half().value(), 4.0);
        assert_eq!(Gallons(4.5).ceil_to_half().value(), 4.5);
    }

    #[test]
    fn test_arithmetic() {
        let mut hours = LaborHours(1.5);
        hours += LaborHours(0.5);
        assert_eq!(hours.value(), 2.0);
        assert_eq!((SqFt(10.0) - SqFt(15.0)).at_least_zero().value(), 0.0);
        assert_eq!((Gallons(1.0) * 1.1).value(), 1.1);

        let total: LaborHours = [LaborHours(1.0), LaborHours(2.5)].into_iter().sum();
        assert_eq!(total.value(), 3.5);
    }

    #[test]
    fn test_serialization() {
        let area = SqFt(332.5);
        let json = serde_json::to_string(&area).unwrap();
        assert_eq!(json, "332.5");

        let roundtrip: SqFt = serde_json::from_str(&json).unwrap();
        assert_eq!(area, roundtrip);
    }
}
