//! # Lenient Numbers
//!
//! Estimate payloads come from web forms: numbers arrive as JSON numbers,
//! numeric strings (`"12"`, `"12.5 ft"`), blanks, or garbage. The engine's
//! policy is best-effort: anything that doesn't read as a number falls back to
//! the documented default for that field. [`Loose`] is the single place where
//! that reading happens, and it keeps enough of the raw input around for
//! [`crate::validation`] to report what was discarded.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::numeric::{Loose, number_or_default};
//! use serde_json::json;
//!
//! assert_eq!(number_or_default(&json!("12ft"), 0.0), 12.0);
//! assert_eq!(number_or_default(&json!("abc"), 35.0), 35.0);
//!
//! let coats: Loose = serde_json::from_value(json!("3")).unwrap();
//! assert_eq!(coats.positive_or(2.0), 3.0);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A numeric input read leniently.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loose {
    /// Absent, `null`, or a blank string
    #[default]
    Missing,
    /// A finite number (possibly parsed from a string)
    Value(f64),
    /// Present but unreadable; holds the raw text
    Invalid(String),
}

impl Loose {
    /// Classify a raw JSON value.
    pub fn from_json(raw: &Value) -> Self {
        match raw {
            Value::Null => Loose::Missing,
            Value::Number(n) => match n.as_f64() {
                Some(v) if v.is_finite() => Loose::Value(v),
                _ => Loose::Invalid(n.to_string()),
            },
            Value::String(s) if s.trim().is_empty() => Loose::Missing,
            Value::String(s) => match parse_leading_float(s) {
                Some(v) => Loose::Value(v),
                None => Loose::Invalid(s.clone()),
            },
            other => Loose::Invalid(other.to_string()),
        }
    }

    /// The parsed number, if there is one
    pub fn value(&self) -> Option<f64> {
        match self {
            Loose::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// The parsed number if it is zero or greater
    pub fn non_negative(&self) -> Option<f64> {
        self.value().filter(|v| *v >= 0.0).map(normalize_zero)
    }

    /// The parsed number if it is strictly greater than zero
    pub fn positive(&self) -> Option<f64> {
        self.value().filter(|v| *v > 0.0)
    }

    pub fn or(&self, fallback: f64) -> f64 {
        self.value().unwrap_or(fallback)
    }

    /// Value if `>= 0`, else `fallback`
    pub fn non_negative_or(&self, fallback: f64) -> f64 {
        self.non_negative().unwrap_or(fallback)
    }

    /// Value if `> 0`, else `fallback`.
    ///
    /// Used for rates and counts where zero would mean "divide by zero" or
    /// "no coats", which the form never intends.
    pub fn positive_or(&self, fallback: f64) -> f64 {
        self.positive().unwrap_or(fallback)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Loose::Missing)
    }
}

impl From<f64> for Loose {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Loose::Value(value)
        } else {
            Loose::Invalid(value.to_string())
        }
    }
}

impl<'de> Deserialize<'de> for Loose {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(Loose::from_json(&raw))
    }
}

impl Serialize for Loose {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Loose::Missing => serializer.serialize_none(),
            Loose::Value(v) => serializer.serialize_f64(*v),
            Loose::Invalid(raw) => serializer.serialize_str(raw),
        }
    }
}

/// A boolean input read leniently (checkboxes arrive as `true`, `"on"`, `1`...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Flag(pub bool);

impl Flag {
    pub fn from_json(raw: &Value) -> Self {
        let set = match raw {
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            Value::String(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            ),
            _ => false,
        };
        Flag(set)
    }

    pub fn is_set(self) -> bool {
        self.0
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(Flag::from_json(&raw))
    }
}

/// Read `raw` as a number, substituting `fallback` when it isn't one.
pub fn number_or_default(raw: &Value, fallback: f64) -> f64 {
    Loose::from_json(raw).or(fallback)
}

/// Parse the longest numeric prefix of `s` (sign, digits, fraction, exponent).
///
/// Returns `None` when no digits lead the string or the result isn't finite.
pub fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

// -0.0 reads as "zero" everywhere downstream
fn normalize_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leading_float() {
        assert_eq!(parse_leading_float("12"), Some(12.0));
        assert_eq!(parse_leading_float("  12.5ft"), Some(12.5));
        assert_eq!(parse_leading_float("-3"), Some(-3.0));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("7."), Some(7.0));
        assert_eq!(parse_leading_float("1e2 sqft"), Some(100.0));
        assert_eq!(parse_leading_float("2e"), Some(2.0));
        assert_eq!(parse_leading_float("abc"), None);
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float("1e999"), None);
    }

    #[test]
    fn test_classification() {
        assert_eq!(Loose::from_json(&json!(null)), Loose::Missing);
        assert_eq!(Loose::from_json(&json!("  ")), Loose::Missing);
        assert_eq!(Loose::from_json(&json!(4)), Loose::Value(4.0));
        assert_eq!(Loose::from_json(&json!("4 gal")), Loose::Value(4.0));
        assert_eq!(Loose::from_json(&json!("n/a")), Loose::Invalid("n/a".to_string()));
        assert_eq!(Loose::from_json(&json!(true)), Loose::Invalid("true".to_string()));
        assert!(matches!(Loose::from_json(&json!([1])), Loose::Invalid(_)));
    }

    #[test]
    fn test_defaulting_policy() {
        assert_eq!(Loose::Missing.or(35.0), 35.0);
        assert_eq!(Loose::Value(-2.0).non_negative_or(10.0), 10.0);
        assert_eq!(Loose::Value(0.0).non_negative_or(10.0), 0.0);
        assert_eq!(Loose::Value(0.0).positive_or(175.0), 175.0);
        assert_eq!(Loose::Invalid("x".into()).positive_or(175.0), 175.0);
        assert!(Loose::Value(-0.0).non_negative().unwrap().is_sign_positive());
    }

    #[test]
    fn test_number_or_default() {
        assert_eq!(number_or_default(&json!(42), 0.0), 42.0);
        assert_eq!(number_or_default(&json!({}), 5.0), 5.0);
        assert_eq!(number_or_default(&json!(""), 5.0), 5.0);
    }

    #[test]
    fn test_deserialize_in_struct() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default)]
            length: Loose,
            #[serde(default)]
            width: Loose,
            #[serde(default)]
            primer: Flag,
        }

        let row: Row = serde_json::from_value(json!({ "length": "10", "primer": "on" })).unwrap();
        assert_eq!(row.length.value(), Some(10.0));
        assert!(row.width.is_missing());
        assert!(row.primer.is_set());
    }

    #[test]
    fn test_flag_values() {
        assert!(Flag::from_json(&json!(1)).is_set());
        assert!(Flag::from_json(&json!("Yes")).is_set());
        assert!(!Flag::from_json(&json!("no")).is_set());
        assert!(!Flag::from_json(&json!(0)).is_set());
        assert!(!Flag::from_json(&json!(null)).is_set());
    }

    #[test]
    fn test_serialize_preserves_shape() {
        assert_eq!(serde_json::to_value(Loose::Missing).unwrap(), json!(null));
        assert_eq!(serde_json::to_value(Loose::Value(2.5)).unwrap(), json!(2.5));
        assert_eq!(serde_json::to_value(Loose::Invalid("n/a".into())).unwrap(), json!("n/a"));
    }
}
