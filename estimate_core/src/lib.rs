//! # estimate_core - Painting Estimate Engine
//!
//! `estimate_core` is the computational heart of Coatwise. It turns a list of
//! rooms (areas), their paintable surfaces and prep work into labor hours,
//! paint volume and a price. Everything going in and out is JSON-serializable
//! so the engine can sit behind an HTTP route, a CLI, or an assistant tool.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: computation is a pure function of settings, rates and areas
//! - **Forgiving**: unreadable numbers fall back to defaults instead of failing
//! - **Typed inside**: the loose wire records are parsed into tagged variants
//!   before any arithmetic happens
//! - **Strict on request**: [`validation`] reports everything the engine
//!   silently absorbed
//!
//! ## Quick Start
//!
//! ```rust
//! use estimate_core::estimate::Estimator;
//! use estimate_core::input::EstimateRequest;
//! use estimate_core::settings::SettingsOverrides;
//!
//! let request: EstimateRequest = serde_json::from_str(r#"{
//!     "settings": { "markupPct": 20 },
//!     "areas": [{
//!         "name": "Bedroom",
//!         "length": 12, "width": 11, "height": 8,
//!         "surfaces": [{ "surfaceType": "walls" }, { "surfaceType": "ceiling" }]
//!     }]
//! }"#).unwrap();
//!
//! let report = Estimator::default().quote(&request, &SettingsOverrides::default());
//! assert_eq!(report.areas.len(), 1);
//! assert!(report.totals.grand_total > report.totals.price_before_tax);
//! ```
//!
//! ## Modules
//!
//! - [`input`] - Wire records exactly as posted
//! - [`numeric`] - Lenient number and boolean parsing
//! - [`settings`] - Pricing settings and the three-layer merge
//! - [`rates`] - Production and coverage rate book
//! - [`estimate`] - Typed surfaces and prep, the estimator, pricing roll-up
//! - [`validation`] - Strict checks for silently-defaulted input
//! - [`document`] - Saved estimates
//! - [`file_io`] - Atomic saves and edit locking
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod document;
pub mod errors;
pub mod estimate;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod input;
pub mod numeric;
pub mod rates;
pub mod settings;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use document::EstimateDocument;
pub use errors::{CalcResult, EstimateError};
pub use estimate::{compute_totals, EstimateReport, EstimateTotals, Estimator};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_document, load_request, save_document, DocumentLock};
pub use input::{AreaInput, EstimateRequest, PrepItemInput, SurfaceInput};
pub use rates::RateBook;
pub use settings::{EstimateSettings, SettingsOverrides};
pub use validation::{validate_request, IssueKind, ValidationIssue};
