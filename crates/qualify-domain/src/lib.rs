//! Qualify Domain Layer
//!
//! This crate holds the deterministic core of lead qualification: the data model,
//! the fixed dimension weight table, and the rules that turn per-dimension
//! estimates into one bounded verdict. It performs no I/O and knows nothing about
//! how estimates are produced.
//!
//! ## Key Concepts
//!
//! - **Dimension**: one named axis of lead fitness with a score, confidence and factors
//! - **Factor**: a single piece of evidence behind a dimension
//! - **Predictive metrics / risk assessment**: forward-looking numbers that adjust the score
//! - **Priority level**: the final tier (critical → disqualified)
//! - **Insight**: a ranked, actionable recommendation
//!
//! ## Pipeline
//!
//! ```text
//! estimates → normalise (clamp, default) → aggregate → classify → insights
//! ```
//!
//! Every estimate type has a normaliser (`from_estimate`) that clamps values into
//! their declared range and fills missing fields from [`defaults`]. The aggregator
//! in [`scoring`] clamps again, so a [`QualificationResult`] is always range-valid.
//!
//! ```
//! use qualify_domain::{Dimension, DimensionName, PredictiveMetrics, RiskAssessment};
//! use qualify_domain::{EngagementStrategy, PriorityLevel, QualificationResult};
//!
//! let dimensions: Vec<_> = DimensionName::ALL.iter().map(|n| Dimension::neutral(*n)).collect();
//! let result = QualificationResult::assemble(
//!     "lead-1",
//!     dimensions,
//!     PredictiveMetrics::default(),
//!     RiskAssessment::default(),
//!     EngagementStrategy::default(),
//! ).unwrap();
//!
//! assert!((result.overall_score - 58.3).abs() < 1e-9);
//! assert_eq!(result.priority_level, PriorityLevel::Medium);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod benchmark;
pub mod defaults;
pub mod dimension;
pub mod error;
pub mod insight;
pub mod lead;
pub mod metrics;
pub mod priority;
pub mod result;
pub mod risk;
pub mod scoring;
pub mod strategy;

// Re-exports for convenience
pub use benchmark::IndustryBenchmark;
pub use dimension::{Dimension, DimensionEstimate, DimensionName, Factor};
pub use error::ScoringError;
pub use insight::{Effort, Impact, Insight, InsightPriority};
pub use lead::Lead;
pub use metrics::{PredictiveEstimate, PredictiveMetrics};
pub use priority::PriorityLevel;
pub use result::QualificationResult;
pub use risk::{RiskAssessment, RiskEstimate};
pub use scoring::Scorecard;
pub use strategy::{
    EngagementStrategy, PersonalizationElement, StrategyEstimate, TimingEstimate, TimingStrategy,
};

/// Clamp `value` into `[min, max]`, mapping NaN to `min` (unlike `f64::clamp`).
pub(crate) fn bounded(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// Round a derived score onto a 1e-9 grid, so a decimal mean or sum such as
/// 0.3 or 85.0 lands exactly on a classifier threshold.
pub(crate) fn snapped(value: f64) -> f64 {
    const GRID: f64 = 1e9;
    (value * GRID).round() / GRID
}
