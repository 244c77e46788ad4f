//! Score aggregation
//!
//! Combines the dimension scores, the predictive metrics and the risk
//! assessment into one bounded score and a confidence level:
//!
//! ```text
//! overall    = clamp(Σ(score × weight) + conversion × 10 − risk × 15, 0, 100)
//! confidence = clamp(mean(confidence) × data_quality, 0, 1)
//! ```
//!
//! where `data_quality` is the mean over dimensions of their mean factor
//! reliability (1.0 for a dimension without factors).

use crate::defaults::FACTORLESS_DATA_QUALITY;
use crate::{bounded, snapped, Dimension, DimensionName, PredictiveMetrics, RiskAssessment, ScoringError};
use serde::Serialize;

/// Multiplier applied to the conversion probability
pub const PREDICTIVE_BONUS_FACTOR: f64 = 10.0;

/// Multiplier applied to the overall risk score
pub const RISK_PENALTY_FACTOR: f64 = 15.0;

/// Aggregated score and confidence of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scorecard {
    /// Overall score [0, 100]
    pub overall_score: f64,
    /// Confidence in the overall score [0.0, 1.0]
    pub confidence_level: f64,
}

/// Aggregate a complete run
///
/// # Errors
///
/// Fails when `dimensions` does not hold exactly one record per
/// [`DimensionName::ALL`] entry, in that order. Nothing else can fail here.
pub fn aggregate(
    dimensions: &[Dimension],
    metrics: &PredictiveMetrics,
    risk: &RiskAssessment,
) -> Result<Scorecard, ScoringError> {
    check_dimension_set(dimensions)?;

    Ok(Scorecard {
        overall_score: compute_overall_score(dimensions, metrics, risk),
        confidence_level: compute_confidence_level(dimensions),
    })
}

/// Verify the dimension list matches the fixed evaluation order
pub fn check_dimension_set(dimensions: &[Dimension]) -> Result<(), ScoringError> {
    if dimensions.len() != DimensionName::ALL.len() {
        return Err(ScoringError::AggregationInputMissing {
            expected: DimensionName::ALL.len(),
            found: dimensions.len(),
        });
    }

    for (position, (dimension, expected)) in
        dimensions.iter().zip(DimensionName::ALL.iter()).enumerate()
    {
        if dimension.name != *expected {
            return Err(ScoringError::DimensionOutOfOrder {
                position,
                expected: *expected,
                found: dimension.name,
            });
        }
    }

    Ok(())
}

/// Weighted dimension sum plus predictive bonus minus risk penalty, clamped
///
/// Each input is forced into range first; the weight always comes from the
/// table, whatever the record carries.
pub fn compute_overall_score(
    dimensions: &[Dimension],
    metrics: &PredictiveMetrics,
    risk: &RiskAssessment,
) -> f64 {
    let dimension_score: f64 = dimensions
        .iter()
        .map(|d| bounded(d.score, 0.0, 100.0) * d.name.weight())
        .sum();
    let predictive_bonus = bounded(metrics.conversion_probability, 0.0, 1.0) * PREDICTIVE_BONUS_FACTOR;
    let risk_penalty = bounded(risk.overall_risk_score(), 0.0, 1.0) * RISK_PENALTY_FACTOR;

    bounded(snapped(dimension_score + predictive_bonus - risk_penalty), 0.0, 100.0)
}

/// Mean dimension confidence scaled by data quality, clamped
pub fn compute_confidence_level(dimensions: &[Dimension]) -> f64 {
    if dimensions.is_empty() {
        return 0.0;
    }
    let count = dimensions.len() as f64;

    let avg_confidence: f64 = dimensions
        .iter()
        .map(|d| bounded(d.confidence, 0.0, 1.0))
        .sum::<f64>()
        / count;

    bounded(avg_confidence * data_quality_factor(dimensions), 0.0, 1.0)
}

/// Mean over dimensions of their mean factor reliability
pub fn data_quality_factor(dimensions: &[Dimension]) -> f64 {
    if dimensions.is_empty() {
        return FACTORLESS_DATA_QUALITY;
    }
    let total: f64 = dimensions
        .iter()
        .map(|d| {
            d.mean_reliability()
                .map(|r| bounded(r, 0.0, 1.0))
                .unwrap_or(FACTORLESS_DATA_QUALITY)
        })
        .sum();
    total / dimensions.len() as f64
}
