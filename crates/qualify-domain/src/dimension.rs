//! Qualification dimensions, their weights, and the estimate normaliser

use crate::defaults::{
    NEUTRAL_DIMENSION_CONFIDENCE, NEUTRAL_DIMENSION_SCORE, UNLISTED_DIMENSION_WEIGHT,
    UNSTATED_DIMENSION_CONFIDENCE,
};
use crate::bounded;
use serde::Serialize;
use std::fmt;

/// A named axis of lead fitness
///
/// The set is closed: every qualification run evaluates all ten, in the order
/// given by [`DimensionName::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionName {
    /// How acutely the lead feels the problem being sold against
    PainIntensity,
    /// Ability to pay
    FinancialCapacity,
    /// Access to whoever signs
    DecisionAuthority,
    /// Fit of the current tech stack and digital maturity
    TechnicalReadiness,
    /// Competitive pressure on the lead
    CompetitiveLandscape,
    /// How soon the lead needs to act
    TimingUrgency,
    /// Effort to onboard the lead
    ImplementationComplexity,
    /// Direction of the lead's business
    GrowthTrajectory,
    /// Regulatory exposure
    ComplianceRisk,
    /// Strength of the lead's market position
    MarketPositioning,
}

impl DimensionName {
    /// Every dimension, in evaluation and output order
    pub const ALL: [DimensionName; 10] = [
        DimensionName::PainIntensity,
        DimensionName::FinancialCapacity,
        DimensionName::DecisionAuthority,
        DimensionName::TechnicalReadiness,
        DimensionName::CompetitiveLandscape,
        DimensionName::TimingUrgency,
        DimensionName::ImplementationComplexity,
        DimensionName::GrowthTrajectory,
        DimensionName::ComplianceRisk,
        DimensionName::MarketPositioning,
    ];

    /// Get the dimension name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionName::PainIntensity => "pain_intensity",
            DimensionName::FinancialCapacity => "financial_capacity",
            DimensionName::DecisionAuthority => "decision_authority",
            DimensionName::TechnicalReadiness => "technical_readiness",
            DimensionName::CompetitiveLandscape => "competitive_landscape",
            DimensionName::TimingUrgency => "timing_urgency",
            DimensionName::ImplementationComplexity => "implementation_complexity",
            DimensionName::GrowthTrajectory => "growth_trajectory",
            DimensionName::ComplianceRisk => "compliance_risk",
            DimensionName::MarketPositioning => "market_positioning",
        }
    }

    /// Parse a dimension from its snake_case name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.as_str() == s)
    }

    /// Weight of this dimension in the overall score
    ///
    /// The table lists seven dimensions explicitly. Growth trajectory, compliance
    /// risk and market positioning have no entry and take the unlisted weight, so
    /// the weights sum to 1.15 rather than 1.0.
    pub fn weight(&self) -> f64 {
        match self {
            DimensionName::PainIntensity => 0.25,
            DimensionName::FinancialCapacity => 0.20,
            DimensionName::DecisionAuthority => 0.15,
            DimensionName::CompetitiveLandscape => 0.15,
            DimensionName::TechnicalReadiness => 0.10,
            DimensionName::TimingUrgency => 0.10,
            DimensionName::ImplementationComplexity => 0.05,
            DimensionName::GrowthTrajectory
            | DimensionName::ComplianceRisk
            | DimensionName::MarketPositioning => UNLISTED_DIMENSION_WEIGHT,
        }
    }

    /// Whether this dimension has its own entry in the weight table
    pub fn has_listed_weight(&self) -> bool {
        !matches!(
            self,
            DimensionName::GrowthTrajectory
                | DimensionName::ComplianceRisk
                | DimensionName::MarketPositioning
        )
    }
}

impl fmt::Display for DimensionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DimensionName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid dimension: {}", s))
    }
}

/// Weight for an arbitrary dimension name, falling back to the unlisted weight
pub fn dimension_weight(name: &str) -> f64 {
    DimensionName::parse(name)
        .map(|d| d.weight())
        .unwrap_or(UNLISTED_DIMENSION_WEIGHT)
}

/// A single piece of evidence behind a dimension score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factor {
    /// Factor name (e.g. `review_volume_deficit`)
    pub name: String,
    /// Contribution to the dimension score [0, 100]
    pub impact: f64,
    /// Supporting observations
    pub evidence: Vec<String>,
    /// Where the evidence came from
    pub source: String,
    /// Trust in the source [0.0, 1.0]
    pub reliability: f64,
}

impl Factor {
    /// Create a factor, clamping impact and reliability into range
    pub fn new(
        name: impl Into<String>,
        impact: f64,
        evidence: Vec<String>,
        source: impl Into<String>,
        reliability: f64,
    ) -> Self {
        Self {
            name: name.into(),
            impact: bounded(impact, 0.0, 100.0),
            evidence,
            source: source.into(),
            reliability: bounded(reliability, 0.0, 1.0),
        }
    }
}

/// Raw per-dimension estimate as returned by an analysis oracle
///
/// Any field may be absent; [`Dimension::from_estimate`] fills the gaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DimensionEstimate {
    /// Score as stated by the oracle
    pub score: Option<f64>,
    /// Confidence as stated by the oracle
    pub confidence: Option<f64>,
    /// Supporting factors
    pub factors: Vec<Factor>,
}

/// A scored qualification dimension
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dimension {
    /// Which dimension this is
    pub name: DimensionName,
    /// Score [0, 100]
    pub score: f64,
    /// Confidence in the score [0.0, 1.0]
    pub confidence: f64,
    /// Evidence behind the score
    pub factors: Vec<Factor>,
    /// Weight from the fixed table, never from the oracle
    pub weight: f64,
}

impl Dimension {
    /// Neutral record substituted when the oracle fails for this dimension
    pub fn neutral(name: DimensionName) -> Self {
        Self {
            name,
            score: NEUTRAL_DIMENSION_SCORE,
            confidence: NEUTRAL_DIMENSION_CONFIDENCE,
            factors: Vec::new(),
            weight: name.weight(),
        }
    }

    /// Normalise a raw estimate into a range-valid dimension
    ///
    /// - stated score is clamped; otherwise it is computed from the factors
    /// - stated confidence is clamped; otherwise it is the mean factor reliability,
    ///   or the unstated-confidence default when there are no factors
    pub fn from_estimate(name: DimensionName, estimate: DimensionEstimate) -> Self {
        let factors: Vec<Factor> = estimate
            .factors
            .into_iter()
            .map(|f| Factor::new(f.name, f.impact, f.evidence, f.source, f.reliability))
            .collect();

        let score = match estimate.score.filter(|s| s.is_finite()) {
            Some(score) => bounded(score, 0.0, 100.0),
            None => compute_dimension_score(&factors),
        };

        let confidence = match estimate.confidence.filter(|c| c.is_finite()) {
            Some(confidence) => bounded(confidence, 0.0, 1.0),
            None => compute_dimension_confidence(&factors, UNSTATED_DIMENSION_CONFIDENCE),
        };

        Self {
            name,
            score,
            confidence,
            factors,
            weight: name.weight(),
        }
    }

    /// Mean reliability of this dimension's factors, if it has any
    pub fn mean_reliability(&self) -> Option<f64> {
        if self.factors.is_empty() {
            return None;
        }
        let sum: f64 = self.factors.iter().map(|f| f.reliability).sum();
        Some(sum / self.factors.len() as f64)
    }
}

/// Reliability-weighted mean of factor impacts
///
/// `Σ(impact × reliability) / Σ(reliability)`, or the neutral score when the
/// list is empty or every factor has zero reliability.
pub fn compute_dimension_score(factors: &[Factor]) -> f64 {
    let total_weight: f64 = factors.iter().map(|f| f.reliability).sum();
    if total_weight <= 0.0 {
        return NEUTRAL_DIMENSION_SCORE;
    }
    let weighted_sum: f64 = factors.iter().map(|f| f.impact * f.reliability).sum();
    bounded(weighted_sum / total_weight, 0.0, 100.0)
}

/// Mean factor reliability, or `fallback` when there are no factors
pub fn compute_dimension_confidence(factors: &[Factor], fallback: f64) -> f64 {
    if factors.is_empty() {
        return bounded(fallback, 0.0, 1.0);
    }
    let sum: f64 = factors.iter().map(|f| f.reliability).sum();
    bounded(sum / factors.len() as f64, 0.0, 1.0)
}
