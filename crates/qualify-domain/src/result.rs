//! The qualification verdict

use crate::insight::generate_insights;
use crate::scoring::aggregate;
use crate::{
    bounded, Dimension, EngagementStrategy, Insight, PredictiveMetrics, PriorityLevel,
    RiskAssessment, ScoringError,
};
use serde::Serialize;

/// Complete outcome of qualifying one lead
///
/// Always range-valid: every dimension, metric and score sits inside its
/// declared range, dimensions are in [`crate::DimensionName::ALL`] order and
/// insights are sorted by priority rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualificationResult {
    /// Identifier of the qualified lead
    pub lead_id: String,
    /// Overall score [0, 100]
    pub overall_score: f64,
    /// Confidence in the overall score [0.0, 1.0]
    pub confidence_level: f64,
    /// The ten dimensions, in fixed order
    pub dimensions: Vec<Dimension>,
    /// Forward-looking metrics
    pub predictive_metrics: PredictiveMetrics,
    /// Risk profile
    pub risk_assessment: RiskAssessment,
    /// Recommended approach
    pub engagement_strategy: EngagementStrategy,
    /// Final tier
    pub priority_level: PriorityLevel,
    /// Ranked recommendations
    pub actionable_insights: Vec<Insight>,
}

impl QualificationResult {
    /// Build the verdict from normalised parts
    ///
    /// Forces every dimension and metric into range, aggregates, classifies and
    /// derives the insights. Fails only when the dimension list is structurally
    /// wrong.
    pub fn assemble(
        lead_id: impl Into<String>,
        dimensions: Vec<Dimension>,
        predictive_metrics: PredictiveMetrics,
        risk_assessment: RiskAssessment,
        engagement_strategy: EngagementStrategy,
    ) -> Result<Self, ScoringError> {
        let dimensions: Vec<Dimension> = dimensions
            .into_iter()
            .map(|mut d| {
                d.score = bounded(d.score, 0.0, 100.0);
                d.confidence = bounded(d.confidence, 0.0, 1.0);
                d.weight = d.name.weight();
                d
            })
            .collect();
        let predictive_metrics = predictive_metrics.bounded();

        let scorecard = aggregate(&dimensions, &predictive_metrics, &risk_assessment)?;
        let priority_level = PriorityLevel::classify(
            scorecard.overall_score,
            risk_assessment.overall_risk_score(),
        );
        let actionable_insights =
            generate_insights(&dimensions, &predictive_metrics, &risk_assessment);

        Ok(Self {
            lead_id: lead_id.into(),
            overall_score: scorecard.overall_score,
            confidence_level: scorecard.confidence_level,
            dimensions,
            predictive_metrics,
            risk_assessment,
            engagement_strategy,
            priority_level,
            actionable_insights,
        })
    }
}
