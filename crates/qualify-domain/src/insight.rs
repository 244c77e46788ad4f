//! Rule-based actionable insights

use crate::{Dimension, PredictiveMetrics, RiskAssessment};
use serde::Serialize;
use std::cmp::Reverse;

/// Dimension score at or above which a leverage insight is emitted
pub const LEVERAGE_THRESHOLD: f64 = 70.0;
/// Dimension score at or below which a barrier insight is emitted
pub const BARRIER_THRESHOLD: f64 = 30.0;
/// Conversion probability at or above which immediate outreach is advised
pub const HIGH_CONVERSION_THRESHOLD: f64 = 0.7;
/// Days to conversion at or below which acceleration is advised
pub const FAST_CONVERSION_DAYS: f64 = 30.0;
/// Overall risk at or above which mitigation is advised
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// How soon an insight should be acted upon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightPriority {
    /// Act now
    Immediate,
    /// Act within days
    ShortTerm,
    /// Act within weeks
    MediumTerm,
    /// Act eventually
    LongTerm,
}

impl InsightPriority {
    /// Sort rank; higher ranks come first
    pub fn rank(&self) -> u8 {
        match self {
            InsightPriority::Immediate => 4,
            InsightPriority::ShortTerm => 3,
            InsightPriority::MediumTerm => 2,
            InsightPriority::LongTerm => 1,
        }
    }
}

/// Effort needed to act on an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    /// Little effort
    Low,
    /// Moderate effort
    Medium,
    /// Significant effort
    High,
}

/// Expected payoff of acting on an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    /// Small payoff
    Low,
    /// Moderate payoff
    Medium,
    /// Large payoff
    High,
}

/// An actionable recommendation derived from a qualification run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    /// What was observed
    pub text: String,
    /// What to do about it
    pub recommended_action: String,
    /// How soon to act
    pub priority_bucket: InsightPriority,
    /// Effort required
    pub effort: Effort,
    /// Expected impact
    pub impact: Impact,
    /// Suggested timeline (e.g. `within_1_week`)
    pub timeline: String,
}

impl Insight {
    fn new(
        text: impl Into<String>,
        recommended_action: impl Into<String>,
        priority_bucket: InsightPriority,
        effort: Effort,
        impact: Impact,
        timeline: &str,
    ) -> Self {
        Self {
            text: text.into(),
            recommended_action: recommended_action.into(),
            priority_bucket,
            effort,
            impact,
            timeline: timeline.to_string(),
        }
    }

    fn leverage(dimension: &Dimension) -> Self {
        Self::new(
            format!("Strong {} signals detected", dimension.name),
            format!("Leverage {} in primary messaging", dimension.name),
            InsightPriority::ShortTerm,
            Effort::Low,
            Impact::Medium,
            "within_1_week",
        )
    }

    fn barrier(dimension: &Dimension) -> Self {
        Self::new(
            format!("{} presents challenges", dimension.name),
            format!("Address {} concerns before pitching", dimension.name),
            InsightPriority::MediumTerm,
            Effort::Medium,
            Impact::Medium,
            "within_2_weeks",
        )
    }
}

/// Generate insights, ordered by priority rank (stable for equal ranks)
///
/// Generation order: per-dimension leverage/barrier insights in dimension order,
/// then high conversion, fast conversion, high risk.
pub fn generate_insights(
    dimensions: &[Dimension],
    metrics: &PredictiveMetrics,
    risk: &RiskAssessment,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    for dimension in dimensions {
        if dimension.score >= LEVERAGE_THRESHOLD {
            insights.push(Insight::leverage(dimension));
        } else if dimension.score <= BARRIER_THRESHOLD {
            insights.push(Insight::barrier(dimension));
        }
    }

    if metrics.conversion_probability >= HIGH_CONVERSION_THRESHOLD {
        insights.push(Insight::new(
            "High conversion probability detected",
            "Prioritize immediate outreach with premium offering",
            InsightPriority::Immediate,
            Effort::Medium,
            Impact::High,
            "within_24_hours",
        ));
    }

    if metrics.time_to_conversion_days <= FAST_CONVERSION_DAYS {
        insights.push(Insight::new(
            "Fast conversion timeline predicted",
            "Accelerate engagement with decision-maker focused approach",
            InsightPriority::Immediate,
            Effort::High,
            Impact::High,
            "within_1_week",
        ));
    }

    if risk.overall_risk_score() >= HIGH_RISK_THRESHOLD {
        insights.push(Insight::new(
            "High overall risk detected",
            "Implement risk mitigation strategies before proposal",
            InsightPriority::ShortTerm,
            Effort::Medium,
            Impact::Medium,
            "within_2_weeks",
        ));
    }

    // sort_by_key is stable
    insights.sort_by_key(|insight| Reverse(insight.priority_bucket.rank()));
    insights
}
