//! The analysis oracle seam

use crate::error::OracleError;
use async_trait::async_trait;
use qualify_domain::{
    Dimension, DimensionEstimate, DimensionName, IndustryBenchmark, Lead, PredictiveEstimate,
    PredictiveMetrics, RiskEstimate, StrategyEstimate,
};
use std::fmt;

/// The item an oracle request asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OracleItem {
    /// One qualification dimension
    Dimension(DimensionName),
    /// The predictive metrics
    PredictiveMetrics,
    /// The risk assessment
    RiskAssessment,
    /// The engagement strategy
    EngagementStrategy,
}

impl OracleItem {
    /// Wire identifier of the item
    pub fn as_str(&self) -> &'static str {
        match self {
            OracleItem::Dimension(name) => name.as_str(),
            OracleItem::PredictiveMetrics => "predictive_metrics",
            OracleItem::RiskAssessment => "risk_assessment",
            OracleItem::EngagementStrategy => "engagement_strategy",
        }
    }
}

impl fmt::Display for OracleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Already-known information handed to the oracle with a request
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleContext<'a> {
    /// Benchmark for the lead's industry, if one is configured
    pub benchmark: Option<&'a IndustryBenchmark>,
    /// Joined dimensions (staged runs only)
    pub dimensions: Option<&'a [Dimension]>,
    /// Predictive metrics (staged runs only)
    pub predictive_metrics: Option<&'a PredictiveMetrics>,
}

impl<'a> OracleContext<'a> {
    /// Context carrying only the industry benchmark
    pub fn new(benchmark: Option<&'a IndustryBenchmark>) -> Self {
        Self {
            benchmark,
            ..Self::default()
        }
    }

    /// Add the joined dimensions
    pub fn with_dimensions(mut self, dimensions: &'a [Dimension]) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Add the predictive metrics
    pub fn with_predictive_metrics(mut self, metrics: &'a PredictiveMetrics) -> Self {
        self.predictive_metrics = Some(metrics);
        self
    }
}

/// External analysis service answering one structured estimation request at a time
///
/// Implementations may be slow, fail or return garbage; the engine applies a
/// per-call timeout and substitutes defaults for every failure. Implementations
/// must be safe to call concurrently.
#[async_trait]
pub trait AnalysisOracle: Send + Sync {
    /// Estimate one dimension of a lead
    async fn estimate_dimension(
        &self,
        name: DimensionName,
        lead: &Lead,
        context: &OracleContext<'_>,
    ) -> Result<DimensionEstimate, OracleError>;

    /// Predict conversion and value metrics
    async fn predict_metrics(
        &self,
        lead: &Lead,
        context: &OracleContext<'_>,
    ) -> Result<PredictiveEstimate, OracleError>;

    /// Assess the five risk components
    async fn assess_risk(
        &self,
        lead: &Lead,
        context: &OracleContext<'_>,
    ) -> Result<RiskEstimate, OracleError>;

    /// Propose an engagement strategy
    async fn synthesize_strategy(
        &self,
        lead: &Lead,
        context: &OracleContext<'_>,
    ) -> Result<StrategyEstimate, OracleError>;
}
