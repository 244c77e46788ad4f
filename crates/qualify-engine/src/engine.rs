//! Core qualification engine

use crate::config::EngineConfig;
use crate::coordinator::{
    estimate_dimensions, estimate_predictive, estimate_risk, estimate_strategy,
};
use crate::error::QualificationError;
use crate::oracle::{AnalysisOracle, OracleContext};
use qualify_domain::benchmark;
use qualify_domain::{Lead, QualificationResult};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Qualifies leads against an analysis oracle
///
/// Holds no per-run state; one engine may serve any number of concurrent runs.
/// Cloning is cheap and shares the oracle.
pub struct QualificationEngine<O: AnalysisOracle> {
    oracle: Arc<O>,
    config: EngineConfig,
}

impl<O: AnalysisOracle> Clone for QualificationEngine<O> {
    fn clone(&self) -> Self {
        Self {
            oracle: Arc::clone(&self.oracle),
            config: self.config.clone(),
        }
    }
}

impl<O: AnalysisOracle> QualificationEngine<O> {
    /// Create a new engine
    ///
    /// # Errors
    ///
    /// Returns `QualificationError::Config` if the configuration is invalid.
    pub fn new(oracle: O, config: EngineConfig) -> Result<Self, QualificationError> {
        config.validate().map_err(QualificationError::Config)?;
        Ok(Self {
            oracle: Arc::new(oracle),
            config,
        })
    }

    /// The engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The analysis oracle
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Qualify one lead
    ///
    /// Oracle failures never surface here: each failed item takes its default.
    /// Dropping the returned future cancels every in-flight oracle call.
    ///
    /// # Errors
    ///
    /// Returns `QualificationError::Scoring` only if the assembled inputs are
    /// structurally invalid.
    pub async fn qualify(&self, lead: &Lead) -> Result<QualificationResult, QualificationError> {
        let run_id = Uuid::now_v7();
        let span = info_span!("qualification", lead_id = %lead.id, run_id = %run_id);
        self.run(lead).instrument(span).await
    }

    async fn run(&self, lead: &Lead) -> Result<QualificationResult, QualificationError> {
        let started = Instant::now();
        let oracle = self.oracle.as_ref();
        let config = &self.config;

        let benchmark = benchmark::lookup(&config.industry_benchmarks, &lead.industry);
        let base = OracleContext::new(benchmark);

        info!(
            industry = %lead.industry,
            has_benchmark = benchmark.is_some(),
            staged = config.staged_context,
            "qualification started"
        );

        let (dimensions, predictive_metrics, risk_assessment, engagement_strategy) =
            if config.staged_context {
                let dimensions = estimate_dimensions(oracle, lead, &base, config).await;
                let with_dimensions = base.with_dimensions(&dimensions);
                let (metrics, risk) = tokio::join!(
                    estimate_predictive(oracle, lead, &with_dimensions, config),
                    estimate_risk(oracle, lead, &with_dimensions, config),
                );
                let strategy = estimate_strategy(
                    oracle,
                    lead,
                    &with_dimensions.with_predictive_metrics(&metrics),
                    config,
                )
                .await;
                (dimensions, metrics, risk, strategy)
            } else {
                tokio::join!(
                    estimate_dimensions(oracle, lead, &base, config),
                    estimate_predictive(oracle, lead, &base, config),
                    estimate_risk(oracle, lead, &base, config),
                    estimate_strategy(oracle, lead, &base, config),
                )
            };

        let result = QualificationResult::assemble(
            lead.id.clone(),
            dimensions,
            predictive_metrics,
            risk_assessment,
            engagement_strategy,
        )?;

        info!(
            overall_score = result.overall_score,
            confidence = result.confidence_level,
            priority = %result.priority_level,
            insights = result.actionable_insights.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "qualification finished"
        );

        Ok(result)
    }
}
