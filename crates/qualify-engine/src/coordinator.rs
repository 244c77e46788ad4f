//! Oracle call coordination: fan-out, per-call timeouts and default substitution
//!
//! Every function here is infallible. A failed, late or malformed oracle call is
//! logged and replaced by the documented default for its item.

use crate::config::EngineConfig;
use crate::error::OracleError;
use crate::oracle::{AnalysisOracle, OracleContext, OracleItem};
use futures::stream::{self, StreamExt};
use qualify_domain::{
    Dimension, DimensionName, EngagementStrategy, Lead, PredictiveMetrics, RiskAssessment,
};
use std::future::Future;
use std::time::Duration;
use tokio::time::{timeout, Instant};
use tracing::{debug, warn};

/// Estimate all ten dimensions concurrently
///
/// At most `max_concurrent_dimension_calls` requests are in flight. Output order
/// is [`DimensionName::ALL`] whatever order the calls complete in.
pub async fn estimate_dimensions<O>(
    oracle: &O,
    lead: &Lead,
    context: &OracleContext<'_>,
    config: &EngineConfig,
) -> Vec<Dimension>
where
    O: AnalysisOracle + ?Sized,
{
    stream::iter(DimensionName::ALL)
        .map(|name| async move {
            let item = OracleItem::Dimension(name);
            let call = oracle.estimate_dimension(name, lead, context);
            match guarded(item, config.oracle_timeout(), call).await {
                Ok(estimate) => Dimension::from_estimate(name, estimate),
                Err(e) => {
                    warn!(item = %item, error = %e, "dimension estimate failed, using neutral default");
                    Dimension::neutral(name)
                }
            }
        })
        .buffered(config.max_concurrent_dimension_calls)
        .collect()
        .await
}

/// Predict metrics, falling back to the default metrics
pub async fn estimate_predictive<O>(
    oracle: &O,
    lead: &Lead,
    context: &OracleContext<'_>,
    config: &EngineConfig,
) -> PredictiveMetrics
where
    O: AnalysisOracle + ?Sized,
{
    let item = OracleItem::PredictiveMetrics;
    match guarded(item, config.oracle_timeout(), oracle.predict_metrics(lead, context)).await {
        Ok(estimate) => PredictiveMetrics::from_estimate(estimate),
        Err(e) => {
            warn!(item = %item, error = %e, "predictive estimate failed, using defaults");
            PredictiveMetrics::default()
        }
    }
}

/// Assess risk, falling back to the heuristic risk profile
pub async fn estimate_risk<O>(
    oracle: &O,
    lead: &Lead,
    context: &OracleContext<'_>,
    config: &EngineConfig,
) -> RiskAssessment
where
    O: AnalysisOracle + ?Sized,
{
    let item = OracleItem::RiskAssessment;
    match guarded(item, config.oracle_timeout(), oracle.assess_risk(lead, context)).await {
        Ok(estimate) => RiskAssessment::from_estimate(estimate),
        Err(e) => {
            warn!(item = %item, error = %e, "risk assessment failed, using heuristic defaults");
            RiskAssessment::default()
        }
    }
}

/// Synthesize a strategy, falling back to the default strategy
///
/// Skips the request entirely when strategy synthesis is switched off.
pub async fn estimate_strategy<O>(
    oracle: &O,
    lead: &Lead,
    context: &OracleContext<'_>,
    config: &EngineConfig,
) -> EngagementStrategy
where
    O: AnalysisOracle + ?Sized,
{
    if !config.synthesize_strategy {
        return EngagementStrategy::default();
    }

    let item = OracleItem::EngagementStrategy;
    match guarded(item, config.oracle_timeout(), oracle.synthesize_strategy(lead, context)).await {
        Ok(estimate) => EngagementStrategy::from_estimate(estimate),
        Err(e) => {
            warn!(item = %item, error = %e, "strategy synthesis failed, using default strategy");
            EngagementStrategy::default()
        }
    }
}

/// Run one oracle call under a time limit
async fn guarded<T, F>(item: OracleItem, limit: Duration, call: F) -> Result<T, OracleError>
where
    F: Future<Output = Result<T, OracleError>>,
{
    let started = Instant::now();
    let outcome = match timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(OracleError::Timeout(limit)),
    };
    debug!(
        item = %item,
        elapsed_ms = started.elapsed().as_millis() as u64,
        ok = outcome.is_ok(),
        "oracle call finished"
    );
    outcome
}
