//! Integration tests for the qualification engine over a stub oracle

use anyhow::Result;
use async_trait::async_trait;
use qualify_domain::{
    DimensionEstimate, DimensionName, Factor, Lead, PredictiveEstimate, PriorityLevel,
    RiskEstimate, StrategyEstimate,
};
use qualify_engine::{AnalysisOracle, EngineConfig, OracleContext, OracleError, QualificationEngine};
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// What a stub call does
#[derive(Clone, Copy)]
enum Mode {
    Answer,
    Fail,
    Hang,
}

/// Deterministic oracle with per-dimension scores and delays
#[derive(Clone)]
struct StubOracle {
    mode: Mode,
    scores: BTreeMap<DimensionName, f64>,
    delays: BTreeMap<DimensionName, Duration>,
    risk: RiskEstimate,
    predictive: PredictiveEstimate,
    started: Arc<AtomicUsize>,
    dropped: Arc<AtomicUsize>,
}

/// Counts calls that ended without finishing, i.e. were cancelled
struct CallGuard {
    dropped: Arc<AtomicUsize>,
    finished: bool,
}

impl Drop for CallGuard {
    fn drop(&mut self) {
        if !self.finished {
            self.dropped.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl StubOracle {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            scores: BTreeMap::new(),
            delays: BTreeMap::new(),
            risk: RiskEstimate::default(),
            predictive: PredictiveEstimate::default(),
            started: Arc::new(AtomicUsize::new(0)),
            dropped: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn with_score(mut self, name: DimensionName, score: f64) -> Self {
        self.scores.insert(name, score);
        self
    }

    fn with_delay(mut self, name: DimensionName, delay: Duration) -> Self {
        self.delays.insert(name, delay);
        self
    }

    async fn call<T>(&self, delay: Duration, answer: T) -> Result<T, OracleError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let mut guard = CallGuard {
            dropped: Arc::clone(&self.dropped),
            finished: false,
        };

        let outcome = match self.mode {
            Mode::Answer => {
                tokio::time::sleep(delay).await;
                Ok(answer)
            }
            Mode::Fail => Err(OracleError::Unavailable("stub offline".to_string())),
            Mode::Hang => {
                std::future::pending::<()>().await;
                Ok(answer)
            }
        };
        guard.finished = true;
        outcome
    }
}

#[async_trait]
impl AnalysisOracle for StubOracle {
    async fn estimate_dimension(
        &self,
        name: DimensionName,
        _lead: &Lead,
        _context: &OracleContext<'_>,
    ) -> Result<DimensionEstimate, OracleError> {
        let score = self.scores.get(&name).copied().unwrap_or(60.0);
        let delay = self.delays.get(&name).copied().unwrap_or_default();
        let estimate = DimensionEstimate {
            score: Some(score),
            confidence: Some(0.8),
            factors: vec![Factor::new(
                format!("{}_signal", name),
                score,
                vec!["stub".to_string()],
                "stub",
                0.75,
            )],
        };
        self.call(delay, estimate).await
    }

    async fn predict_metrics(
        &self,
        _lead: &Lead,
        _context: &OracleContext<'_>,
    ) -> Result<PredictiveEstimate, OracleError> {
        self.call(Duration::ZERO, self.predictive).await
    }

    async fn assess_risk(
        &self,
        _lead: &Lead,
        _context: &OracleContext<'_>,
    ) -> Result<RiskEstimate, OracleError> {
        self.call(Duration::ZERO, self.risk).await
    }

    async fn synthesize_strategy(
        &self,
        _lead: &Lead,
        _context: &OracleContext<'_>,
    ) -> Result<StrategyEstimate, OracleError> {
        self.call(Duration::ZERO, StrategyEstimate::default()).await
    }
}

fn lead() -> Lead {
    Lead::new("lead-7", "healthcare", "Madison, WI").with_business_name("Lakeside Dental")
}

#[tokio::test]
async fn test_every_call_failing_yields_literal_defaults() -> Result<()> {
    let engine = QualificationEngine::new(StubOracle::new(Mode::Fail), EngineConfig::default())?;

    let result = engine.qualify(&lead()).await?;

    // 50 × 1.15 + 0.5 × 10 − 0.28 × 15
    assert!((result.overall_score - 58.3).abs() < 1e-9);
    assert!((result.confidence_level - 0.3).abs() < 1e-9);
    assert_eq!(result.priority_level, PriorityLevel::Medium);
    assert!((result.risk_assessment.overall_risk_score() - 0.28).abs() < 1e-9);
    assert_eq!(result.predictive_metrics.conversion_probability, 0.5);
    assert_eq!(engine.oracle().started.load(Ordering::SeqCst), 13);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_hanging_oracle_times_out_to_defaults() -> Result<()> {
    let config = EngineConfig {
        oracle_timeout_secs: 2,
        ..EngineConfig::default()
    };
    let engine = QualificationEngine::new(StubOracle::new(Mode::Hang), config)?;

    let started = tokio::time::Instant::now();
    let result = engine.qualify(&lead()).await?;

    // All calls run concurrently, so the run takes one timeout, not thirteen
    assert!(started.elapsed() < Duration::from_secs(3));
    assert!((result.overall_score - 58.3).abs() < 1e-9);
    assert_eq!(result.priority_level, PriorityLevel::Medium);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_dimension_order_survives_completion_order() -> Result<()> {
    let mut oracle = StubOracle::new(Mode::Answer);
    for (i, name) in DimensionName::ALL.iter().enumerate() {
        oracle = oracle
            .with_score(*name, 10.0 * i as f64)
            .with_delay(*name, Duration::from_millis(500 - 50 * i as u64));
    }
    let engine = QualificationEngine::new(oracle, EngineConfig::default())?;

    let result = engine.qualify(&lead()).await?;

    let names: Vec<_> = result.dimensions.iter().map(|d| d.name).collect();
    assert_eq!(names, DimensionName::ALL.to_vec());
    for (i, d) in result.dimensions.iter().enumerate() {
        assert_eq!(d.score, 10.0 * i as f64);
        assert_eq!(d.weight, d.name.weight());
    }
    Ok(())
}

#[tokio::test]
async fn test_risk_overall_is_recomputed_mean() -> Result<()> {
    let mut oracle = StubOracle::new(Mode::Answer);
    oracle.risk = RiskEstimate {
        payment_risk: Some(0.9),
        implementation_risk: Some(0.7),
        satisfaction_risk: Some(1.4),
        compliance_risk: Some(-0.2),
        competitor_lock_in: None,
    };
    let engine = QualificationEngine::new(oracle, EngineConfig::default())?;

    let risk = engine.qualify(&lead()).await?.risk_assessment;

    // 0.9, 0.7, 1.0 (clamped), 0.0 (clamped), 0.35 (default)
    assert!((risk.overall_risk_score() - 0.59).abs() < 1e-9);
    let mean = risk.components().iter().sum::<f64>() / 5.0;
    assert!((risk.overall_risk_score() - mean).abs() < 1e-9);
    Ok(())
}

#[tokio::test]
async fn test_high_score_high_risk_is_medium() -> Result<()> {
    let mut oracle = StubOracle::new(Mode::Answer);
    for name in DimensionName::ALL {
        oracle = oracle.with_score(name, 80.0);
    }
    oracle.risk = RiskEstimate {
        payment_risk: Some(0.6),
        implementation_risk: Some(0.6),
        satisfaction_risk: Some(0.6),
        compliance_risk: Some(0.6),
        competitor_lock_in: Some(0.6),
    };
    oracle.predictive = PredictiveEstimate {
        conversion_probability: Some(0.35),
        ..PredictiveEstimate::default()
    };
    let engine = QualificationEngine::new(oracle, EngineConfig::default())?;

    let result = engine.qualify(&lead()).await?;

    // 80 × 1.15 + 3.5 − 9
    assert!((result.overall_score - 86.5).abs() < 1e-9);
    assert_eq!(result.priority_level, PriorityLevel::Medium);
    Ok(())
}

#[tokio::test]
async fn test_identical_runs_serialize_identically() -> Result<()> {
    let oracle = StubOracle::new(Mode::Answer)
        .with_score(DimensionName::PainIntensity, 92.0)
        .with_score(DimensionName::ComplianceRisk, 12.0);
    let engine = QualificationEngine::new(oracle, EngineConfig::default())?;

    let first = serde_json::to_vec(&engine.qualify(&lead()).await?)?;
    let second = serde_json::to_vec(&engine.qualify(&lead()).await?)?;

    assert_eq!(first, second);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_run_cancels_in_flight_calls() -> Result<()> {
    let oracle = StubOracle::new(Mode::Hang);
    let started = Arc::clone(&oracle.started);
    let dropped = Arc::clone(&oracle.dropped);
    let engine = QualificationEngine::new(oracle, EngineConfig::default())?;

    let abandoned = tokio::time::timeout(Duration::from_secs(1), engine.qualify(&lead())).await;

    assert!(abandoned.is_err());
    assert_eq!(started.load(Ordering::SeqCst), 13);
    assert_eq!(dropped.load(Ordering::SeqCst), 13);
    Ok(())
}

#[tokio::test]
async fn test_engine_from_config_file() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(
        file,
        r#"
oracle_timeout_secs = 15
max_concurrent_dimension_calls = 4
synthesize_strategy = false
"#
    )?;

    let config = EngineConfig::from_file(file.path()).map_err(anyhow::Error::msg)?;
    assert_eq!(config.oracle_timeout_secs, 15);
    assert_eq!(config.industry_benchmarks.len(), 3);

    let engine = QualificationEngine::new(StubOracle::new(Mode::Answer), config)?;
    let result = engine.qualify(&lead()).await?;

    // Strategy request skipped
    assert_eq!(engine.oracle().started.load(Ordering::SeqCst), 12);
    assert_eq!(result.engagement_strategy.primary_approach, "educational_value_first");
    Ok(())
}

#[test]
fn test_missing_config_file() {
    assert!(EngineConfig::from_file("/nonexistent/qualify.toml").is_err());
}
