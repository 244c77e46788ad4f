//! Integration tests for the engine over a mock LLM

#[cfg(test)]
mod tests {
    use crate::{EngineConfig, LlmOracle, QualificationEngine};
    use qualify_domain::{DimensionName, Lead, PriorityLevel};
    use qualify_llm::MockProvider;
    use std::time::Duration;
    use tracing_subscriber::EnvFilter;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn lead() -> Lead {
        Lead::new("lead-100", "restaurant", "Austin, TX")
            .with_business_name("Taco Haus")
            .with_employee_count(12)
            .with_attribute("review_count", "18")
            .with_attribute("avg_rating", "3.4")
    }

    fn engine(llm: MockProvider, config: EngineConfig) -> QualificationEngine<LlmOracle<MockProvider>> {
        QualificationEngine::new(LlmOracle::new(llm), config).unwrap()
    }

    fn strong_lead_provider() -> MockProvider {
        let mut llm = MockProvider::new("not json at all");
        for name in DimensionName::ALL {
            llm.add_response(
                format!("Request item: {}\n", name),
                r#"{
                    "score": 90,
                    "confidence": 0.9,
                    "factors": [
                        {"factor": "signal", "impact": 90, "evidence": ["seen"], "data_source": "profile", "reliability": 0.9}
                    ]
                }"#,
            );
        }
        llm.add_response(
            "Request item: predictive_metrics",
            r#"{"conversion_probability": 0.8, "time_to_conversion_days": 20, "lifetime_value": 5200}"#,
        );
        llm.add_response(
            "Request item: risk_assessment",
            r#"{"payment_risk": 0.1, "implementation_risk": 0.1, "satisfaction_risk": 0.1,
                "compliance_risk": 0.1, "competitor_lock_in": 0.1, "overall_risk_score": 0.9}"#,
        );
        llm.add_response(
            "Request item: engagement_strategy",
            r#"```json
{"primary_approach": "urgent_pain_relief", "channel_preferences": ["phone"]}
```"#,
        );
        llm
    }

    #[tokio::test]
    async fn test_full_qualification_flow() {
        init_tracing();
        let llm = strong_lead_provider();
        let engine = engine(llm.clone(), EngineConfig::default());

        let result = engine.qualify(&lead()).await.unwrap();

        assert_eq!(result.lead_id, "lead-100");
        assert_eq!(result.dimensions.len(), 10);
        assert!(result.dimensions.iter().all(|d| d.score == 90.0));
        // 90 × 1.15 + 8 − 1.5 = 110 → clamped
        assert_eq!(result.overall_score, 100.0);
        // 0.9 × 0.9
        assert!((result.confidence_level - 0.81).abs() < 1e-9);
        assert!((result.risk_assessment.overall_risk_score() - 0.1).abs() < 1e-9);
        assert_eq!(result.priority_level, PriorityLevel::Critical);
        assert_eq!(result.predictive_metrics.lifetime_value, 5200.0);
        assert_eq!(result.predictive_metrics.churn_risk, 0.2);
        assert_eq!(result.engagement_strategy.primary_approach, "urgent_pain_relief");
        assert_eq!(result.engagement_strategy.channel_preferences, vec!["phone"]);
        assert_eq!(result.actionable_insights.len(), 12);
        assert_eq!(llm.call_count(), 13);
    }

    #[tokio::test]
    async fn test_all_oracle_failures_yield_defaults() {
        init_tracing();
        let llm = MockProvider::new("Sorry, I can't help with that.");
        let engine = engine(llm, EngineConfig::default());

        let result = engine.qualify(&lead()).await.unwrap();

        assert!((result.overall_score - 58.3).abs() < 1e-9);
        assert!((result.confidence_level - 0.3).abs() < 1e-9);
        assert_eq!(result.priority_level, PriorityLevel::Medium);
        assert!(result
            .dimensions
            .iter()
            .all(|d| d.score == 50.0 && d.confidence == 0.3 && d.factors.is_empty()));
        assert!(result.actionable_insights.is_empty());
    }

    #[tokio::test]
    async fn test_provider_errors_yield_defaults() {
        let mut llm = MockProvider::default();
        llm.add_error("Request item: ");
        let engine = engine(llm, EngineConfig::default());

        let result = engine.qualify(&lead()).await.unwrap();
        assert!((result.overall_score - 58.3).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_single_malformed_dimension_is_neutral() {
        let mut llm = MockProvider::new("not json at all");
        // First matching rule wins
        llm.add_response("Request item: financial_capacity\n", r#"{"confidence": 0.95}"#);
        for name in DimensionName::ALL {
            llm.add_response(format!("Request item: {}\n", name), r#"{"score": 80}"#);
        }

        let engine = engine(llm, EngineConfig::default());
        let result = engine.qualify(&lead()).await.unwrap();

        let financial = &result.dimensions[1];
        assert_eq!(financial.name, DimensionName::FinancialCapacity);
        assert_eq!(financial.score, 50.0);
        assert_eq!(financial.confidence, 0.3);

        let pain = &result.dimensions[0];
        assert_eq!(pain.score, 80.0);
        // Score only: no confidence, no factors
        assert_eq!(pain.confidence, 0.5);
    }

    #[tokio::test]
    async fn test_dimension_without_valid_factors_is_neutral() {
        let mut llm = MockProvider::new(r#"{"score": 80, "confidence": 0.8}"#);
        llm.add_response("Request item: pain_intensity\n", r#"{"factors": []}"#);
        llm.add_response(
            "Request item: financial_capacity\n",
            r#"{"factors": ["junk", {"factor": "x"}]}"#,
        );

        let engine = engine(llm, EngineConfig::default());
        let result = engine.qualify(&lead()).await.unwrap();

        for d in &result.dimensions[..2] {
            assert_eq!(d.score, 50.0);
            assert_eq!(d.confidence, 0.3);
            assert!(d.factors.is_empty());
        }
        assert_eq!(result.dimensions[2].score, 80.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_dimension_times_out() {
        init_tracing();
        let mut llm = MockProvider::new("{}");
        llm.add_delayed_response(
            "Request item: timing_urgency\n",
            r#"{"score": 99}"#,
            Duration::from_secs(60),
        );
        llm.add_response("Request item: growth_trajectory\n", r#"{"score": 75}"#);
        let config = EngineConfig {
            oracle_timeout_secs: 5,
            ..EngineConfig::default()
        };
        let engine = engine(llm, config);

        let started = tokio::time::Instant::now();
        let result = engine.qualify(&lead()).await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(result.dimensions[5].name, DimensionName::TimingUrgency);
        assert_eq!(result.dimensions[5].score, 50.0);
        assert_eq!(result.dimensions[7].score, 75.0);
    }

    #[tokio::test]
    async fn test_staged_context_feeds_later_requests() {
        let build = || {
            let mut llm = MockProvider::new("{}");
            // Only prompts carrying joined dimensions match
            llm.add_response(
                "Qualification dimensions:",
                r#"{"conversion_probability": 0.9, "payment_risk": 0.9}"#,
            );
            llm
        };

        let concurrent = engine(build(), EngineConfig::default())
            .qualify(&lead())
            .await
            .unwrap();
        assert_eq!(concurrent.predictive_metrics.conversion_probability, 0.5);
        assert_eq!(concurrent.risk_assessment.payment_risk(), 0.3);

        let staged_config = EngineConfig {
            staged_context: true,
            ..EngineConfig::default()
        };
        let staged = engine(build(), staged_config)
            .qualify(&lead())
            .await
            .unwrap();
        assert_eq!(staged.predictive_metrics.conversion_probability, 0.9);
        assert_eq!(staged.risk_assessment.payment_risk(), 0.9);
    }

    #[tokio::test]
    async fn test_strategy_synthesis_can_be_disabled() {
        let llm = strong_lead_provider();
        let config = EngineConfig {
            synthesize_strategy: false,
            ..EngineConfig::default()
        };
        let engine = engine(llm.clone(), config);

        let result = engine.qualify(&lead()).await.unwrap();

        assert_eq!(llm.call_count(), 12);
        assert_eq!(result.engagement_strategy.primary_approach, "educational_value_first");
    }

    #[tokio::test]
    async fn test_runs_are_idempotent_with_fixed_replies() {
        let llm = strong_lead_provider();
        let engine = engine(llm.clone(), EngineConfig::default());

        let first = serde_json::to_string(&engine.qualify(&lead()).await.unwrap()).unwrap();
        assert_eq!(llm.call_count(), 13);
        llm.reset_call_count();

        let second = serde_json::to_string(&engine.qualify(&lead()).await.unwrap()).unwrap();
        assert_eq!(llm.call_count(), 13);

        assert_eq!(first, second);
        assert!(!first.contains("run_id"));
    }

    #[tokio::test]
    async fn test_concurrent_runs_share_one_engine() {
        let engine = engine(strong_lead_provider(), EngineConfig::default());
        let leads: Vec<Lead> = (0..4)
            .map(|i| Lead::new(format!("lead-{}", i), "retail", "Reno, NV"))
            .collect();

        let results = futures::future::join_all(leads.iter().map(|l| engine.qualify(l))).await;

        for (lead, result) in leads.iter().zip(results) {
            let result = result.unwrap();
            assert_eq!(result.lead_id, lead.id);
            assert_eq!(result.priority_level, PriorityLevel::Critical);
        }
        assert_eq!(engine.oracle().provider().call_count(), 4 * 13);
    }
}
