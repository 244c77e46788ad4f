//! Analysis oracle backed by a text-generation provider

use crate::error::OracleError;
use crate::oracle::{AnalysisOracle, OracleContext, OracleItem};
use crate::parser::{
    parse_dimension_response, parse_predictive_response, parse_risk_response,
    parse_strategy_response,
};
use crate::prompt::{response_schema, PromptBuilder};
use async_trait::async_trait;
use qualify_domain::{
    DimensionEstimate, DimensionName, Lead, PredictiveEstimate, RiskEstimate, StrategyEstimate,
};
use qualify_llm::LlmProvider;
use tracing::debug;

/// Answers oracle requests by prompting an [`LlmProvider`] for structured JSON
pub struct LlmOracle<L: LlmProvider> {
    llm: L,
}

impl<L: LlmProvider> LlmOracle<L> {
    /// Wrap a provider
    pub fn new(llm: L) -> Self {
        Self { llm }
    }

    /// The wrapped provider
    pub fn provider(&self) -> &L {
        &self.llm
    }

    async fn ask(
        &self,
        item: OracleItem,
        lead: &Lead,
        context: &OracleContext<'_>,
    ) -> Result<String, OracleError> {
        let prompt = PromptBuilder::new(item, lead, *context).build()?;
        debug!(item = %item, model = self.llm.model_name(), prompt_len = prompt.len(), "oracle request");

        let response = self
            .llm
            .generate_structured(&prompt, response_schema(item))
            .await?;

        debug!(item = %item, response_len = response.len(), "oracle response");
        Ok(response)
    }
}

#[async_trait]
impl<L: LlmProvider> AnalysisOracle for LlmOracle<L> {
    async fn estimate_dimension(
        &self,
        name: DimensionName,
        lead: &Lead,
        context: &OracleContext<'_>,
    ) -> Result<DimensionEstimate, OracleError> {
        let response = self.ask(OracleItem::Dimension(name), lead, context).await?;
        parse_dimension_response(&response)
    }

    async fn predict_metrics(
        &self,
        lead: &Lead,
        context: &OracleContext<'_>,
    ) -> Result<PredictiveEstimate, OracleError> {
        let response = self.ask(OracleItem::PredictiveMetrics, lead, context).await?;
        parse_predictive_response(&response)
    }

    async fn assess_risk(
        &self,
        lead: &Lead,
        context: &OracleContext<'_>,
    ) -> Result<RiskEstimate, OracleError> {
        let response = self.ask(OracleItem::RiskAssessment, lead, context).await?;
        parse_risk_response(&response)
    }

    async fn synthesize_strategy(
        &self,
        lead: &Lead,
        context: &OracleContext<'_>,
    ) -> Result<StrategyEstimate, OracleError> {
        let response = self.ask(OracleItem::EngagementStrategy, lead, context).await?;
        parse_strategy_response(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qualify_llm::MockProvider;

    fn lead() -> Lead {
        Lead::new("lead-3", "healthcare", "Tucson, AZ")
    }

    #[tokio::test]
    async fn test_dimension_request_routes_by_item() {
        let mut llm = MockProvider::new("{}");
        llm.add_response(
            "Request item: decision_authority",
            r#"{"score": 81, "confidence": 0.7}"#,
        );
        let oracle = LlmOracle::new(llm.clone());

        let estimate = oracle
            .estimate_dimension(
                DimensionName::DecisionAuthority,
                &lead(),
                &OracleContext::default(),
            )
            .await
            .unwrap();

        assert_eq!(estimate.score, Some(81.0));
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_default_reply_is_malformed_for_dimension() {
        let oracle = LlmOracle::new(MockProvider::new("{}"));
        let result = oracle
            .estimate_dimension(DimensionName::PainIntensity, &lead(), &OracleContext::default())
            .await;
        assert!(matches!(result, Err(OracleError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_provider_error_is_unavailable() {
        let mut llm = MockProvider::default();
        llm.add_error("Request item: risk_assessment");
        let oracle = LlmOracle::new(llm);

        let result = oracle.assess_risk(&lead(), &OracleContext::default()).await;
        assert!(matches!(result, Err(OracleError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_predictive_and_strategy_requests() {
        let mut llm = MockProvider::new("{}");
        llm.add_response(
            "Request item: predictive_metrics",
            r#"{"conversion_probability": 0.42}"#,
        );
        llm.add_response(
            "Request item: engagement_strategy",
            r#"{"primary_approach": "peer_proof"}"#,
        );
        let oracle = LlmOracle::new(llm);
        let ctx = OracleContext::default();

        let metrics = oracle.predict_metrics(&lead(), &ctx).await.unwrap();
        assert_eq!(metrics.conversion_probability, Some(0.42));

        let strategy = oracle.synthesize_strategy(&lead(), &ctx).await.unwrap();
        assert_eq!(strategy.primary_approach.as_deref(), Some("peer_proof"));
        assert_eq!(oracle.provider().call_count(), 2);
    }
}
