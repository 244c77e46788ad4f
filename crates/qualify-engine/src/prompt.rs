//! LLM prompt engineering for qualification requests

use crate::error::OracleError;
use crate::oracle::{OracleContext, OracleItem};
use qualify_domain::{DimensionName, Lead};

/// Builds the prompt for one oracle request
pub struct PromptBuilder<'a> {
    item: OracleItem,
    lead: &'a Lead,
    context: OracleContext<'a>,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(item: OracleItem, lead: &'a Lead, context: OracleContext<'a>) -> Self {
        Self {
            item,
            lead,
            context,
        }
    }

    /// Build the complete prompt
    pub fn build(&self) -> Result<String, OracleError> {
        let mut prompt = String::new();

        // 1. Role and task
        prompt.push_str(ANALYST_ROLE);
        prompt.push_str("\n\n");
        prompt.push_str(&self.instructions());
        prompt.push_str("\n\n");

        // 2. Item identifier, one line
        prompt.push_str(&format!("Request item: {}\n\n", self.item));

        // 3. The lead
        prompt.push_str("Lead data:\n");
        prompt.push_str(&serde_json::to_string_pretty(self.lead)?);
        prompt.push_str("\n\n");

        // 4. Context
        if let Some(benchmark) = self.context.benchmark {
            prompt.push_str(&format!("Industry benchmark ({}):\n", self.lead.industry));
            prompt.push_str(&serde_json::to_string_pretty(benchmark)?);
            prompt.push_str("\n\n");
        }
        if let Some(dimensions) = self.context.dimensions {
            prompt.push_str("Qualification dimensions:\n");
            prompt.push_str(&serde_json::to_string(dimensions)?);
            prompt.push_str("\n\n");
        }
        if let Some(metrics) = self.context.predictive_metrics {
            prompt.push_str("Predictive metrics:\n");
            prompt.push_str(&serde_json::to_string(metrics)?);
            prompt.push_str("\n\n");
        }

        // 5. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_HEADER);
        prompt.push('\n');
        prompt.push_str(self.output_format());

        Ok(prompt)
    }

    fn instructions(&self) -> String {
        match self.item {
            OracleItem::Dimension(name) => format!(
                "Analyze the \"{}\" dimension of this lead: {}.\n\
                 Assess the current state, cite evidence for each contributing factor, rate \
                 how reliable each source is, and score the dimension from 0 to 100.\n\
                 Consider the industry ({}), business size ({}) and geographic market ({}).",
                name,
                dimension_focus(name),
                self.lead.industry,
                self.lead
                    .employee_count
                    .map(|n| format!("{} employees", n))
                    .unwrap_or_else(|| "unknown".to_string()),
                self.lead.location,
            ),
            OracleItem::PredictiveMetrics => format!(
                "Predict the commercial outlook for this lead: conversion probability (0-1), \
                 time to conversion in days, customer lifetime value, first-year churn risk \
                 (0-1), expansion potential (0-1) and referral likelihood (0-1).\n\
                 Base predictions on similar customers in {}, company size and maturity, and \
                 any qualification signals provided.",
                self.lead.industry
            ),
            OracleItem::RiskAssessment => "Assess the risks of taking on this lead as a customer. \
                 Score each from 0 (no risk) to 1 (certain): payment risk, implementation risk, \
                 satisfaction risk, compliance risk and lock-in to a competitor."
                .to_string(),
            OracleItem::EngagementStrategy => "Design the engagement strategy for this lead: the \
                 primary approach, key messaging themes, content to send, timing (days, times, \
                 follow-up cadence, seasonal considerations, urgency indicators), preferred \
                 channels in order, and personalization hooks drawn from the lead data."
                .to_string(),
        }
    }

    fn output_format(&self) -> &'static str {
        match self.item {
            OracleItem::Dimension(_) => DIMENSION_FORMAT,
            OracleItem::PredictiveMetrics => PREDICTIVE_FORMAT,
            OracleItem::RiskAssessment => RISK_FORMAT,
            OracleItem::EngagementStrategy => STRATEGY_FORMAT,
        }
    }
}

/// JSON schema constraining the reply for `item`
pub fn response_schema(item: OracleItem) -> &'static str {
    match item {
        OracleItem::Dimension(_) => DIMENSION_SCHEMA,
        OracleItem::PredictiveMetrics => PREDICTIVE_SCHEMA,
        OracleItem::RiskAssessment => RISK_SCHEMA,
        OracleItem::EngagementStrategy => STRATEGY_SCHEMA,
    }
}

fn dimension_focus(name: DimensionName) -> &'static str {
    match name {
        DimensionName::PainIntensity => {
            "how acutely the business feels the problem, e.g. negative reviews, low rating, unanswered complaints"
        }
        DimensionName::FinancialCapacity => {
            "ability to pay, e.g. size, pricing tier, locations, signs of investment"
        }
        DimensionName::DecisionAuthority => {
            "how reachable the decision maker is and how many people sign off"
        }
        DimensionName::TechnicalReadiness => {
            "digital maturity and fit of the current tools"
        }
        DimensionName::CompetitiveLandscape => {
            "pressure from competitors in the same market"
        }
        DimensionName::TimingUrgency => "how soon the business needs to act",
        DimensionName::ImplementationComplexity => {
            "effort needed to onboard the business (higher score means simpler)"
        }
        DimensionName::GrowthTrajectory => "direction and pace of the business's growth",
        DimensionName::ComplianceRisk => {
            "regulatory exposure of the business (higher score means better fit)"
        }
        DimensionName::MarketPositioning => "strength of the business's market position",
    }
}

const ANALYST_ROLE: &str = "You are a B2B lead qualification analyst. \
Answer only from the lead data and context given, and say so through lower \
confidence and reliability when the evidence is thin.";

const OUTPUT_FORMAT_HEADER: &str = "Output format (a single JSON object only, no additional text):";

const DIMENSION_FORMAT: &str = r#"{
  "score": 0-100,
  "confidence": 0.0-1.0,
  "factors": [
    {
      "factor": "short_snake_case_name",
      "impact": 0-100,
      "evidence": ["observation", "..."],
      "data_source": "where the evidence came from",
      "reliability": 0.0-1.0
    }
  ]
}"#;

const PREDICTIVE_FORMAT: &str = r#"{
  "conversion_probability": 0.0-1.0,
  "time_to_conversion_days": days,
  "lifetime_value": amount,
  "churn_risk": 0.0-1.0,
  "expansion_potential": 0.0-1.0,
  "referral_likelihood": 0.0-1.0
}"#;

const RISK_FORMAT: &str = r#"{
  "payment_risk": 0.0-1.0,
  "implementation_risk": 0.0-1.0,
  "satisfaction_risk": 0.0-1.0,
  "compliance_risk": 0.0-1.0,
  "competitor_lock_in": 0.0-1.0
}"#;

const STRATEGY_FORMAT: &str = r#"{
  "primary_approach": "snake_case_approach",
  "messaging_themes": ["..."],
  "content_recommendations": ["..."],
  "timing_optimization": {
    "preferred_days": ["..."],
    "preferred_times": ["..."],
    "follow_up_cadence": "...",
    "seasonal_considerations": ["..."],
    "urgency_indicators": ["..."]
  },
  "channel_preferences": ["..."],
  "personalization_elements": [
    {"element": "...", "value": "...", "source": "...", "confidence": 0.0-1.0}
  ]
}"#;

const DIMENSION_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "score": {"type": "number", "minimum": 0, "maximum": 100},
    "confidence": {"type": "number", "minimum": 0, "maximum": 1},
    "factors": {
      "type": "array",
      "items": {
        "type": "object",
        "properties": {
          "factor": {"type": "string"},
          "impact": {"type": "number", "minimum": 0, "maximum": 100},
          "evidence": {"type": "array", "items": {"type": "string"}},
          "data_source": {"type": "string"},
          "reliability": {"type": "number", "minimum": 0, "maximum": 1}
        },
        "required": ["factor", "impact", "reliability"]
      }
    }
  },
  "required": ["score", "confidence", "factors"]
}"#;

const PREDICTIVE_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "conversion_probability": {"type": "number", "minimum": 0, "maximum": 1},
    "time_to_conversion_days": {"type": "number", "minimum": 0},
    "lifetime_value": {"type": "number", "minimum": 0},
    "churn_risk": {"type": "number", "minimum": 0, "maximum": 1},
    "expansion_potential": {"type": "number", "minimum": 0, "maximum": 1},
    "referral_likelihood": {"type": "number", "minimum": 0, "maximum": 1}
  },
  "required": ["conversion_probability", "time_to_conversion_days", "lifetime_value",
               "churn_risk", "expansion_potential", "referral_likelihood"]
}"#;

const RISK_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "payment_risk": {"type": "number", "minimum": 0, "maximum": 1},
    "implementation_risk": {"type": "number", "minimum": 0, "maximum": 1},
    "satisfaction_risk": {"type": "number", "minimum": 0, "maximum": 1},
    "compliance_risk": {"type": "number", "minimum": 0, "maximum": 1},
    "competitor_lock_in": {"type": "number", "minimum": 0, "maximum": 1}
  },
  "required": ["payment_risk", "implementation_risk", "satisfaction_risk",
               "compliance_risk", "competitor_lock_in"]
}"#;

const STRATEGY_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "primary_approach": {"type": "string"},
    "messaging_themes": {"type": "array", "items": {"type": "string"}},
    "content_recommendations": {"type": "array", "items": {"type": "string"}},
    "timing_optimization": {
      "type": "object",
      "properties": {
        "preferred_days": {"type": "array", "items": {"type": "string"}},
        "preferred_times": {"type": "array", "items": {"type": "string"}},
        "follow_up_cadence": {"type": "string"},
        "seasonal_considerations": {"type": "array", "items": {"type": "string"}},
        "urgency_indicators": {"type": "array", "items": {"type": "string"}}
      }
    },
    "channel_preferences": {"type": "array", "items": {"type": "string"}},
    "personalization_elements": {
      "type": "array",
      "items": {
        "type": "object",
        "properties": {
          "element": {"type": "string"},
          "value": {"type": "string"},
          "source": {"type": "string"},
          "confidence": {"type": "number", "minimum": 0, "maximum": 1}
        },
        "required": ["element", "value"]
      }
    }
  },
  "required": ["primary_approach", "messaging_themes", "channel_preferences"]
}"#;
