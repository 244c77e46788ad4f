//! Parse LLM output into raw estimates

use crate::error::OracleError;
use qualify_domain::{
    DimensionEstimate, Factor, PersonalizationElement, PredictiveEstimate, RiskEstimate,
    StrategyEstimate, TimingEstimate,
};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Confidence given to a personalization element that states none
const UNSTATED_PERSONALIZATION_CONFIDENCE: f64 = 0.5;

type JsonObject = Map<String, Value>;

/// Parse a dimension reply
///
/// Needs a numeric `score` or at least one valid factor; factors that are not
/// objects or lack `impact`/`reliability` are skipped.
pub fn parse_dimension_response(response: &str) -> Result<DimensionEstimate, OracleError> {
    let obj = parse_object(response)?;

    let score = number(&obj, "score");
    let factors_json = obj.get("factors").and_then(Value::as_array);

    let mut factors = Vec::new();
    for (idx, factor_json) in factors_json.into_iter().flatten().enumerate() {
        match parse_factor_json(factor_json) {
            Ok(factor) => factors.push(factor),
            Err(e) => warn!(factor = idx, error = %e, "skipping invalid factor"),
        }
    }

    if score.is_none() && factors.is_empty() {
        return Err(OracleError::MalformedResponse(
            "Expected a numeric 'score' or at least one valid factor".to_string(),
        ));
    }

    Ok(DimensionEstimate {
        score,
        confidence: number(&obj, "confidence"),
        factors,
    })
}

/// Parse a predictive metrics reply; every key is optional
pub fn parse_predictive_response(response: &str) -> Result<PredictiveEstimate, OracleError> {
    let obj = parse_object(response)?;

    Ok(PredictiveEstimate {
        conversion_probability: number(&obj, "conversion_probability"),
        time_to_conversion_days: number(&obj, "time_to_conversion_days")
            .or_else(|| number(&obj, "time_to_conversion")),
        lifetime_value: number(&obj, "lifetime_value"),
        churn_risk: number(&obj, "churn_risk"),
        expansion_potential: number(&obj, "expansion_potential"),
        referral_likelihood: number(&obj, "referral_likelihood"),
    })
}

/// Parse a risk reply; every key is optional and a stated overall score is ignored
pub fn parse_risk_response(response: &str) -> Result<RiskEstimate, OracleError> {
    let obj = parse_object(response)?;

    if let Some(overall) = obj.get("overall_risk_score") {
        debug!(%overall, "ignoring oracle-supplied overall risk score");
    }

    Ok(RiskEstimate {
        payment_risk: number(&obj, "payment_risk"),
        implementation_risk: number(&obj, "implementation_risk"),
        satisfaction_risk: number(&obj, "satisfaction_risk"),
        compliance_risk: number(&obj, "compliance_risk"),
        competitor_lock_in: number(&obj, "competitor_lock_in"),
    })
}

/// Parse an engagement strategy reply; every key is optional
pub fn parse_strategy_response(response: &str) -> Result<StrategyEstimate, OracleError> {
    let obj = parse_object(response)?;

    let timing = obj
        .get("timing_optimization")
        .or_else(|| obj.get("timing"))
        .and_then(Value::as_object)
        .map(|t| TimingEstimate {
            preferred_days: string_list(t, "preferred_days"),
            preferred_times: string_list(t, "preferred_times"),
            follow_up_cadence: text(t, "follow_up_cadence"),
            seasonal_considerations: string_list(t, "seasonal_considerations"),
            urgency_indicators: string_list(t, "urgency_indicators"),
        });

    let personalization_elements = obj
        .get("personalization_elements")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .enumerate()
                .filter_map(|(idx, item)| match parse_personalization_json(item) {
                    Ok(element) => Some(element),
                    Err(e) => {
                        warn!(element = idx, error = %e, "skipping invalid personalization element");
                        None
                    }
                })
                .collect()
        });

    Ok(StrategyEstimate {
        primary_approach: text(&obj, "primary_approach"),
        messaging_themes: string_list(&obj, "messaging_themes"),
        content_recommendations: string_list(&obj, "content_recommendations"),
        timing,
        channel_preferences: string_list(&obj, "channel_preferences"),
        personalization_elements,
    })
}

/// Parse the reply as a single JSON object
fn parse_object(response: &str) -> Result<JsonObject, OracleError> {
    let json_str = extract_json(response)?;
    let json: Value = serde_json::from_str(&json_str)?;

    match json {
        Value::Object(obj) => Ok(obj),
        other => Err(OracleError::MalformedResponse(format!(
            "Expected JSON object, got {}",
            json_type(&other)
        ))),
    }
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, OracleError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(OracleError::MalformedResponse("Empty code block".to_string()));
        }

        // Skip the opening fence and, if present, the closing fence
        let end = if lines.len() > 2 && lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse a single factor from JSON
fn parse_factor_json(json: &Value) -> Result<Factor, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "Factor is not a JSON object".to_string())?;

    let impact = number(obj, "impact").ok_or_else(|| "Missing or invalid 'impact'".to_string())?;
    let reliability =
        number(obj, "reliability").ok_or_else(|| "Missing or invalid 'reliability'".to_string())?;

    let name = text(obj, "factor")
        .or_else(|| text(obj, "name"))
        .unwrap_or_else(|| "unnamed_factor".to_string());
    let evidence = match obj.get("evidence") {
        Some(Value::String(single)) => vec![single.clone()],
        _ => string_list(obj, "evidence").unwrap_or_default(),
    };
    let source = text(obj, "data_source")
        .or_else(|| text(obj, "source"))
        .unwrap_or_else(|| "unspecified".to_string());

    Ok(Factor::new(name, impact, evidence, source, reliability))
}

/// Parse a single personalization element from JSON
fn parse_personalization_json(json: &Value) -> Result<PersonalizationElement, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "Element is not a JSON object".to_string())?;

    Ok(PersonalizationElement {
        element: text(obj, "element").ok_or_else(|| "Missing or invalid 'element'".to_string())?,
        value: text(obj, "value").ok_or_else(|| "Missing or invalid 'value'".to_string())?,
        source: text(obj, "source").unwrap_or_else(|| "unspecified".to_string()),
        confidence: number(obj, "confidence").unwrap_or(UNSTATED_PERSONALIZATION_CONFIDENCE),
    })
}

/// A finite number under `key`; anything else counts as absent
fn number(obj: &JsonObject, key: &str) -> Option<f64> {
    obj.get(key)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
}

fn text(obj: &JsonObject, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn string_list(obj: &JsonObject, key: &str) -> Option<Vec<String>> {
    obj.get(key).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
