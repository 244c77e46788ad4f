//! Predictive metrics

use crate::bounded;
use crate::defaults;
use serde::Serialize;

/// Forward-looking estimates for a lead
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictiveMetrics {
    /// Probability the lead converts [0.0, 1.0]
    pub conversion_probability: f64,
    /// Expected days until conversion (≥ 0)
    pub time_to_conversion_days: f64,
    /// Expected customer lifetime value (≥ 0)
    pub lifetime_value: f64,
    /// First-year churn risk [0.0, 1.0]
    pub churn_risk: f64,
    /// Upsell / expansion potential [0.0, 1.0]
    pub expansion_potential: f64,
    /// Likelihood of referrals [0.0, 1.0]
    pub referral_likelihood: f64,
}

impl Default for PredictiveMetrics {
    fn default() -> Self {
        Self {
            conversion_probability: defaults::CONVERSION_PROBABILITY,
            time_to_conversion_days: defaults::TIME_TO_CONVERSION_DAYS,
            lifetime_value: defaults::LIFETIME_VALUE,
            churn_risk: defaults::CHURN_RISK,
            expansion_potential: defaults::EXPANSION_POTENTIAL,
            referral_likelihood: defaults::REFERRAL_LIKELIHOOD,
        }
    }
}

/// Raw predictive estimate; each absent field takes its own default
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PredictiveEstimate {
    /// Stated conversion probability
    pub conversion_probability: Option<f64>,
    /// Stated time to conversion (days)
    pub time_to_conversion_days: Option<f64>,
    /// Stated lifetime value
    pub lifetime_value: Option<f64>,
    /// Stated churn risk
    pub churn_risk: Option<f64>,
    /// Stated expansion potential
    pub expansion_potential: Option<f64>,
    /// Stated referral likelihood
    pub referral_likelihood: Option<f64>,
}

impl PredictiveMetrics {
    /// Normalise a raw estimate: default missing fields, clamp the rest
    pub fn from_estimate(estimate: PredictiveEstimate) -> Self {
        let probability = |value: Option<f64>, default: f64| {
            value
                .filter(|v| v.is_finite())
                .map(|v| bounded(v, 0.0, 1.0))
                .unwrap_or(default)
        };
        let non_negative = |value: Option<f64>, default: f64| {
            value
                .filter(|v| v.is_finite())
                .map(|v| v.max(0.0))
                .unwrap_or(default)
        };

        Self {
            conversion_probability: probability(
                estimate.conversion_probability,
                defaults::CONVERSION_PROBABILITY,
            ),
            time_to_conversion_days: non_negative(
                estimate.time_to_conversion_days,
                defaults::TIME_TO_CONVERSION_DAYS,
            ),
            lifetime_value: non_negative(estimate.lifetime_value, defaults::LIFETIME_VALUE),
            churn_risk: probability(estimate.churn_risk, defaults::CHURN_RISK),
            expansion_potential: probability(
                estimate.expansion_potential,
                defaults::EXPANSION_POTENTIAL,
            ),
            referral_likelihood: probability(
                estimate.referral_likelihood,
                defaults::REFERRAL_LIKELIHOOD,
            ),
        }
    }

    /// Copy with every field forced into its declared range
    pub fn bounded(&self) -> Self {
        let non_negative = |v: f64| if v.is_nan() { 0.0 } else { v.max(0.0) };
        Self {
            conversion_probability: bounded(self.conversion_probability, 0.0, 1.0),
            time_to_conversion_days: non_negative(self.time_to_conversion_days),
            lifetime_value: non_negative(self.lifetime_value),
            churn_risk: bounded(self.churn_risk, 0.0, 1.0),
            expansion_potential: bounded(self.expansion_potential, 0.0, 1.0),
            referral_likelihood: bounded(self.referral_likelihood, 0.0, 1.0),
        }
    }
}
