//! Risk assessment
//!
//! The overall risk score is derived, never stored independently: it is always
//! the unweighted mean of the five components held by the same value.

use crate::{bounded, snapped};
use crate::defaults;
use serde::Serialize;

/// Five independent risk scores and their mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    payment_risk: f64,
    implementation_risk: f64,
    satisfaction_risk: f64,
    compliance_risk: f64,
    competitor_lock_in: f64,
    overall_risk_score: f64,
}

/// Raw risk estimate; each absent component takes its heuristic default
///
/// Has no overall field: an oracle-supplied overall score is discarded and
/// recomputed from the components.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiskEstimate {
    /// Stated payment risk
    pub payment_risk: Option<f64>,
    /// Stated implementation risk
    pub implementation_risk: Option<f64>,
    /// Stated satisfaction risk
    pub satisfaction_risk: Option<f64>,
    /// Stated compliance risk
    pub compliance_risk: Option<f64>,
    /// Stated competitor lock-in
    pub competitor_lock_in: Option<f64>,
}

impl RiskAssessment {
    /// Build from five components, clamping each to [0, 1] and recomputing the mean
    pub fn new(
        payment_risk: f64,
        implementation_risk: f64,
        satisfaction_risk: f64,
        compliance_risk: f64,
        competitor_lock_in: f64,
    ) -> Self {
        let components = [
            bounded(payment_risk, 0.0, 1.0),
            bounded(implementation_risk, 0.0, 1.0),
            bounded(satisfaction_risk, 0.0, 1.0),
            bounded(compliance_risk, 0.0, 1.0),
            bounded(competitor_lock_in, 0.0, 1.0),
        ];
        let mean = components.iter().sum::<f64>() / components.len() as f64;
        let overall_risk_score = snapped(mean);

        Self {
            payment_risk: components[0],
            implementation_risk: components[1],
            satisfaction_risk: components[2],
            compliance_risk: components[3],
            competitor_lock_in: components[4],
            overall_risk_score,
        }
    }

    /// Normalise a raw estimate, defaulting each missing component
    pub fn from_estimate(estimate: RiskEstimate) -> Self {
        let pick = |value: Option<f64>, default: f64| {
            value.filter(|v| v.is_finite()).unwrap_or(default)
        };
        Self::new(
            pick(estimate.payment_risk, defaults::PAYMENT_RISK),
            pick(estimate.implementation_risk, defaults::IMPLEMENTATION_RISK),
            pick(estimate.satisfaction_risk, defaults::SATISFACTION_RISK),
            pick(estimate.compliance_risk, defaults::COMPLIANCE_RISK),
            pick(estimate.competitor_lock_in, defaults::COMPETITOR_LOCK_IN),
        )
    }

    /// Risk of non-payment
    pub fn payment_risk(&self) -> f64 {
        self.payment_risk
    }

    /// Risk of a troubled implementation
    pub fn implementation_risk(&self) -> f64 {
        self.implementation_risk
    }

    /// Risk of an unhappy customer
    pub fn satisfaction_risk(&self) -> f64 {
        self.satisfaction_risk
    }

    /// Regulatory risk
    pub fn compliance_risk(&self) -> f64 {
        self.compliance_risk
    }

    /// Degree the lead is locked in to a competitor
    pub fn competitor_lock_in(&self) -> f64 {
        self.competitor_lock_in
    }

    /// Unweighted mean of the five components
    pub fn overall_risk_score(&self) -> f64 {
        self.overall_risk_score
    }

    /// The five components in declaration order
    pub fn components(&self) -> [f64; 5] {
        [
            self.payment_risk,
            self.implementation_risk,
            self.satisfaction_risk,
            self.compliance_risk,
            self.competitor_lock_in,
        ]
    }
}

impl Default for RiskAssessment {
    /// Heuristic risk profile used when no estimate is available (overall 0.28)
    fn default() -> Self {
        Self::from_estimate(RiskEstimate::default())
    }
}
