//! Priority classification - the final tier of a qualified lead

use serde::Serialize;
use std::fmt;

/// Priority tier assigned to a lead
///
/// Determined by [`PriorityLevel::classify`] from the overall score and the
/// overall risk score:
///
/// | Rule | Score | Risk | Tier |
/// |------|-------|------|------|
/// | 1 | ≥ 85 | ≤ 0.3 | Critical |
/// | 2 | ≥ 70 | ≤ 0.5 | High |
/// | 3 | ≥ 55 | ≤ 0.7 | Medium |
/// | 4 | ≥ 35 | any | Low |
/// | 5 | otherwise | | Disqualified |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    /// Contact now
    Critical,

    /// Contact soon
    High,

    /// Worth pursuing
    Medium,

    /// Nurture only
    Low,

    /// Not a fit
    Disqualified,
}

impl PriorityLevel {
    /// Classify a lead; rules are evaluated top to bottom and the first match wins
    ///
    /// Risk caps the tier in rules 1-3. Rules 4 and 5 ignore risk.
    pub fn classify(overall_score: f64, overall_risk_score: f64) -> Self {
        if overall_score >= 85.0 && overall_risk_score <= 0.3 {
            PriorityLevel::Critical
        } else if overall_score >= 70.0 && overall_risk_score <= 0.5 {
            PriorityLevel::High
        } else if overall_score >= 55.0 && overall_risk_score <= 0.7 {
            PriorityLevel::Medium
        } else if overall_score >= 35.0 {
            PriorityLevel::Low
        } else {
            PriorityLevel::Disqualified
        }
    }

    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::Critical => "critical",
            PriorityLevel::High => "high",
            PriorityLevel::Medium => "medium",
            PriorityLevel::Low => "low",
            PriorityLevel::Disqualified => "disqualified",
        }
    }

    /// Parse a tier from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "critical" => Some(PriorityLevel::Critical),
            "high" => Some(PriorityLevel::High),
            "medium" => Some(PriorityLevel::Medium),
            "low" => Some(PriorityLevel::Low),
            "disqualified" => Some(PriorityLevel::Disqualified),
            _ => None,
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PriorityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid priority level: {}", s))
    }
}
