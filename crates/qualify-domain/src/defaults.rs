//! Fallback values used whenever an estimate is missing or unusable.
//!
//! Every default in the crate is defined here once. The normalisers and the
//! `Default` impls read these constants, and the tests assert against them, so
//! the documented literals cannot drift from the implementation.

/// Score assigned to a dimension whose estimate failed
pub const NEUTRAL_DIMENSION_SCORE: f64 = 50.0;

/// Confidence assigned to a dimension whose estimate failed
pub const NEUTRAL_DIMENSION_CONFIDENCE: f64 = 0.3;

/// Confidence used when an estimate carries neither a confidence nor factors
pub const UNSTATED_DIMENSION_CONFIDENCE: f64 = 0.5;

/// Weight of any dimension absent from the weight table
pub const UNLISTED_DIMENSION_WEIGHT: f64 = 0.05;

/// Reliability credited to a dimension with no factors when measuring data quality
pub const FACTORLESS_DATA_QUALITY: f64 = 1.0;

/// Default conversion probability
pub const CONVERSION_PROBABILITY: f64 = 0.5;
/// Default time to conversion (days)
pub const TIME_TO_CONVERSION_DAYS: f64 = 90.0;
/// Default customer lifetime value
pub const LIFETIME_VALUE: f64 = 2400.0;
/// Default first-year churn risk
pub const CHURN_RISK: f64 = 0.2;
/// Default expansion potential
pub const EXPANSION_POTENTIAL: f64 = 0.3;
/// Default referral likelihood
pub const REFERRAL_LIKELIHOOD: f64 = 0.25;

/// Heuristic payment risk
pub const PAYMENT_RISK: f64 = 0.3;
/// Heuristic implementation risk
pub const IMPLEMENTATION_RISK: f64 = 0.3;
/// Heuristic satisfaction risk
pub const SATISFACTION_RISK: f64 = 0.25;
/// Heuristic compliance risk
pub const COMPLIANCE_RISK: f64 = 0.2;
/// Heuristic competitor lock-in
pub const COMPETITOR_LOCK_IN: f64 = 0.35;

/// Default primary engagement approach
pub const PRIMARY_APPROACH: &str = "educational_value_first";
/// Default messaging themes
pub const MESSAGING_THEMES: &[&str] = &["roi_improvement", "compliance_safety"];
/// Default content recommendations
pub const CONTENT_RECOMMENDATIONS: &[&str] = &["case_study", "free_audit"];
/// Default outreach channels, in preference order
pub const CHANNEL_PREFERENCES: &[&str] = &["email", "phone"];
/// Default contact days
pub const PREFERRED_DAYS: &[&str] = &["tuesday", "wednesday", "thursday"];
/// Default contact times
pub const PREFERRED_TIMES: &[&str] = &["10am", "2pm"];
/// Default follow-up cadence
pub const FOLLOW_UP_CADENCE: &str = "weekly_for_4_weeks";
/// Default seasonal considerations
pub const SEASONAL_CONSIDERATIONS: &[&str] = &["avoid_holidays"];
/// Default urgency indicators
pub const URGENCY_INDICATORS: &[&str] = &["business_crisis", "negative_reviews"];

/// Owned copy of a static string list
pub(crate) fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_risk_mean() {
        let mean = (PAYMENT_RISK
            + IMPLEMENTATION_RISK
            + SATISFACTION_RISK
            + COMPLIANCE_RISK
            + COMPETITOR_LOCK_IN)
            / 5.0;
        assert!((mean - 0.28).abs() < 1e-9);
    }

    #[test]
    fn test_defaults_in_range() {
        for p in [
            CONVERSION_PROBABILITY,
            CHURN_RISK,
            EXPANSION_POTENTIAL,
            REFERRAL_LIKELIHOOD,
            NEUTRAL_DIMENSION_CONFIDENCE,
            UNSTATED_DIMENSION_CONFIDENCE,
        ] {
            assert!((0.0..=1.0).contains(&p));
        }
        assert!(TIME_TO_CONVERSION_DAYS >= 0.0);
        assert!(LIFETIME_VALUE >= 0.0);
    }
}
