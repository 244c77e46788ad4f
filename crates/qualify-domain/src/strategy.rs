//! Engagement strategy - informational output that never feeds the score

use crate::bounded;
use crate::defaults::{self, strings};
use serde::Serialize;

/// Recommended way to approach a lead
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementStrategy {
    /// Primary approach (e.g. `educational_value_first`)
    pub primary_approach: String,
    /// Themes to emphasise in messaging
    pub messaging_themes: Vec<String>,
    /// Content pieces to send
    pub content_recommendations: Vec<String>,
    /// When to make contact
    pub timing: TimingStrategy,
    /// Outreach channels in preference order
    pub channel_preferences: Vec<String>,
    /// Lead-specific personalisation hooks
    pub personalization_elements: Vec<PersonalizationElement>,
}

/// When and how often to contact a lead
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingStrategy {
    /// Days of the week to make contact
    pub preferred_days: Vec<String>,
    /// Times of day to make contact
    pub preferred_times: Vec<String>,
    /// Follow-up rhythm
    pub follow_up_cadence: String,
    /// Seasonal factors to respect
    pub seasonal_considerations: Vec<String>,
    /// Signals that should trigger faster contact
    pub urgency_indicators: Vec<String>,
}

/// A single personalisation hook
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalizationElement {
    /// What is personalised (e.g. `recent_review`)
    pub element: String,
    /// The personalised value
    pub value: String,
    /// Where the value came from
    pub source: String,
    /// Confidence in the value [0.0, 1.0]
    pub confidence: f64,
}

impl Default for TimingStrategy {
    fn default() -> Self {
        Self {
            preferred_days: strings(defaults::PREFERRED_DAYS),
            preferred_times: strings(defaults::PREFERRED_TIMES),
            follow_up_cadence: defaults::FOLLOW_UP_CADENCE.to_string(),
            seasonal_considerations: strings(defaults::SEASONAL_CONSIDERATIONS),
            urgency_indicators: strings(defaults::URGENCY_INDICATORS),
        }
    }
}

impl Default for EngagementStrategy {
    fn default() -> Self {
        Self {
            primary_approach: defaults::PRIMARY_APPROACH.to_string(),
            messaging_themes: strings(defaults::MESSAGING_THEMES),
            content_recommendations: strings(defaults::CONTENT_RECOMMENDATIONS),
            timing: TimingStrategy::default(),
            channel_preferences: strings(defaults::CHANNEL_PREFERENCES),
            personalization_elements: Vec::new(),
        }
    }
}

/// Raw strategy estimate; each absent field takes its default
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyEstimate {
    /// Stated primary approach
    pub primary_approach: Option<String>,
    /// Stated messaging themes
    pub messaging_themes: Option<Vec<String>>,
    /// Stated content recommendations
    pub content_recommendations: Option<Vec<String>>,
    /// Stated timing
    pub timing: Option<TimingEstimate>,
    /// Stated channel preferences
    pub channel_preferences: Option<Vec<String>>,
    /// Stated personalisation elements
    pub personalization_elements: Option<Vec<PersonalizationElement>>,
}

/// Raw timing estimate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingEstimate {
    /// Stated contact days
    pub preferred_days: Option<Vec<String>>,
    /// Stated contact times
    pub preferred_times: Option<Vec<String>>,
    /// Stated follow-up cadence
    pub follow_up_cadence: Option<String>,
    /// Stated seasonal considerations
    pub seasonal_considerations: Option<Vec<String>>,
    /// Stated urgency indicators
    pub urgency_indicators: Option<Vec<String>>,
}

/// Keep a stated list unless it is absent or empty
fn list_or(value: Option<Vec<String>>, default: &[&str]) -> Vec<String> {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => strings(default),
    }
}

/// Keep a stated string unless it is absent or blank
fn text_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

impl TimingStrategy {
    /// Normalise a raw timing estimate
    pub fn from_estimate(estimate: TimingEstimate) -> Self {
        Self {
            preferred_days: list_or(estimate.preferred_days, defaults::PREFERRED_DAYS),
            preferred_times: list_or(estimate.preferred_times, defaults::PREFERRED_TIMES),
            follow_up_cadence: text_or(estimate.follow_up_cadence, defaults::FOLLOW_UP_CADENCE),
            seasonal_considerations: list_or(
                estimate.seasonal_considerations,
                defaults::SEASONAL_CONSIDERATIONS,
            ),
            urgency_indicators: list_or(estimate.urgency_indicators, defaults::URGENCY_INDICATORS),
        }
    }
}

impl EngagementStrategy {
    /// Normalise a raw strategy estimate
    ///
    /// Personalisation has no default content: an absent list stays empty.
    pub fn from_estimate(estimate: StrategyEstimate) -> Self {
        let personalization_elements = estimate
            .personalization_elements
            .unwrap_or_default()
            .into_iter()
            .map(|mut p| {
                p.confidence = bounded(p.confidence, 0.0, 1.0);
                p
            })
            .collect();

        Self {
            primary_approach: text_or(estimate.primary_approach, defaults::PRIMARY_APPROACH),
            messaging_themes: list_or(estimate.messaging_themes, defaults::MESSAGING_THEMES),
            content_recommendations: list_or(
                estimate.content_recommendations,
                defaults::CONTENT_RECOMMENDATIONS,
            ),
            timing: estimate
                .timing
                .map(TimingStrategy::from_estimate)
                .unwrap_or_default(),
            channel_preferences: list_or(
                estimate.channel_preferences,
                defaults::CHANNEL_PREFERENCES,
            ),
            personalization_elements,
        }
    }
}
