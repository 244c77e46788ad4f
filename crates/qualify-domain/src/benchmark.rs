//! Industry benchmarks
//!
//! Reference figures handed to the analysis oracle as context. They never enter
//! the score arithmetic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Typical figures for one industry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndustryBenchmark {
    /// Typical number of public reviews
    pub avg_review_count: u32,
    /// Typical average rating (0-5)
    pub avg_rating: f64,
    /// Typical lead-to-customer conversion rate [0.0, 1.0]
    pub conversion_rate: f64,
    /// Typical customer lifetime value
    pub avg_lifetime_value: f64,
    /// Typical annual churn rate [0.0, 1.0]
    pub churn_rate: f64,
}

impl IndustryBenchmark {
    /// Check that every figure is in range
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=5.0).contains(&self.avg_rating) {
            return Err(format!("avg_rating {} outside [0, 5]", self.avg_rating));
        }
        if !(0.0..=1.0).contains(&self.conversion_rate) {
            return Err(format!("conversion_rate {} outside [0, 1]", self.conversion_rate));
        }
        if !(0.0..=1.0).contains(&self.churn_rate) {
            return Err(format!("churn_rate {} outside [0, 1]", self.churn_rate));
        }
        if self.avg_lifetime_value.is_nan() || self.avg_lifetime_value < 0.0 {
            return Err(format!(
                "avg_lifetime_value {} must be non-negative",
                self.avg_lifetime_value
            ));
        }
        Ok(())
    }
}

/// Built-in benchmarks keyed by lower-case industry name
pub fn default_benchmarks() -> BTreeMap<String, IndustryBenchmark> {
    BTreeMap::from([
        (
            "restaurant".to_string(),
            IndustryBenchmark {
                avg_review_count: 45,
                avg_rating: 4.2,
                conversion_rate: 0.18,
                avg_lifetime_value: 2400.0,
                churn_rate: 0.15,
            },
        ),
        (
            "retail".to_string(),
            IndustryBenchmark {
                avg_review_count: 32,
                avg_rating: 4.1,
                conversion_rate: 0.22,
                avg_lifetime_value: 1800.0,
                churn_rate: 0.12,
            },
        ),
        (
            "healthcare".to_string(),
            IndustryBenchmark {
                avg_review_count: 28,
                avg_rating: 4.4,
                conversion_rate: 0.25,
                avg_lifetime_value: 3600.0,
                churn_rate: 0.08,
            },
        ),
    ])
}

/// Case-insensitive lookup of an industry's benchmark
pub fn lookup<'a>(
    benchmarks: &'a BTreeMap<String, IndustryBenchmark>,
    industry: &str,
) -> Option<&'a IndustryBenchmark> {
    let key = industry.trim().to_lowercase();
    benchmarks
        .get(&key)
        .or_else(|| benchmarks.iter().find(|(k, _)| k.to_lowercase() == key).map(|(_, b)| b))
}
