//! Qualify Engine
//!
//! Runs a lead qualification: asks an analysis oracle for every dimension,
//! predictive metrics, risk and engagement strategy, replaces every failed answer
//! with its default, and hands the results to the domain rules for scoring.
//!
//! # Architecture
//!
//! ```text
//!                ┌─ 10 × dimension ─┐
//! Lead → Engine ─┼─ predictive      ├─→ normalise → aggregate → QualificationResult
//!                ├─ risk            │
//!                └─ strategy ───────┘
//!            (concurrent, per-call timeout, default on failure)
//! ```
//!
//! # Key Features
//!
//! - **Oracle seam**: [`AnalysisOracle`] is the only way estimates enter a run;
//!   tests inject deterministic stubs, production uses [`LlmOracle`]
//! - **Never-fail fan-out**: timeouts, provider errors and malformed replies all
//!   fall back to documented defaults
//! - **Stable ordering**: dimensions come back in fixed order regardless of
//!   completion order
//! - **Staged mode**: optionally passes dimensions and metrics to later requests
//!
//! # Example Usage
//!
//! ```no_run
//! use qualify_domain::Lead;
//! use qualify_engine::{EngineConfig, LlmOracle, QualificationEngine};
//! use qualify_llm::OllamaProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = OllamaProvider::default_endpoint("llama3.1")?;
//! let engine = QualificationEngine::new(LlmOracle::new(llm), EngineConfig::default())?;
//!
//! let lead = Lead::new("lead-42", "restaurant", "Austin, TX")
//!     .with_business_name("Taco Haus")
//!     .with_attribute("review_count", "18");
//!
//! let result = engine.qualify(&lead).await?;
//! println!("{}: {:.1} ({})", result.lead_id, result.overall_score, result.priority_level);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod coordinator;
mod engine;
mod error;
mod llm_oracle;
mod oracle;
mod parser;
mod prompt;

#[cfg(test)]
mod tests;

pub use config::EngineConfig;
pub use engine::QualificationEngine;
pub use error::{OracleError, QualificationError};
pub use llm_oracle::LlmOracle;
pub use oracle::{AnalysisOracle, OracleContext, OracleItem};
