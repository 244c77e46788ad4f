//! Domain error types

use crate::DimensionName;
use thiserror::Error;

/// Structural failures of the aggregator.
///
/// Oracle failures never reach this type: they are replaced by defaults before
/// aggregation. These errors mean the caller assembled the inputs incorrectly
/// and are the only errors that abort a qualification run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// Fewer (or more) dimension records than the fixed dimension list
    #[error("Aggregation input missing: expected {expected} dimensions, found {found}")]
    AggregationInputMissing {
        /// Number of dimensions the aggregator requires
        expected: usize,
        /// Number of dimensions actually supplied
        found: usize,
    },

    /// A dimension record sits at the wrong position in the list
    #[error("Dimension out of order at position {position}: expected {expected}, found {found}")]
    DimensionOutOfOrder {
        /// Zero-based index in the supplied list
        position: usize,
        /// Dimension required at that index
        expected: DimensionName,
        /// Dimension actually found there
        found: DimensionName,
    },
}
