//! Core types for FieldSearch
//!
//! This crate defines the condition-tree side of the system:
//! - Scalar: Unified scalar value for field values, options, and view vars
//! - Value expressions: SingleValue, Range, Compare, PatternMatch
//! - ValuesError: Soft validation error with a stable content hash
//! - ValuesBag: Per-field container for value expressions and errors
//! - ValuesGroup: Logical (AND/OR) grouping node of the condition tree
//! - SearchCondition / SearchPreCondition: Finished, locked condition wrappers
//! - SearchError: Error type hierarchy
//!
//! Validation problems are not errors in this crate: they accumulate as
//! `ValuesError` entries on the owning `ValuesBag` so a condition can carry
//! multiple independent field problems at once. `SearchError` is reserved
//! for programmer and configuration mistakes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bag;
pub mod condition;
pub mod error;
pub mod group;
pub mod scalar;
pub mod value;

// Re-export commonly used types at the crate root
pub use bag::ValuesBag;
pub use condition::{SearchCondition, SearchPreCondition};
pub use error::{Result, SearchError};
pub use group::{GroupLogical, ValuesGroup};
pub use scalar::Scalar;
pub use value::{
    Compare, CompareOperator, PatternMatch, PatternMatchType, Range, SingleValue, ValuesError,
};
