//! Value-expression primitives
//!
//! These types are the leaves of a search condition:
//! - SingleValue: One value, optionally paired with its view representation
//! - Range: Bounded interval with per-bound inclusivity
//! - Compare: Single-operator comparison
//! - PatternMatch: Text pattern with match type and case sensitivity
//! - ValuesError: Soft validation error with a stable content hash
//!
//! All of them are immutable once constructed; mutation happens at the
//! [`crate::bag::ValuesBag`] level by adding and removing whole expressions.

use crate::error::{Result, SearchError};
use crate::scalar::Scalar;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

// ============================================================================
// SingleValue
// ============================================================================

/// A single (in-)equality value
///
/// Carries the normalized value plus an optional view representation,
/// e.g. `Date(2024-01-15)` with view value `"15/01/2024"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleValue {
    value: Scalar,
    view_value: Option<Scalar>,
}

impl SingleValue {
    /// Create a new single value without a separate view representation
    pub fn new(value: impl Into<Scalar>) -> Self {
        SingleValue {
            value: value.into(),
            view_value: None,
        }
    }

    /// Create a new single value with an explicit view representation
    pub fn with_view_value(value: impl Into<Scalar>, view_value: impl Into<Scalar>) -> Self {
        SingleValue {
            value: value.into(),
            view_value: Some(view_value.into()),
        }
    }

    /// The normalized value
    pub fn value(&self) -> &Scalar {
        &self.value
    }

    /// The view representation, falling back to the normalized value
    pub fn view_value(&self) -> &Scalar {
        self.view_value.as_ref().unwrap_or(&self.value)
    }
}

// ============================================================================
// Range
// ============================================================================

/// A bounded interval value
///
/// Both bounds are inclusive unless configured otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Range {
    lower: Scalar,
    upper: Scalar,
    inclusive_lower: bool,
    inclusive_upper: bool,
}

impl Range {
    /// Create a new range, inclusive on both ends
    pub fn new(lower: impl Into<Scalar>, upper: impl Into<Scalar>) -> Self {
        Range {
            lower: lower.into(),
            upper: upper.into(),
            inclusive_lower: true,
            inclusive_upper: true,
        }
    }

    /// Create a new range with explicit bound inclusivity
    pub fn with_bounds(
        lower: impl Into<Scalar>,
        upper: impl Into<Scalar>,
        inclusive_lower: bool,
        inclusive_upper: bool,
    ) -> Self {
        Range {
            lower: lower.into(),
            upper: upper.into(),
            inclusive_lower,
            inclusive_upper,
        }
    }

    /// The lower bound
    pub fn lower(&self) -> &Scalar {
        &self.lower
    }

    /// The upper bound
    pub fn upper(&self) -> &Scalar {
        &self.upper
    }

    /// Whether the lower bound itself is part of the interval
    pub fn is_lower_inclusive(&self) -> bool {
        self.inclusive_lower
    }

    /// Whether the upper bound itself is part of the interval
    pub fn is_upper_inclusive(&self) -> bool {
        self.inclusive_upper
    }
}

// ============================================================================
// Compare
// ============================================================================

/// Comparison operator for [`Compare`] values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOperator {
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<>`
    NotEq,
}

impl CompareOperator {
    /// The operator's source token
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOperator::Lt => "<",
            CompareOperator::Lte => "<=",
            CompareOperator::Gt => ">",
            CompareOperator::Gte => ">=",
            CompareOperator::NotEq => "<>",
        }
    }
}

impl fmt::Display for CompareOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompareOperator {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "<" => Ok(CompareOperator::Lt),
            "<=" => Ok(CompareOperator::Lte),
            ">" => Ok(CompareOperator::Gt),
            ">=" => Ok(CompareOperator::Gte),
            "<>" => Ok(CompareOperator::NotEq),
            _ => Err(SearchError::InvalidArgument(format!(
                "unknown comparison operator \"{}\"",
                s
            ))),
        }
    }
}

/// A single-operator comparison value, e.g. `> 100`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compare {
    value: Scalar,
    operator: CompareOperator,
}

impl Compare {
    /// Create a new comparison
    pub fn new(value: impl Into<Scalar>, operator: CompareOperator) -> Self {
        Compare {
            value: value.into(),
            operator,
        }
    }

    /// The compared-against value
    pub fn value(&self) -> &Scalar {
        &self.value
    }

    /// The comparison operator
    pub fn operator(&self) -> CompareOperator {
        self.operator
    }
}

// ============================================================================
// PatternMatch
// ============================================================================

/// Match strategy for [`PatternMatch`] values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternMatchType {
    /// Value occurs anywhere in the text
    Contains,
    /// Text starts with the value
    StartsWith,
    /// Text ends with the value
    EndsWith,
    /// Text equals the value
    Equals,
    /// Negation of [`PatternMatchType::Contains`]
    NotContains,
    /// Negation of [`PatternMatchType::StartsWith`]
    NotStartsWith,
    /// Negation of [`PatternMatchType::EndsWith`]
    NotEndsWith,
    /// Negation of [`PatternMatchType::Equals`]
    NotEquals,
}

impl PatternMatchType {
    /// The match type's canonical token
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternMatchType::Contains => "contains",
            PatternMatchType::StartsWith => "starts-with",
            PatternMatchType::EndsWith => "ends-with",
            PatternMatchType::Equals => "equals",
            PatternMatchType::NotContains => "not-contains",
            PatternMatchType::NotStartsWith => "not-starts-with",
            PatternMatchType::NotEndsWith => "not-ends-with",
            PatternMatchType::NotEquals => "not-equals",
        }
    }

    /// Whether this is one of the negated match types
    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            PatternMatchType::NotContains
                | PatternMatchType::NotStartsWith
                | PatternMatchType::NotEndsWith
                | PatternMatchType::NotEquals
        )
    }
}

impl fmt::Display for PatternMatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternMatchType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "contains" => Ok(PatternMatchType::Contains),
            "starts-with" => Ok(PatternMatchType::StartsWith),
            "ends-with" => Ok(PatternMatchType::EndsWith),
            "equals" => Ok(PatternMatchType::Equals),
            "not-contains" => Ok(PatternMatchType::NotContains),
            "not-starts-with" => Ok(PatternMatchType::NotStartsWith),
            "not-ends-with" => Ok(PatternMatchType::NotEndsWith),
            "not-equals" => Ok(PatternMatchType::NotEquals),
            _ => Err(SearchError::InvalidArgument(format!(
                "unknown pattern match type \"{}\"",
                s
            ))),
        }
    }
}

/// A text pattern value, e.g. `contains "foo"` (case insensitive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    value: String,
    match_type: PatternMatchType,
    case_insensitive: bool,
}

impl PatternMatch {
    /// Create a new case-sensitive pattern match
    pub fn new(value: impl Into<String>, match_type: PatternMatchType) -> Self {
        PatternMatch {
            value: value.into(),
            match_type,
            case_insensitive: false,
        }
    }

    /// Builder: mark the pattern as case insensitive
    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    /// The pattern text
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The match strategy
    pub fn match_type(&self) -> PatternMatchType {
        self.match_type
    }

    /// Whether matching ignores case
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }
}

// ============================================================================
// ValuesError
// ============================================================================

/// A soft validation error attached to a `ValuesBag`
///
/// The `path` addresses the offending value inside the bag (e.g.
/// `ranges[0].lower`); an empty path addresses the field as a whole.
/// Identity for deduplication is [`ValuesError::hash`], a pure function of
/// the two semantic fields: constructing the same error twice always yields
/// the same hash, regardless of construction order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuesError {
    path: String,
    message: String,
}

impl ValuesError {
    /// Create a new error for a value subpath
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        ValuesError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new error addressing the field as a whole
    pub fn for_field(message: impl Into<String>) -> Self {
        Self::new("", message)
    }

    /// The value subpath this error addresses
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Stable content hash identifying this error
    ///
    /// FxHash is unseeded, so the result depends only on `path` and
    /// `message` and is identical across instances and processes.
    pub fn hash(&self) -> String {
        let mut hasher = FxHasher::default();
        self.path.hash(&mut hasher);
        self.message.hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }
}

impl fmt::Display for ValuesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}
