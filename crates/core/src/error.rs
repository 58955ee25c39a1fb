//! Error types for FieldSearch
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! These errors report programmer and configuration mistakes. User-facing
//! validation problems travel as [`crate::value::ValuesError`] entries on a
//! `ValuesBag` instead, so they never short-circuit condition assembly.

use thiserror::Error;

/// Result type alias for FieldSearch operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Error types for the FieldSearch engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Mutation attempted after the container's data was locked
    #[error("{what} setter methods cannot be accessed anymore once the data is locked")]
    LockedState {
        /// Name of the container that rejected the mutation
        what: &'static str,
    },

    /// View creation requested while the field configuration is not locked
    #[error("unable to create a field view while the configuration is not locked")]
    ConfigNotLocked,

    /// Caller passed a value-type kind that is not recognized
    #[error("unable to configure support for unknown value type \"{kind}\"")]
    UnknownValueType {
        /// The unrecognized kind token
        kind: String,
    },

    /// An identifier could not be resolved to a type, configurator, or value
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A field type's parent chain loops back on itself
    #[error("field type parent chain contains a cycle: {chain}")]
    TypeCycle {
        /// The resolution chain up to and including the repeated identifier
        chain: String,
    },

    /// A data transformer could not map a value to or from the domain
    #[error("value transformation failed: {0}")]
    Transformation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_locked_state() {
        let err = SearchError::LockedState { what: "ValuesBag" };
        let msg = err.to_string();
        assert!(msg.contains("ValuesBag"));
        assert!(msg.contains("locked"));
    }

    #[test]
    fn test_error_display_config_not_locked() {
        let err = SearchError::ConfigNotLocked;
        assert!(err.to_string().contains("not locked"));
    }

    #[test]
    fn test_error_display_unknown_value_type() {
        let err = SearchError::UnknownValueType {
            kind: "pattern".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("unknown value type"));
        assert!(msg.contains("pattern"));
    }

    #[test]
    fn test_error_display_invalid_argument() {
        let err = SearchError::InvalidArgument("could not load field type \"text\"".to_string());
        assert!(err.to_string().contains("could not load field type"));
    }

    #[test]
    fn test_error_display_type_cycle() {
        let err = SearchError::TypeCycle {
            chain: "a -> b -> a".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("cycle"));
        assert!(msg.contains("a -> b -> a"));
    }

    #[test]
    fn test_error_display_transformation() {
        let err = SearchError::Transformation("no choice for label \"Yes\"".to_string());
        assert!(err.to_string().contains("transformation failed"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }

        fn returns_error() -> Result<i32> {
            Err(SearchError::ConfigNotLocked)
        }

        assert_eq!(returns_result().unwrap(), 42);
        assert!(returns_error().is_err());
    }

    #[test]
    fn test_error_equality() {
        let a = SearchError::LockedState { what: "ValuesBag" };
        let b = SearchError::LockedState { what: "ValuesBag" };
        let c = SearchError::LockedState {
            what: "SearchField",
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
