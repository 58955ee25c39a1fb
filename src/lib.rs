//! FieldSearch - Field-type resolution and value-validation engine
//!
//! FieldSearch lets an application define a set of searchable fields, each
//! with a type and per-field rules about which value expressions are
//! legal. User input is turned into a structured, validated search
//! condition: a tree of logical groups containing per-field value
//! collections, consumed by query generators and exporters.
//!
//! # Quick Start
//!
//! ```
//! use fieldsearch::{
//!     CoreExtension, FieldRegistry, FieldSetBuilder, OptionsMap,
//!     SearchCondition, SingleValue, ValuesBag, ValuesGroup,
//! };
//! use std::sync::Arc;
//!
//! // A registry over the built-in types
//! let registry = FieldRegistry::new(vec![Arc::new(CoreExtension::new())]);
//!
//! // A schema with two fields
//! let mut builder = FieldSetBuilder::new(&registry);
//! builder.add_field("name", "text", OptionsMap::new())?;
//! builder.add_field("price", "integer", OptionsMap::new())?;
//! let fields = builder.build();
//!
//! // A condition against that schema
//! let mut bag = ValuesBag::new();
//! bag.add_single_value(SingleValue::new("socks"))?;
//! let mut root = ValuesGroup::new();
//! root.add_field("name", bag)?;
//! let condition = SearchCondition::new(root)?;
//!
//! assert!(fields.has_field("price"));
//! assert!(!condition.is_empty());
//! # Ok::<(), fieldsearch::SearchError>(())
//! ```
//!
//! # Architecture
//!
//! The condition-tree side (values, bags, groups, conditions) lives in
//! `fieldsearch-core`; the schema side (types, registries, fields, field
//! sets) lives in `fieldsearch-schema`. This crate re-exports both.

// Re-export the public API of both layers
pub use fieldsearch_core::*;
pub use fieldsearch_schema::*;
