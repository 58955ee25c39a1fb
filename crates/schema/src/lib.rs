//! Schema layer for FieldSearch
//!
//! This crate defines the searchable-schema side of the system:
//! - FieldType / FieldTypeExtension: Pure configuration strategies
//! - ResolvedFieldType: A type flattened across its parent chain and
//!   extensions into one effective configuration
//! - FieldRegistry: Resolves type identifiers to cached resolved types
//! - SearchField / SearchFieldView: The per-field runtime configuration
//! - FieldSet / FieldSetBuilder / FieldSetRegistry: Named field schemas
//! - Built-in `field` / `text` / `integer` / `date` types
//!
//! Types form a named inheritance forest keyed by string identifiers, not
//! an object-inheritance chain: a type names its parent, the registry
//! resolves the chain, and extensions decorate any type without
//! subclassing it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod extension;
pub mod field;
pub mod field_set;
pub mod field_type;
pub mod registry;
pub mod resolved;
pub mod types;

// Re-export commonly used types at the crate root
pub use extension::{PreloadedExtension, SearchExtension};
pub use field::{DataTransformer, SearchField, SearchFieldView, ValueComparator, ValueTypeKind};
pub use field_set::{
    ConfiguratorFactory, FieldSet, FieldSetBuilder, FieldSetConfigurator, FieldSetRegistry,
};
pub use field_type::{FieldType, FieldTypeExtension, OptionsMap};
pub use registry::{FieldRegistry, StandaloneTypeFactory};
pub use resolved::{DefaultResolvedTypeFactory, ResolvedFieldType, ResolvedTypeFactory};
pub use types::{
    BaseFieldType, CoreExtension, DateType, IntegerType, TextType, DATE_TYPE, FIELD_TYPE,
    INTEGER_TYPE, TEXT_TYPE,
};
