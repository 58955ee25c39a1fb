//! Field type and type-extension traits
//!
//! Both traits are pure configuration strategies: they own no field
//! instances and keep no per-field state. Instances are registered once
//! and shared as `Arc<dyn ...>` across every field built from them.

use crate::field::{SearchField, SearchFieldView};
use fieldsearch_core::{Result, Scalar};
use std::collections::BTreeMap;

/// Option map used for type defaults, field options, and view vars
pub type OptionsMap = BTreeMap<String, Scalar>;

/// A field type definition
///
/// A type declares its block prefix, optionally names a parent type
/// (a string key into the registry), and contributes configuration
/// through three hooks. The hooks of a resolved type run parent-first,
/// then the type itself, then its extensions.
pub trait FieldType: Send + Sync {
    /// Prefix identifying this type in view building
    fn block_prefix(&self) -> &str;

    /// Identifier of the parent type, if any
    fn parent_type(&self) -> Option<&str> {
        None
    }

    /// Contribute default options; later writers win on key collisions
    fn default_options(&self, _options: &mut OptionsMap) {}

    /// Configure a freshly constructed field (e.g. enable value-type
    /// support) before it is handed to the caller
    fn build_type(&self, _field: &mut SearchField) -> Result<()> {
        Ok(())
    }

    /// Populate the field's view given the field's final options
    fn build_view(&self, _view: &mut SearchFieldView, _field: &SearchField) {}
}

/// A targeted decorator augmenting one field type without subclassing it
///
/// Extensions declare the identifier of the type they extend; their hooks
/// run after the extended type's own hooks, so they can override defaults
/// and adjust an already populated view.
pub trait FieldTypeExtension: Send + Sync {
    /// Identifier of the type this extension augments
    fn extended_type(&self) -> &str;

    /// Contribute or override default options
    fn default_options(&self, _options: &mut OptionsMap) {}

    /// Adjust field configuration after the base type's `build_type`
    fn build_type(&self, _field: &mut SearchField) -> Result<()> {
        Ok(())
    }

    /// Adjust the view after the base type populated it
    fn build_view(&self, _view: &mut SearchFieldView, _field: &SearchField) {}
}
