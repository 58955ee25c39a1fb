//! Built-in field types
//!
//! A minimal core vocabulary: a root `field` type every concrete type
//! inherits from, plus `text`, `integer`, and `date`. [`CoreExtension`]
//! preloads all four so applications start from a working registry.

use crate::extension::{PreloadedExtension, SearchExtension};
use crate::field::{SearchField, SearchFieldView, ValueTypeKind};
use crate::field_type::{FieldType, FieldTypeExtension, OptionsMap};
use fieldsearch_core::{Result, Scalar};
use std::sync::Arc;

/// Identifier of the root type
pub const FIELD_TYPE: &str = "field";
/// Identifier of the text type
pub const TEXT_TYPE: &str = "text";
/// Identifier of the integer type
pub const INTEGER_TYPE: &str = "integer";
/// Identifier of the date type
pub const DATE_TYPE: &str = "date";

/// Root of the built-in inheritance forest
///
/// Contributes nothing by itself; it exists so extensions targeting
/// `field` reach every built-in type at once.
#[derive(Debug, Default)]
pub struct BaseFieldType;

impl FieldType for BaseFieldType {
    fn block_prefix(&self) -> &str {
        "field"
    }

    fn build_view(&self, view: &mut SearchFieldView, field: &SearchField) {
        if let Some(label) = field.option("label") {
            view.vars.insert("label".to_string(), label.clone());
        }
    }
}

/// Free-text field type: pattern matching, case-insensitive by default
#[derive(Debug, Default)]
pub struct TextType;

impl FieldType for TextType {
    fn block_prefix(&self) -> &str {
        "text"
    }

    fn parent_type(&self) -> Option<&str> {
        Some(FIELD_TYPE)
    }

    fn default_options(&self, options: &mut OptionsMap) {
        options.insert("case_sensitive".to_string(), Scalar::Bool(false));
    }

    fn build_type(&self, field: &mut SearchField) -> Result<()> {
        field.set_value_type_support(ValueTypeKind::PatternMatch, true)
    }

    fn build_view(&self, view: &mut SearchFieldView, field: &SearchField) {
        if let Some(case_sensitive) = field.option("case_sensitive") {
            view.vars
                .insert("case_sensitive".to_string(), case_sensitive.clone());
        }
    }
}

/// Integer field type: ranges and comparisons
#[derive(Debug, Default)]
pub struct IntegerType;

impl FieldType for IntegerType {
    fn block_prefix(&self) -> &str {
        "integer"
    }

    fn parent_type(&self) -> Option<&str> {
        Some(FIELD_TYPE)
    }

    fn build_type(&self, field: &mut SearchField) -> Result<()> {
        field.set_value_type_support(ValueTypeKind::Range, true)?;
        field.set_value_type_support(ValueTypeKind::Comparison, true)
    }
}

/// Calendar-date field type: ranges and comparisons plus a display format
#[derive(Debug, Default)]
pub struct DateType;

impl FieldType for DateType {
    fn block_prefix(&self) -> &str {
        "date"
    }

    fn parent_type(&self) -> Option<&str> {
        Some(FIELD_TYPE)
    }

    fn default_options(&self, options: &mut OptionsMap) {
        options.insert("format".to_string(), Scalar::from("%Y-%m-%d"));
    }

    fn build_type(&self, field: &mut SearchField) -> Result<()> {
        field.set_value_type_support(ValueTypeKind::Range, true)?;
        field.set_value_type_support(ValueTypeKind::Comparison, true)
    }

    fn build_view(&self, view: &mut SearchFieldView, field: &SearchField) {
        if let Some(format) = field.option("format") {
            view.vars.insert("format".to_string(), format.clone());
        }
    }
}

/// Extension source preloading the built-in types
pub struct CoreExtension {
    inner: PreloadedExtension,
}

impl CoreExtension {
    /// Create the source with all built-in types registered
    pub fn new() -> Self {
        let inner = PreloadedExtension::new()
            .with_type(FIELD_TYPE, Arc::new(BaseFieldType))
            .with_type(TEXT_TYPE, Arc::new(TextType))
            .with_type(INTEGER_TYPE, Arc::new(IntegerType))
            .with_type(DATE_TYPE, Arc::new(DateType));
        CoreExtension { inner }
    }
}

impl Default for CoreExtension {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchExtension for CoreExtension {
    fn field_type(&self, name: &str) -> Option<Arc<dyn FieldType>> {
        self.inner.field_type(name)
    }

    fn has_type(&self, name: &str) -> bool {
        self.inner.has_type(name)
    }

    fn type_extensions(&self, name: &str) -> Vec<Arc<dyn FieldTypeExtension>> {
        self.inner.type_extensions(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FieldRegistry;

    fn core_registry() -> FieldRegistry {
        FieldRegistry::new(vec![Arc::new(CoreExtension::new())])
    }

    #[test]
    fn test_core_extension_provides_all_types() {
        let registry = core_registry();
        for name in [FIELD_TYPE, TEXT_TYPE, INTEGER_TYPE, DATE_TYPE] {
            assert!(registry.has_type(name), "missing type {}", name);
        }
    }

    #[test]
    fn test_builtin_types_share_resolved_root() {
        let registry = core_registry();
        let root = registry.get_type(FIELD_TYPE).unwrap();
        let text = registry.get_type(TEXT_TYPE).unwrap();
        let date = registry.get_type(DATE_TYPE).unwrap();

        assert!(Arc::ptr_eq(text.parent().unwrap(), &root));
        assert!(Arc::ptr_eq(date.parent().unwrap(), &root));
    }

    #[test]
    fn test_text_field_configuration() {
        let registry = core_registry();
        let text = registry.get_type(TEXT_TYPE).unwrap();
        let field = text.create_field("name", OptionsMap::new()).unwrap();

        assert!(field.supports_value_type(ValueTypeKind::PatternMatch));
        assert!(!field.supports_value_type(ValueTypeKind::Range));
        assert_eq!(field.option("case_sensitive"), Some(&Scalar::Bool(false)));
    }

    #[test]
    fn test_integer_field_configuration() {
        let registry = core_registry();
        let integer = registry.get_type(INTEGER_TYPE).unwrap();
        let field = integer.create_field("price", OptionsMap::new()).unwrap();

        assert!(field.supports_value_type(ValueTypeKind::Range));
        assert!(field.supports_value_type(ValueTypeKind::Comparison));
        assert!(!field.supports_value_type(ValueTypeKind::PatternMatch));
    }

    #[test]
    fn test_date_view_carries_format() {
        let registry = core_registry();
        let date = registry.get_type(DATE_TYPE).unwrap();

        let mut options = OptionsMap::new();
        options.insert("label".to_string(), Scalar::from("Created"));
        let mut field = date.create_field("created_at", options).unwrap();
        field.set_data_locked().unwrap();

        let view = field.create_view().unwrap();
        // base type's hook ran (label) and date's hook ran (format)
        assert_eq!(view.vars.get("label"), Some(&Scalar::from("Created")));
        assert_eq!(view.vars.get("format"), Some(&Scalar::from("%Y-%m-%d")));
    }
}
