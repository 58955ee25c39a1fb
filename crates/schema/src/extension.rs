//! Extension sources
//!
//! An extension source supplies field-type instances and type-extension
//! instances to the registry. Sources may assemble these however they like
//! (preloaded maps, lazy factories) as long as both queries are
//! idempotent: the registry caches on top of them and never expects an
//! answer to change.

use crate::field_type::{FieldType, FieldTypeExtension};
use std::collections::HashMap;
use std::sync::Arc;

/// A supplier of field types and type extensions
pub trait SearchExtension: Send + Sync {
    /// The type registered under `name`, if this source provides it
    fn field_type(&self, name: &str) -> Option<Arc<dyn FieldType>>;

    /// Whether this source provides a type under `name`
    fn has_type(&self, name: &str) -> bool {
        self.field_type(name).is_some()
    }

    /// The extensions this source registers for type `name`, in
    /// registration order
    fn type_extensions(&self, name: &str) -> Vec<Arc<dyn FieldTypeExtension>> {
        let _ = name;
        Vec::new()
    }
}

/// Map-backed extension source
///
/// The simplest source: everything is registered up front via the
/// builder methods.
#[derive(Default)]
pub struct PreloadedExtension {
    types: HashMap<String, Arc<dyn FieldType>>,
    type_extensions: HashMap<String, Vec<Arc<dyn FieldTypeExtension>>>,
}

impl PreloadedExtension {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: register a type under `name`
    pub fn with_type(mut self, name: impl Into<String>, field_type: Arc<dyn FieldType>) -> Self {
        self.types.insert(name.into(), field_type);
        self
    }

    /// Builder: append a type extension for type `name`
    pub fn with_type_extension(
        mut self,
        name: impl Into<String>,
        extension: Arc<dyn FieldTypeExtension>,
    ) -> Self {
        self.type_extensions
            .entry(name.into())
            .or_default()
            .push(extension);
        self
    }
}

impl SearchExtension for PreloadedExtension {
    fn field_type(&self, name: &str) -> Option<Arc<dyn FieldType>> {
        self.types.get(name).cloned()
    }

    fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    fn type_extensions(&self, name: &str) -> Vec<Arc<dyn FieldTypeExtension>> {
        self.type_extensions.get(name).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_type::OptionsMap;
    use fieldsearch_core::Scalar;

    struct DummyType;

    impl FieldType for DummyType {
        fn block_prefix(&self) -> &str {
            "dummy"
        }
    }

    struct DummyExtension(&'static str);

    impl FieldTypeExtension for DummyExtension {
        fn extended_type(&self) -> &str {
            "dummy"
        }

        fn default_options(&self, options: &mut OptionsMap) {
            options.insert("tag".to_string(), Scalar::from(self.0));
        }
    }

    #[test]
    fn test_preloaded_type_lookup() {
        let source = PreloadedExtension::new().with_type("dummy", Arc::new(DummyType));

        assert!(source.has_type("dummy"));
        assert!(!source.has_type("other"));
        assert!(source.field_type("dummy").is_some());
        assert!(source.field_type("other").is_none());
    }

    #[test]
    fn test_preloaded_extensions_keep_registration_order() {
        let source = PreloadedExtension::new()
            .with_type("dummy", Arc::new(DummyType))
            .with_type_extension("dummy", Arc::new(DummyExtension("first")))
            .with_type_extension("dummy", Arc::new(DummyExtension("second")));

        let extensions = source.type_extensions("dummy");
        assert_eq!(extensions.len(), 2);

        let mut options = OptionsMap::new();
        for extension in &extensions {
            extension.default_options(&mut options);
        }
        // second registration ran last and won
        assert_eq!(options.get("tag"), Some(&Scalar::from("second")));
    }

    #[test]
    fn test_preloaded_queries_are_idempotent() {
        let source = PreloadedExtension::new().with_type("dummy", Arc::new(DummyType));
        assert!(source.has_type("dummy"));
        assert!(source.has_type("dummy"));
        assert!(source.type_extensions("unknown").is_empty());
        assert!(source.type_extensions("unknown").is_empty());
    }
}
