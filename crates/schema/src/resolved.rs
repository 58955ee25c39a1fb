//! Resolved field types
//!
//! A `ResolvedFieldType` is a type definition flattened against its parent
//! chain and applicable extensions. The composition order is the crux of
//! the inheritance model and holds for every hook:
//!
//! 1. the parent's full composition (recursively),
//! 2. the inner type itself,
//! 3. each extension in registration order.
//!
//! Later writers win on option collisions; view hooks run in the same
//! order so extensions can adjust what the base type already populated.

use crate::field::{SearchField, SearchFieldView};
use crate::field_type::{FieldType, FieldTypeExtension, OptionsMap};
use fieldsearch_core::Result;
use std::fmt;
use std::sync::Arc;

/// A field type resolved against its parent chain and extensions
///
/// Built once per identifier by the registry and cached; immutable after
/// construction. The parent is a shared back-reference to the parent's own
/// cached resolved type, never a private copy.
pub struct ResolvedFieldType {
    inner: Arc<dyn FieldType>,
    parent: Option<Arc<ResolvedFieldType>>,
    extensions: Vec<Arc<dyn FieldTypeExtension>>,
}

impl fmt::Debug for ResolvedFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedFieldType")
            .field("block_prefix", &self.inner.block_prefix())
            .field("has_parent", &self.parent.is_some())
            .field("extensions", &self.extensions.len())
            .finish()
    }
}

impl ResolvedFieldType {
    /// Compose a resolved type from its parts
    pub fn new(
        inner: Arc<dyn FieldType>,
        extensions: Vec<Arc<dyn FieldTypeExtension>>,
        parent: Option<Arc<ResolvedFieldType>>,
    ) -> Self {
        ResolvedFieldType {
            inner,
            parent,
            extensions,
        }
    }

    /// The unresolved inner type (for identity comparisons)
    pub fn inner_type(&self) -> &Arc<dyn FieldType> {
        &self.inner
    }

    /// The resolved parent type, if the inner type declares one
    pub fn parent(&self) -> Option<&Arc<ResolvedFieldType>> {
        self.parent.as_ref()
    }

    /// The extensions applied to this type, in registration order
    pub fn extensions(&self) -> &[Arc<dyn FieldTypeExtension>] {
        &self.extensions
    }

    /// The inner type's block prefix
    pub fn block_prefix(&self) -> &str {
        self.inner.block_prefix()
    }

    /// The effective default options of the whole chain
    pub fn default_options(&self) -> OptionsMap {
        let mut options = OptionsMap::new();
        self.compose_options(&mut options);
        options
    }

    fn compose_options(&self, options: &mut OptionsMap) {
        if let Some(parent) = &self.parent {
            parent.compose_options(options);
        }
        self.inner.default_options(options);
        for extension in &self.extensions {
            extension.default_options(options);
        }
    }

    /// Run the `build_type` hook chain on a fresh field
    pub fn build_type(&self, field: &mut SearchField) -> Result<()> {
        if let Some(parent) = &self.parent {
            parent.build_type(field)?;
        }
        self.inner.build_type(field)?;
        for extension in &self.extensions {
            extension.build_type(field)?;
        }
        Ok(())
    }

    /// Run the `build_view` hook chain against a view
    pub fn build_view(&self, view: &mut SearchFieldView, field: &SearchField) {
        if let Some(parent) = &self.parent {
            parent.build_view(view, field);
        }
        self.inner.build_view(view, field);
        for extension in &self.extensions {
            extension.build_view(view, field);
        }
    }

    /// Create a field of this type
    ///
    /// The caller's options are merged over the chain's defaults (caller
    /// wins), then the `build_type` hook chain configures the field. The
    /// field is returned unlocked so the caller can finish configuring it.
    pub fn create_field(self: &Arc<Self>, name: &str, options: OptionsMap) -> Result<SearchField> {
        let mut merged = self.default_options();
        merged.extend(options);

        let mut field = SearchField::new(name, Arc::clone(self), merged)?;
        self.build_type(&mut field)?;
        Ok(field)
    }
}

/// Factory seam for building resolved types
///
/// The registry is agnostic to how resolved types are assembled; tests
/// substitute this seam to observe resolution without real composition.
pub trait ResolvedTypeFactory: Send + Sync {
    /// Compose `(inner, extensions, parent)` into a shared resolved type
    fn create_resolved_type(
        &self,
        inner: Arc<dyn FieldType>,
        extensions: Vec<Arc<dyn FieldTypeExtension>>,
        parent: Option<Arc<ResolvedFieldType>>,
    ) -> Arc<ResolvedFieldType>;
}

/// The standard factory: plain [`ResolvedFieldType::new`] composition
#[derive(Debug, Default)]
pub struct DefaultResolvedTypeFactory;

impl ResolvedTypeFactory for DefaultResolvedTypeFactory {
    fn create_resolved_type(
        &self,
        inner: Arc<dyn FieldType>,
        extensions: Vec<Arc<dyn FieldTypeExtension>>,
        parent: Option<Arc<ResolvedFieldType>>,
    ) -> Arc<ResolvedFieldType> {
        Arc::new(ResolvedFieldType::new(inner, extensions, parent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldsearch_core::Scalar;

    struct StubType {
        prefix: &'static str,
        parent: Option<&'static str>,
        defaults: Vec<(&'static str, Scalar)>,
    }

    impl FieldType for StubType {
        fn block_prefix(&self) -> &str {
            self.prefix
        }

        fn parent_type(&self) -> Option<&str> {
            self.parent
        }

        fn default_options(&self, options: &mut OptionsMap) {
            for (key, value) in &self.defaults {
                options.insert((*key).to_string(), value.clone());
            }
        }

        fn build_view(&self, view: &mut SearchFieldView, _field: &SearchField) {
            view.vars
                .insert("chain".to_string(), Scalar::from(self.prefix));
        }
    }

    struct StubExtension {
        target: &'static str,
        defaults: Vec<(&'static str, Scalar)>,
    }

    impl FieldTypeExtension for StubExtension {
        fn extended_type(&self) -> &str {
            self.target
        }

        fn default_options(&self, options: &mut OptionsMap) {
            for (key, value) in &self.defaults {
                options.insert((*key).to_string(), value.clone());
            }
        }

        fn build_view(&self, view: &mut SearchFieldView, _field: &SearchField) {
            view.vars
                .insert("chain".to_string(), Scalar::from("extension"));
        }
    }

    fn resolved_pair() -> Arc<ResolvedFieldType> {
        let parent = Arc::new(ResolvedFieldType::new(
            Arc::new(StubType {
                prefix: "parent",
                parent: None,
                defaults: vec![("size", Scalar::Int(10)), ("shared", Scalar::from("p"))],
            }),
            vec![],
            None,
        ));

        Arc::new(ResolvedFieldType::new(
            Arc::new(StubType {
                prefix: "child",
                parent: Some("parent"),
                defaults: vec![
                    ("size", Scalar::Int(20)),
                    ("label", Scalar::from("x")),
                ],
            }),
            vec![Arc::new(StubExtension {
                target: "child",
                defaults: vec![("label", Scalar::from("y"))],
            })],
            Some(parent),
        ))
    }

    #[test]
    fn test_option_override_order() {
        let resolved = resolved_pair();
        let options = resolved.default_options();

        // parent's size overridden by the type, type's label by the extension
        assert_eq!(options.get("size"), Some(&Scalar::Int(20)));
        assert_eq!(options.get("label"), Some(&Scalar::from("y")));
        assert_eq!(options.get("shared"), Some(&Scalar::from("p")));
    }

    #[test]
    fn test_view_hook_order_extension_last() {
        let resolved = resolved_pair();
        let mut field = resolved.create_field("price", OptionsMap::new()).unwrap();
        field.set_data_locked().unwrap();

        let view = field.create_view().unwrap();
        // every hook wrote "chain"; the extension ran last
        assert_eq!(view.vars.get("chain"), Some(&Scalar::from("extension")));
    }

    #[test]
    fn test_create_field_caller_options_win() {
        let resolved = resolved_pair();
        let mut options = OptionsMap::new();
        options.insert("size".to_string(), Scalar::Int(99));

        let field = resolved.create_field("price", options).unwrap();
        assert_eq!(field.option("size"), Some(&Scalar::Int(99)));
        assert_eq!(field.option("label"), Some(&Scalar::from("y")));
        assert!(!field.is_data_locked());
    }

    #[test]
    fn test_inner_type_identity() {
        let inner: Arc<dyn FieldType> = Arc::new(StubType {
            prefix: "solo",
            parent: None,
            defaults: vec![],
        });
        let resolved = ResolvedFieldType::new(Arc::clone(&inner), vec![], None);
        assert!(Arc::ptr_eq(resolved.inner_type(), &inner));
        assert_eq!(resolved.block_prefix(), "solo");
        assert!(resolved.parent().is_none());
    }
}
