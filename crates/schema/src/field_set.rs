//! Field sets and the configurator registry
//!
//! A `FieldSet` is a named schema: a frozen collection of locked
//! `SearchField`s. Sets are assembled through a `FieldSetBuilder` against
//! a `FieldRegistry`, usually driven by a reusable
//! [`FieldSetConfigurator`]. The `FieldSetRegistry` holds configurators
//! under string keys, instantiating them lazily and memoizing the
//! instance.

use crate::field::SearchField;
use crate::field_type::OptionsMap;
use crate::registry::FieldRegistry;
use fieldsearch_core::{Result, SearchError};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Builds a field set into a provided builder
pub trait FieldSetConfigurator: Send + Sync {
    /// Add this configurator's fields to the builder
    fn build_field_set(&self, builder: &mut FieldSetBuilder<'_>) -> Result<()>;
}

impl std::fmt::Debug for dyn FieldSetConfigurator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FieldSetConfigurator")
    }
}

/// A frozen, named collection of locked search fields
#[derive(Debug)]
pub struct FieldSet {
    set_name: Option<String>,
    fields: BTreeMap<String, Arc<SearchField>>,
}

impl FieldSet {
    /// The set's name, if any
    pub fn set_name(&self) -> Option<&str> {
        self.set_name.as_deref()
    }

    /// Whether a field exists under `name`
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// The field registered under `name`
    ///
    /// Fails with [`SearchError::InvalidArgument`] for unknown names; a
    /// schema consumer asking for an unregistered field is a caller bug.
    pub fn field(&self, name: &str) -> Result<&Arc<SearchField>> {
        self.fields.get(name).ok_or_else(|| {
            SearchError::InvalidArgument(format!("field set has no field named \"{}\"", name))
        })
    }

    /// All fields, ordered by name
    pub fn fields(&self) -> &BTreeMap<String, Arc<SearchField>> {
        &self.fields
    }

    /// Number of fields in the set
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the set holds no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Assembles a [`FieldSet`] against a field registry
pub struct FieldSetBuilder<'a> {
    registry: &'a FieldRegistry,
    set_name: Option<String>,
    fields: BTreeMap<String, Arc<SearchField>>,
}

impl std::fmt::Debug for FieldSetBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSetBuilder")
            .field("set_name", &self.set_name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl<'a> FieldSetBuilder<'a> {
    /// Start a builder over the given registry
    pub fn new(registry: &'a FieldRegistry) -> Self {
        FieldSetBuilder {
            registry,
            set_name: None,
            fields: BTreeMap::new(),
        }
    }

    /// Name the resulting set
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.set_name = Some(name.into());
        self
    }

    /// Add a field of the given type, created, configured, and locked
    ///
    /// Replaces any previously added field with the same name.
    pub fn add_field(
        &mut self,
        name: &str,
        type_name: &str,
        options: OptionsMap,
    ) -> Result<&mut Self> {
        let resolved = self.registry.get_type(type_name)?;
        let mut field = resolved.create_field(name, options)?;
        field.set_data_locked()?;
        self.fields.insert(name.to_string(), Arc::new(field));
        Ok(self)
    }

    /// Drop a previously added field; no-op when absent
    pub fn remove_field(&mut self, name: &str) -> &mut Self {
        self.fields.remove(name);
        self
    }

    /// Whether a field was added under `name`
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Finish the set
    pub fn build(self) -> FieldSet {
        FieldSet {
            set_name: self.set_name,
            fields: self.fields,
        }
    }
}

/// Factory producing a configurator instance for one key
pub type ConfiguratorFactory = Arc<dyn Fn() -> Arc<dyn FieldSetConfigurator> + Send + Sync>;

/// Registry of field-set configurators
///
/// Keys map to lazy factories; the produced instance is memoized so a key
/// invoked twice yields the same instance. Registered keys always win over
/// the standalone table, even when both carry the same key.
#[derive(Default)]
pub struct FieldSetRegistry {
    registered: HashMap<String, ConfiguratorFactory>,
    standalone: HashMap<String, ConfiguratorFactory>,
    instances: Mutex<HashMap<String, Arc<dyn FieldSetConfigurator>>>,
}

impl FieldSetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: register a configurator factory under `name`
    pub fn with_configurator(
        mut self,
        name: impl Into<String>,
        factory: impl Fn() -> Arc<dyn FieldSetConfigurator> + Send + Sync + 'static,
    ) -> Self {
        self.registered.insert(name.into(), Arc::new(factory));
        self
    }

    /// Builder: register a standalone (fallback) configurator factory
    ///
    /// Standalone entries play the role of directly instantiable
    /// configurators looked up by identifier; registered keys shadow them.
    pub fn with_standalone_configurator(
        mut self,
        name: impl Into<String>,
        factory: impl Fn() -> Arc<dyn FieldSetConfigurator> + Send + Sync + 'static,
    ) -> Self {
        self.standalone.insert(name.into(), Arc::new(factory));
        self
    }

    /// Whether `name` resolves to a configurator
    pub fn has_configurator(&self, name: &str) -> bool {
        self.registered.contains_key(name) || self.standalone.contains_key(name)
    }

    /// The configurator for `name`, instantiated lazily and memoized
    ///
    /// Fails with [`SearchError::InvalidArgument`] naming the key when
    /// neither table resolves it.
    pub fn get_configurator(&self, name: &str) -> Result<Arc<dyn FieldSetConfigurator>> {
        let mut instances = self.instances.lock();
        if let Some(instance) = instances.get(name) {
            return Ok(Arc::clone(instance));
        }

        let factory = self
            .registered
            .get(name)
            .or_else(|| self.standalone.get(name))
            .ok_or_else(|| {
                SearchError::InvalidArgument(format!(
                    "could not load field-set configurator \"{}\"",
                    name
                ))
            })?;

        let instance = (**factory)();
        instances.insert(name.to_string(), Arc::clone(&instance));
        Ok(instance)
    }
}
