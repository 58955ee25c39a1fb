//! Field type registry
//!
//! The registry resolves a type identifier to a cached
//! [`ResolvedFieldType`], walking the parent chain and aggregating
//! extensions from the configured sources. Resolution is lazy and
//! memoized: the second `get_type` for an identifier returns the identical
//! `Arc`.
//!
//! There is no resolve-by-class-name fallback. An identifier must either
//! be supplied by an extension source or be registered as a standalone
//! factory at construction time; anything else fails loudly.

use crate::extension::SearchExtension;
use crate::field_type::FieldType;
use crate::resolved::{DefaultResolvedTypeFactory, ResolvedFieldType, ResolvedTypeFactory};
use fieldsearch_core::{Result, SearchError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Factory producing a standalone type instance for one identifier
///
/// Replaces the classic instantiate-by-class-name fallback: callers that
/// want a type resolvable without an extension source register an explicit
/// factory for its identifier instead.
pub type StandaloneTypeFactory = Arc<dyn Fn() -> Arc<dyn FieldType> + Send + Sync>;

/// Per-identifier state of the lazy resolution cache
enum TypeSlot {
    /// Resolution for this identifier is on the current chain; hitting
    /// this slot again means the parent chain loops
    Resolving,
    /// Resolution finished; every later lookup gets this exact instance
    Resolved(Arc<ResolvedFieldType>),
    /// Resolution failed permanently (cycle, broken parent); replayed
    /// verbatim on every later lookup
    Failed(SearchError),
}

/// Resolves and caches field types from one or more extension sources
///
/// The two lazy caches (`has_type` memo and the resolution cache) are the
/// only mutable state and are mutex-guarded; a whole resolution runs under
/// one guard, so concurrent callers block and the first resolution wins.
pub struct FieldRegistry {
    extensions: Vec<Arc<dyn SearchExtension>>,
    standalone: HashMap<String, StandaloneTypeFactory>,
    factory: Arc<dyn ResolvedTypeFactory>,
    known: Mutex<HashMap<String, bool>>,
    resolved: Mutex<HashMap<String, TypeSlot>>,
}

impl FieldRegistry {
    /// Create a registry over an ordered list of extension sources
    pub fn new(extensions: Vec<Arc<dyn SearchExtension>>) -> Self {
        Self::with_factory(extensions, Arc::new(DefaultResolvedTypeFactory))
    }

    /// Create a registry with a custom resolved-type factory
    pub fn with_factory(
        extensions: Vec<Arc<dyn SearchExtension>>,
        factory: Arc<dyn ResolvedTypeFactory>,
    ) -> Self {
        FieldRegistry {
            extensions,
            standalone: HashMap::new(),
            factory,
            known: Mutex::new(HashMap::new()),
            resolved: Mutex::new(HashMap::new()),
        }
    }

    /// Builder: register a standalone type factory for `name`
    ///
    /// Extension sources win over standalone factories when both provide
    /// the same identifier.
    pub fn with_standalone_type(
        mut self,
        name: impl Into<String>,
        factory: impl Fn() -> Arc<dyn FieldType> + Send + Sync + 'static,
    ) -> Self {
        self.standalone.insert(name.into(), Arc::new(factory));
        self
    }

    /// Whether `name` resolves to a type
    ///
    /// Memoized both ways: an identifier proven absent stays absent for
    /// the life of the registry.
    pub fn has_type(&self, name: &str) -> bool {
        let mut known = self.known.lock();
        if let Some(&found) = known.get(name) {
            return found;
        }

        let found = self.extensions.iter().any(|source| source.has_type(name))
            || self.standalone.contains_key(name);
        known.insert(name.to_string(), found);
        found
    }

    /// Resolve `name` to its resolved type, caching on first call
    ///
    /// Repeat calls return the identical `Arc`. Unknown identifiers fail
    /// with [`SearchError::InvalidArgument`]; a looping parent chain fails
    /// with [`SearchError::TypeCycle`] and stays failed.
    pub fn get_type(&self, name: &str) -> Result<Arc<ResolvedFieldType>> {
        let mut cache = self.resolved.lock();
        let mut chain = Vec::new();
        self.resolve(&mut cache, name, &mut chain)
    }

    fn resolve(
        &self,
        cache: &mut HashMap<String, TypeSlot>,
        name: &str,
        chain: &mut Vec<String>,
    ) -> Result<Arc<ResolvedFieldType>> {
        match cache.get(name) {
            Some(TypeSlot::Resolved(resolved)) => {
                debug!(type_name = name, "field type cache hit");
                return Ok(Arc::clone(resolved));
            }
            Some(TypeSlot::Failed(error)) => return Err(error.clone()),
            Some(TypeSlot::Resolving) => {
                let mut cycle = chain.join(" -> ");
                cycle.push_str(" -> ");
                cycle.push_str(name);
                warn!(chain = %cycle, "field type parent chain cycle");
                return Err(SearchError::TypeCycle { chain: cycle });
            }
            None => {}
        }

        if !self.has_type(name) {
            return Err(SearchError::InvalidArgument(format!(
                "could not load field type \"{}\"",
                name
            )));
        }

        debug!(type_name = name, "resolving field type");
        cache.insert(name.to_string(), TypeSlot::Resolving);
        chain.push(name.to_string());
        let result = self.resolve_parts(cache, name, chain);
        chain.pop();

        match result {
            Ok(resolved) => {
                cache.insert(
                    name.to_string(),
                    TypeSlot::Resolved(Arc::clone(&resolved)),
                );
                Ok(resolved)
            }
            Err(error) => {
                cache.insert(name.to_string(), TypeSlot::Failed(error.clone()));
                Err(error)
            }
        }
    }

    fn resolve_parts(
        &self,
        cache: &mut HashMap<String, TypeSlot>,
        name: &str,
        chain: &mut Vec<String>,
    ) -> Result<Arc<ResolvedFieldType>> {
        // First source wins on duplicate identifiers; standalone factories
        // only fill gaps the sources left.
        let inner = self
            .extensions
            .iter()
            .find_map(|source| source.field_type(name))
            .or_else(|| self.standalone.get(name).map(|factory| (**factory)()))
            .ok_or_else(|| {
                SearchError::InvalidArgument(format!("could not load field type \"{}\"", name))
            })?;

        let mut type_extensions = Vec::new();
        for source in &self.extensions {
            type_extensions.extend(source.type_extensions(name));
        }

        let parent_name = inner.parent_type().map(str::to_string);
        let parent = match parent_name {
            Some(parent_name) => Some(self.resolve(cache, &parent_name, chain)?),
            None => None,
        };

        Ok(self
            .factory
            .create_resolved_type(inner, type_extensions, parent))
    }
}
