//! Search fields
//!
//! A `SearchField` is the per-field runtime object: the resolved type, the
//! final options, the declared value-kind support, and the optional
//! comparator/transformer seams. It is configured after creation and then
//! locked; from that point only reads and [`SearchField::create_view`] are
//! permitted.

use crate::field_type::OptionsMap;
use crate::resolved::ResolvedFieldType;
use fieldsearch_core::{Result, Scalar, SearchError};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The optional value kinds a field can declare support for
///
/// Single and excluded values are always legal; support for the three
/// kinds below is off until a type or caller enables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueTypeKind {
    /// Ranges and excluded ranges
    Range,
    /// Single-operator comparisons
    Comparison,
    /// Text pattern matchers
    PatternMatch,
}

impl ValueTypeKind {
    /// All kinds, in declaration order
    pub const ALL: [ValueTypeKind; 3] = [
        ValueTypeKind::Range,
        ValueTypeKind::Comparison,
        ValueTypeKind::PatternMatch,
    ];

    /// The kind's canonical token
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueTypeKind::Range => "range",
            ValueTypeKind::Comparison => "comparison",
            ValueTypeKind::PatternMatch => "pattern-match",
        }
    }
}

impl fmt::Display for ValueTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueTypeKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "range" => Ok(ValueTypeKind::Range),
            "comparison" => Ok(ValueTypeKind::Comparison),
            "pattern-match" => Ok(ValueTypeKind::PatternMatch),
            _ => Err(SearchError::UnknownValueType {
                kind: s.to_string(),
            }),
        }
    }
}

/// Value ordering/equality strategy for a field
///
/// Used by validators and optimizers to compare two values of the field's
/// domain under the field's options (e.g. case folding for text).
pub trait ValueComparator: Send + Sync {
    /// Whether the two values are equal
    fn is_equal(&self, left: &Scalar, right: &Scalar, options: &OptionsMap) -> bool;

    /// Whether `left` sorts strictly below `right`
    fn is_lower(&self, left: &Scalar, right: &Scalar, options: &OptionsMap) -> bool;

    /// Whether `left` sorts strictly above `right`
    fn is_higher(&self, left: &Scalar, right: &Scalar, options: &OptionsMap) -> bool;
}

/// Adapter between a representation of a value and the field's domain
///
/// Implementations fail with [`SearchError::Transformation`]; the input
/// layer converts that into a `ValuesError` on the relevant bag rather
/// than aborting condition assembly.
pub trait DataTransformer: Send + Sync {
    /// Domain value to representation
    fn transform(&self, value: &Scalar) -> Result<Scalar>;

    /// Representation to domain value
    fn reverse_transform(&self, value: &Scalar) -> Result<Scalar>;
}

/// Type-erased view of a locked field
///
/// The shape of `vars` is entirely determined by the view-hook chain of
/// the field's resolved type; only the hook order is guaranteed.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFieldView {
    /// The owning field's name
    pub name: String,
    /// View variables populated by the hook chain
    pub vars: OptionsMap,
}

impl SearchFieldView {
    fn new(name: String) -> Self {
        SearchFieldView {
            name,
            vars: OptionsMap::new(),
        }
    }
}

/// A named, typed slot in a search schema
pub struct SearchField {
    name: String,
    resolved_type: Arc<ResolvedFieldType>,
    options: OptionsMap,
    supported: HashMap<ValueTypeKind, bool>,
    value_comparator: Option<Arc<dyn ValueComparator>>,
    view_transformer: Option<Arc<dyn DataTransformer>>,
    norm_transformer: Option<Arc<dyn DataTransformer>>,
    locked: bool,
}

impl fmt::Debug for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchField")
            .field("name", &self.name)
            .field("type", &self.resolved_type.block_prefix())
            .field("options", &self.options)
            .field("locked", &self.locked)
            .finish()
    }
}

impl SearchField {
    /// Create a field with its resolved type and final options
    ///
    /// The name must start with a letter and contain only letters, digits,
    /// underscores, and hyphens; anything else fails with
    /// [`SearchError::InvalidArgument`].
    pub fn new(
        name: impl Into<String>,
        resolved_type: Arc<ResolvedFieldType>,
        options: OptionsMap,
    ) -> Result<Self> {
        let name = name.into();
        Self::validate_name(&name)?;

        let supported = ValueTypeKind::ALL
            .into_iter()
            .map(|kind| (kind, false))
            .collect();

        Ok(SearchField {
            name,
            resolved_type,
            options,
            supported,
            value_comparator: None,
            view_transformer: None,
            norm_transformer: None,
            locked: false,
        })
    }

    fn validate_name(name: &str) -> Result<()> {
        let mut chars = name.chars();
        let valid = match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            }
            _ => false,
        };

        if valid {
            Ok(())
        } else {
            Err(SearchError::InvalidArgument(format!(
                "field name \"{}\" contains illegal characters; a name must start with \
                 a letter and only contain letters, digits, underscores and hyphens",
                name
            )))
        }
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.locked {
            return Err(SearchError::LockedState {
                what: "SearchField",
            });
        }
        Ok(())
    }

    /// The field's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field's resolved type (shared with the registry cache)
    pub fn resolved_type(&self) -> &Arc<ResolvedFieldType> {
        &self.resolved_type
    }

    /// The field's final options
    pub fn options(&self) -> &OptionsMap {
        &self.options
    }

    /// Whether an option is set
    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// An option's value, if set
    pub fn option(&self, name: &str) -> Option<&Scalar> {
        self.options.get(name)
    }

    /// Whether the field declared support for a value kind
    pub fn supports_value_type(&self, kind: ValueTypeKind) -> bool {
        self.supported.get(&kind).copied().unwrap_or(false)
    }

    /// Declare or retract support for a value kind
    pub fn set_value_type_support(&mut self, kind: ValueTypeKind, enabled: bool) -> Result<()> {
        self.ensure_unlocked()?;
        self.supported.insert(kind, enabled);
        Ok(())
    }

    /// The field's value comparator, if configured
    pub fn value_comparator(&self) -> Option<&Arc<dyn ValueComparator>> {
        self.value_comparator.as_ref()
    }

    /// Configure the value comparator
    pub fn set_value_comparator(&mut self, comparator: Arc<dyn ValueComparator>) -> Result<()> {
        self.ensure_unlocked()?;
        self.value_comparator = Some(comparator);
        Ok(())
    }

    /// The view transformer, if configured
    pub fn view_transformer(&self) -> Option<&Arc<dyn DataTransformer>> {
        self.view_transformer.as_ref()
    }

    /// Configure the view transformer
    pub fn set_view_transformer(
        &mut self,
        transformer: Option<Arc<dyn DataTransformer>>,
    ) -> Result<()> {
        self.ensure_unlocked()?;
        self.view_transformer = transformer;
        Ok(())
    }

    /// The norm transformer, if configured
    pub fn norm_transformer(&self) -> Option<&Arc<dyn DataTransformer>> {
        self.norm_transformer.as_ref()
    }

    /// Configure the norm transformer
    pub fn set_norm_transformer(
        &mut self,
        transformer: Option<Arc<dyn DataTransformer>>,
    ) -> Result<()> {
        self.ensure_unlocked()?;
        self.norm_transformer = transformer;
        Ok(())
    }

    /// Lock the field's configuration; setters fail from here on
    ///
    /// One-way transition: locking an already locked field fails.
    pub fn set_data_locked(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        self.locked = true;
        Ok(())
    }

    /// Whether the field's configuration is locked
    pub fn is_data_locked(&self) -> bool {
        self.locked
    }

    /// Build the field's view through the resolved type's hook chain
    ///
    /// Inverted precondition: view creation requires the lock, while every
    /// setter requires its absence.
    pub fn create_view(&self) -> Result<SearchFieldView> {
        if !self.locked {
            return Err(SearchError::ConfigNotLocked);
        }

        let mut view = SearchFieldView::new(self.name.clone());
        self.resolved_type.build_view(&mut view, self);
        Ok(view)
    }
}
