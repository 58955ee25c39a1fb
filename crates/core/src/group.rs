//! ValuesGroup: logical grouping node of the condition tree
//!
//! A condition is a tree of groups. Each group combines its per-field
//! `ValuesBag`s and its subgroups with one logical operator (AND/OR).
//! Locking a group cascades through the whole subtree.

use crate::bag::ValuesBag;
use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Logical operator combining the members of a [`ValuesGroup`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroupLogical {
    /// All members must match (default)
    #[default]
    And,
    /// Any member may match
    Or,
}

/// A node of the condition tree: per-field bags plus nested groups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuesGroup {
    logical: GroupLogical,
    fields: BTreeMap<String, ValuesBag>,
    groups: Vec<ValuesGroup>,
    locked: bool,
}

impl ValuesGroup {
    /// Create an empty AND group
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty group with an explicit logical operator
    pub fn with_logical(logical: GroupLogical) -> Self {
        ValuesGroup {
            logical,
            ..Default::default()
        }
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.locked {
            return Err(SearchError::LockedState { what: "ValuesGroup" });
        }
        Ok(())
    }

    /// The group's logical operator
    pub fn logical(&self) -> GroupLogical {
        self.logical
    }

    // ========================================================================
    // Fields
    // ========================================================================

    /// Attach a field's bag to this group, replacing any previous bag
    pub fn add_field(&mut self, name: impl Into<String>, bag: ValuesBag) -> Result<()> {
        self.ensure_unlocked()?;
        self.fields.insert(name.into(), bag);
        Ok(())
    }

    /// Detach a field's bag; no-op when the field is absent
    pub fn remove_field(&mut self, name: &str) -> Result<()> {
        self.ensure_unlocked()?;
        self.fields.remove(name);
        Ok(())
    }

    /// The bag of a field, if present
    pub fn field(&self, name: &str) -> Option<&ValuesBag> {
        self.fields.get(name)
    }

    /// Mutable access to a field's bag (the bag enforces its own lock)
    pub fn field_mut(&mut self, name: &str) -> Option<&mut ValuesBag> {
        self.fields.get_mut(name)
    }

    /// Whether a bag is attached for this field
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// All attached fields, ordered by name
    pub fn fields(&self) -> &BTreeMap<String, ValuesBag> {
        &self.fields
    }

    // ========================================================================
    // Subgroups
    // ========================================================================

    /// Append a nested group
    pub fn add_group(&mut self, group: ValuesGroup) -> Result<()> {
        self.ensure_unlocked()?;
        self.groups.push(group);
        Ok(())
    }

    /// Remove the nested group at `index`; no-op when the index is absent
    pub fn remove_group(&mut self, index: usize) -> Result<()> {
        self.ensure_unlocked()?;
        if index < self.groups.len() {
            self.groups.remove(index);
        }
        Ok(())
    }

    /// The nested groups, in insertion order
    pub fn groups(&self) -> &[ValuesGroup] {
        &self.groups
    }

    /// Whether any nested group is present
    pub fn has_groups(&self) -> bool {
        !self.groups.is_empty()
    }

    // ========================================================================
    // Aggregates and locking
    // ========================================================================

    /// Whether any attached bag carries errors; `deep` descends into
    /// subgroups
    pub fn has_errors(&self, deep: bool) -> bool {
        if self.fields.values().any(|bag| bag.has_errors()) {
            return true;
        }
        deep && self.groups.iter().any(|group| group.has_errors(true))
    }

    /// Total number of values in this subtree
    pub fn count_values(&self) -> usize {
        let own: usize = self.fields.values().map(|bag| bag.len()).sum();
        let nested: usize = self.groups.iter().map(|group| group.count_values()).sum();
        own + nested
    }

    /// Lock this group, every attached bag, and every subgroup
    ///
    /// Bags and subgroups that are already locked are left as-is; the
    /// group itself follows the usual one-way rule and fails when locked
    /// twice.
    pub fn set_data_locked(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        for bag in self.fields.values_mut() {
            if !bag.is_data_locked() {
                bag.set_data_locked()?;
            }
        }
        for group in &mut self.groups {
            if !group.is_data_locked() {
                group.set_data_locked()?;
            }
        }
        self.locked = true;
        Ok(())
    }

    /// Whether the group's data is locked
    pub fn is_data_locked(&self) -> bool {
        self.locked
    }
}
