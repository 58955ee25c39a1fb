//! Finished search conditions
//!
//! A `SearchCondition` wraps the root `ValuesGroup` of a fully assembled
//! condition tree; constructing one is the point where assembly ends and
//! the tree becomes read-only. `SearchPreCondition` wraps a group that a
//! query generator must always conjoin with whatever condition it
//! evaluates, even an empty one.

use crate::error::Result;
use crate::group::ValuesGroup;
use serde::{Deserialize, Serialize};

/// A completed, locked search condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCondition {
    values_group: ValuesGroup,
}

impl SearchCondition {
    /// Wrap a root group, locking the whole tree if it is not locked yet
    pub fn new(mut root: ValuesGroup) -> Result<Self> {
        if !root.is_data_locked() {
            root.set_data_locked()?;
        }
        Ok(SearchCondition { values_group: root })
    }

    /// The root group of the condition tree
    pub fn values_group(&self) -> &ValuesGroup {
        &self.values_group
    }

    /// Whether the condition holds no values at all
    pub fn is_empty(&self) -> bool {
        self.values_group.count_values() == 0
    }
}

/// A condition that must hold at all times
///
/// Applied as `(pre-condition) AND (condition)`. Consumers must apply the
/// pre-condition even when the search condition itself is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPreCondition {
    values_group: ValuesGroup,
}

impl SearchPreCondition {
    /// Wrap the always-conjoined group
    pub fn new(values_group: ValuesGroup) -> Self {
        SearchPreCondition { values_group }
    }

    /// The wrapped group
    pub fn values_group(&self) -> &ValuesGroup {
        &self.values_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bag::ValuesBag;
    use crate::value::SingleValue;

    #[test]
    fn test_condition_locks_tree_on_construction() {
        let mut bag = ValuesBag::new();
        bag.add_single_value(SingleValue::new(1)).unwrap();
        let mut root = ValuesGroup::new();
        root.add_field("id", bag).unwrap();

        let condition = SearchCondition::new(root).unwrap();
        assert!(condition.values_group().is_data_locked());
        assert!(condition
            .values_group()
            .field("id")
            .unwrap()
            .is_data_locked());
        assert!(!condition.is_empty());
    }

    #[test]
    fn test_condition_accepts_pre_locked_tree() {
        let mut root = ValuesGroup::new();
        root.set_data_locked().unwrap();

        let condition = SearchCondition::new(root).unwrap();
        assert!(condition.is_empty());
    }

    #[test]
    fn test_pre_condition_exposes_group_only() {
        let mut root = ValuesGroup::new();
        root.add_field("tenant", ValuesBag::new()).unwrap();

        let pre = SearchPreCondition::new(root);
        assert!(pre.values_group().has_field("tenant"));
    }

    #[test]
    fn test_condition_serialization_roundtrip() {
        let mut bag = ValuesBag::new();
        bag.add_single_value(SingleValue::new(42)).unwrap();
        let mut root = ValuesGroup::new();
        root.add_field("id", bag).unwrap();

        let condition = SearchCondition::new(root).unwrap();
        let json = serde_json::to_string(&condition).unwrap();
        let restored: SearchCondition = serde_json::from_str(&json).unwrap();
        assert_eq!(condition, restored);
    }
}
