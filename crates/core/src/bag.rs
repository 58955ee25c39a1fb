//! ValuesBag: per-field container for value expressions and errors
//!
//! A `ValuesBag` holds every value expression of a single field inside a
//! condition group, plus the soft validation errors accumulated against
//! them. It is mutable while the condition is being assembled and becomes
//! read-only once [`ValuesBag::set_data_locked`] is called.

use crate::error::{Result, SearchError};
use crate::value::{Compare, PatternMatch, Range, SingleValue, ValuesError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-field container holding all value expressions of every supported kind
///
/// ## Invariants
///
/// - `len()` always equals the sum of the current lengths of the six value
///   sequences; the counter is maintained incrementally, never recomputed.
/// - Once locked, every mutating operation fails with
///   [`SearchError::LockedState`]. Error *removal* is the one deliberate
///   exemption, so callers can clear stale errors and re-validate a
///   condition that is already locked.
/// - Locking is one-way; a second `set_data_locked` call fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuesBag {
    single_values: Vec<SingleValue>,
    excluded_values: Vec<SingleValue>,
    ranges: Vec<Range>,
    excluded_ranges: Vec<Range>,
    comparisons: Vec<Compare>,
    pattern_matchers: Vec<PatternMatch>,
    errors: BTreeMap<String, ValuesError>,
    value_count: usize,
    locked: bool,
}

impl ValuesBag {
    /// Create an empty, unlocked bag
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.locked {
            return Err(SearchError::LockedState { what: "ValuesBag" });
        }
        Ok(())
    }

    // ========================================================================
    // Single values
    // ========================================================================

    /// The single (equality) values, in insertion order
    pub fn single_values(&self) -> &[SingleValue] {
        &self.single_values
    }

    /// Whether any single value is present
    pub fn has_single_values(&self) -> bool {
        !self.single_values.is_empty()
    }

    /// Append a single value
    pub fn add_single_value(&mut self, value: SingleValue) -> Result<()> {
        self.ensure_unlocked()?;
        self.single_values.push(value);
        self.value_count += 1;
        Ok(())
    }

    /// Remove the single value at `index`; no-op when the index is absent
    pub fn remove_single_value(&mut self, index: usize) -> Result<()> {
        self.ensure_unlocked()?;
        if index < self.single_values.len() {
            self.single_values.remove(index);
            self.value_count -= 1;
        }
        Ok(())
    }

    // ========================================================================
    // Excluded values
    // ========================================================================

    /// The excluded (inequality) values, in insertion order
    pub fn excluded_values(&self) -> &[SingleValue] {
        &self.excluded_values
    }

    /// Whether any excluded value is present
    pub fn has_excluded_values(&self) -> bool {
        !self.excluded_values.is_empty()
    }

    /// Append an excluded value
    pub fn add_excluded_value(&mut self, value: SingleValue) -> Result<()> {
        self.ensure_unlocked()?;
        self.excluded_values.push(value);
        self.value_count += 1;
        Ok(())
    }

    /// Remove the excluded value at `index`; no-op when the index is absent
    pub fn remove_excluded_value(&mut self, index: usize) -> Result<()> {
        self.ensure_unlocked()?;
        if index < self.excluded_values.len() {
            self.excluded_values.remove(index);
            self.value_count -= 1;
        }
        Ok(())
    }

    // ========================================================================
    // Ranges
    // ========================================================================

    /// The range values, in insertion order
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Whether any range is present
    pub fn has_ranges(&self) -> bool {
        !self.ranges.is_empty()
    }

    /// Append a range
    pub fn add_range(&mut self, range: Range) -> Result<()> {
        self.ensure_unlocked()?;
        self.ranges.push(range);
        self.value_count += 1;
        Ok(())
    }

    /// Remove the range at `index`; no-op when the index is absent
    pub fn remove_range(&mut self, index: usize) -> Result<()> {
        self.ensure_unlocked()?;
        if index < self.ranges.len() {
            self.ranges.remove(index);
            self.value_count -= 1;
        }
        Ok(())
    }

    // ========================================================================
    // Excluded ranges
    // ========================================================================

    /// The excluded ranges, in insertion order
    pub fn excluded_ranges(&self) -> &[Range] {
        &self.excluded_ranges
    }

    /// Whether any excluded range is present
    pub fn has_excluded_ranges(&self) -> bool {
        !self.excluded_ranges.is_empty()
    }

    /// Append an excluded range
    pub fn add_excluded_range(&mut self, range: Range) -> Result<()> {
        self.ensure_unlocked()?;
        self.excluded_ranges.push(range);
        self.value_count += 1;
        Ok(())
    }

    /// Remove the excluded range at `index`; no-op when the index is absent
    pub fn remove_excluded_range(&mut self, index: usize) -> Result<()> {
        self.ensure_unlocked()?;
        if index < self.excluded_ranges.len() {
            self.excluded_ranges.remove(index);
            self.value_count -= 1;
        }
        Ok(())
    }

    // ========================================================================
    // Comparisons
    // ========================================================================

    /// The comparison values, in insertion order
    pub fn comparisons(&self) -> &[Compare] {
        &self.comparisons
    }

    /// Whether any comparison is present
    pub fn has_comparisons(&self) -> bool {
        !self.comparisons.is_empty()
    }

    /// Append a comparison
    pub fn add_comparison(&mut self, comparison: Compare) -> Result<()> {
        self.ensure_unlocked()?;
        self.comparisons.push(comparison);
        self.value_count += 1;
        Ok(())
    }

    /// Remove the comparison at `index`; no-op when the index is absent
    pub fn remove_comparison(&mut self, index: usize) -> Result<()> {
        self.ensure_unlocked()?;
        if index < self.comparisons.len() {
            self.comparisons.remove(index);
            self.value_count -= 1;
        }
        Ok(())
    }

    // ========================================================================
    // Pattern matchers
    // ========================================================================

    /// The pattern-match values, in insertion order
    pub fn pattern_matchers(&self) -> &[PatternMatch] {
        &self.pattern_matchers
    }

    /// Whether any pattern matcher is present
    pub fn has_pattern_matchers(&self) -> bool {
        !self.pattern_matchers.is_empty()
    }

    /// Append a pattern matcher
    pub fn add_pattern_match(&mut self, pattern: PatternMatch) -> Result<()> {
        self.ensure_unlocked()?;
        self.pattern_matchers.push(pattern);
        self.value_count += 1;
        Ok(())
    }

    /// Remove the pattern matcher at `index`; no-op when the index is absent
    pub fn remove_pattern_match(&mut self, index: usize) -> Result<()> {
        self.ensure_unlocked()?;
        if index < self.pattern_matchers.len() {
            self.pattern_matchers.remove(index);
            self.value_count -= 1;
        }
        Ok(())
    }

    // ========================================================================
    // Errors
    // ========================================================================

    /// The accumulated errors, ordered by content hash
    pub fn errors(&self) -> impl Iterator<Item = &ValuesError> {
        self.errors.values()
    }

    /// Whether any error is present
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether this exact error (by content hash) is present
    pub fn has_error(&self, error: &ValuesError) -> bool {
        self.errors.contains_key(&error.hash())
    }

    /// Record an error, keyed by its content hash
    ///
    /// Adding the same semantic error twice collapses to one entry
    /// (last write wins).
    pub fn add_error(&mut self, error: ValuesError) -> Result<()> {
        self.ensure_unlocked()?;
        self.errors.insert(error.hash(), error);
        Ok(())
    }

    /// Remove an error by its content hash
    ///
    /// Deliberately exempt from the lock check: errors may be cleared from
    /// a locked bag so a finished condition can be re-validated without
    /// rebuilding it. Do not "fix" this asymmetry.
    pub fn remove_error(&mut self, error: &ValuesError) {
        self.errors.remove(&error.hash());
    }

    // ========================================================================
    // Counting and locking
    // ========================================================================

    /// Total number of values across all six kinds (O(1))
    pub fn len(&self) -> usize {
        self.value_count
    }

    /// Whether the bag holds no values (errors do not count)
    pub fn is_empty(&self) -> bool {
        self.value_count == 0
    }

    /// Lock the bag; mutating operations fail from here on
    ///
    /// The transition is one-way: calling this on an already locked bag
    /// fails with [`SearchError::LockedState`].
    pub fn set_data_locked(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        self.locked = true;
        Ok(())
    }

    /// Whether the bag's data is locked
    pub fn is_data_locked(&self) -> bool {
        self.locked
    }
}
