//! Initial-condition list management
//!
//! An ordered, bounded list of initial-condition text values. The list is
//! the single owner of the condition count; the page renders whatever this
//! module reports, rather than keeping its own counter in the DOM.
//!
//! Invariant: the list always holds between one and three entries. Entries
//! are raw text; nothing here validates them mathematically.

use serde::{Deserialize, Serialize};

/// Maximum number of initial-condition fields
pub const MAX_CONDITIONS: usize = 3;

/// The ordered condition values (never empty, never more than three)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionList {
    entries: Vec<String>,
}

impl Default for ConditionList {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionList {
    /// Start with a single empty field
    pub fn new() -> Self {
        Self {
            entries: vec![String::new()],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn values(&self) -> &[String] {
        &self.entries
    }

    /// Append a new empty field. Returns false (and changes nothing) when
    /// the list is already at capacity.
    pub fn add_condition(&mut self) -> bool {
        if self.entries.len() >= MAX_CONDITIONS {
            return false;
        }
        self.entries.push(String::new());
        true
    }

    /// Remove the last field. Returns false (and changes nothing) when only
    /// one field remains. Removing from the tail means surviving fields
    /// never renumber.
    pub fn remove_condition(&mut self) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        self.entries.pop();
        true
    }

    /// Overwrite the value at `index`. Returns false when out of bounds.
    pub fn set_condition(&mut self, index: usize, value: &str) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                *entry = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Values ready for submission: trimmed, empties dropped, order kept
    pub fn collect(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect()
    }

    /// 1-based display labels, matching field position at render time
    pub fn labels(&self) -> Vec<String> {
        (1..=self.entries.len()).map(|n| n.to_string()).collect()
    }

    /// Whether the "add condition" control should be enabled
    pub fn can_add(&self) -> bool {
        self.entries.len() < MAX_CONDITIONS
    }

    /// Whether the "remove condition" control should be enabled
    pub fn can_remove(&self) -> bool {
        self.entries.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_one_empty_entry() {
        let list = ConditionList::new();
        assert_eq!(list.len(), 1);
        assert_eq!(list.values(), &[String::new()]);
        assert!(list.can_add());
        assert!(!list.can_remove());
    }

    #[test]
    fn test_add_up_to_capacity() {
        let mut list = ConditionList::new();
        assert!(list.add_condition());
        assert!(list.add_condition());
        assert_eq!(list.len(), 3);
        assert!(!list.can_add());

        // At capacity: no-op, reports false
        assert!(!list.add_condition());
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_remove_stops_at_one() {
        let mut list = ConditionList::new();
        list.add_condition();
        assert!(list.remove_condition());
        assert_eq!(list.len(), 1);

        // Never empty: no-op, reports false
        assert!(!list.remove_condition());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_takes_the_tail() {
        let mut list = ConditionList::new();
        list.set_condition(0, "y(0)=1");
        list.add_condition();
        list.set_condition(1, "y'(0)=2");
        list.remove_condition();
        assert_eq!(list.values(), &["y(0)=1".to_string()]);
    }

    #[test]
    fn test_set_condition_out_of_bounds() {
        let mut list = ConditionList::new();
        assert!(list.set_condition(0, "y(0)=1"));
        assert!(!list.set_condition(5, "y(1)=0"));
    }

    #[test]
    fn test_collect_trims_and_drops_blanks() {
        let mut list = ConditionList::new();
        list.set_condition(0, "  y(0)=1  ");
        list.add_condition();
        list.set_condition(1, "   ");
        list.add_condition();
        list.set_condition(2, "y'(0)=0");

        assert_eq!(
            list.collect(),
            vec!["y(0)=1".to_string(), "y'(0)=0".to_string()]
        );
    }

    #[test]
    fn test_labels_are_one_based() {
        let mut list = ConditionList::new();
        list.add_condition();
        list.add_condition();
        assert_eq!(
            list.labels(),
            vec!["1".to_string(), "2".to_string(), "3".to_string()]
        );
    }
}
