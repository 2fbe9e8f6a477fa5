//! Selection set: the row positions the user has marked.
//!
//! Positions index into the *current* filtered view. The integers are the
//! only durable state; callers must re-resolve `view[position]` at the
//! moment of use rather than caching rows.

use std::collections::BTreeSet;

#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    positions: BTreeSet<usize>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one position in or out of the set; returns whether it is now
    /// selected.
    pub fn toggle(&mut self, position: usize) -> bool {
        if self.positions.remove(&position) {
            false
        } else {
            self.positions.insert(position);
            true
        }
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    pub fn contains(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }

    /// Selected positions in ascending order.
    pub fn members(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut sel = SelectionSet::new();
        assert!(sel.toggle(3));
        assert!(sel.contains(3));
        assert!(!sel.toggle(3));
        assert!(!sel.contains(3));
        assert!(sel.is_empty());
    }

    #[test]
    fn members_are_ordered() {
        let mut sel = SelectionSet::new();
        sel.toggle(5);
        sel.toggle(1);
        sel.toggle(3);
        assert_eq!(sel.members().collect::<Vec<_>>(), vec![1, 3, 5]);
        assert_eq!(sel.len(), 3);
    }

    #[test]
    fn clear_empties_the_set() {
        let mut sel = SelectionSet::new();
        sel.toggle(0);
        sel.toggle(2);
        sel.clear();
        assert!(sel.is_empty());
        assert_eq!(sel.members().count(), 0);
    }
}
