//! Iteration over the logical stack.
//!
//! Iteration order is stack order, bottom to top. Each step resolves one
//! slot through its indirection, owned slots against the cell store and
//! external slots through their shared handle, so objects are touched
//! lazily as they are yielded.

use std::iter::FusedIterator;
use std::slice;

use crate::slot::Slot;
use crate::store::CellStore;
use crate::vault::Vault;

/// Borrowing iterator over a vault's logical stack.
///
/// Created by [`Vault::iter`]. Yields shared references in stack order.
#[derive(Debug)]
pub struct SlotIter<'a, T> {
    store: &'a CellStore<T>,
    slots: slice::Iter<'a, Slot<T>>,
}

impl<'a, T> SlotIter<'a, T> {
    pub(crate) fn new(store: &'a CellStore<T>, slots: &'a [Slot<T>]) -> Self {
        Self {
            store,
            slots: slots.iter(),
        }
    }
}

fn resolve<'a, T>(store: &'a CellStore<T>, slot: &'a Slot<T>) -> &'a T {
    match slot {
        Slot::Owned(cell) => store.value(*cell),
        Slot::External(handle) => handle.as_ref(),
    }
}

impl<'a, T> Iterator for SlotIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.next().map(|slot| resolve(self.store, slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl<T> DoubleEndedIterator for SlotIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.slots.next_back().map(|slot| resolve(self.store, slot))
    }
}

impl<T> ExactSizeIterator for SlotIter<'_, T> {
    fn len(&self) -> usize {
        self.slots.len()
    }
}

impl<T> FusedIterator for SlotIter<'_, T> {}

// Not derived: a derived impl would demand `T: Clone`, and cloning the
// iterator clones only borrows.
impl<T> Clone for SlotIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            slots: self.slots.clone(),
        }
    }
}

impl<'a, T, const MAX_CHECKPOINTS: usize> IntoIterator for &'a Vault<T, MAX_CHECKPOINTS> {
    type Item = &'a T;
    type IntoIter = SlotIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::Vault;

    #[test]
    fn yields_in_stack_order() {
        let mut vault: Vault<u32> = Vault::new();
        for value in [10, 20, 30] {
            vault.emplace(value).unwrap();
        }
        let seen: Vec<u32> = vault.iter().copied().collect();
        assert_eq!(seen, vec![10, 20, 30]);
    }

    #[test]
    fn mixes_owned_and_external_slots() {
        let mut vault: Vault<&str> = Vault::new();
        vault.emplace("owned").unwrap();
        vault.checkin("external").unwrap();
        let seen: Vec<&str> = vault.iter().copied().collect();
        assert_eq!(seen, vec!["owned", "external"]);
    }

    #[test]
    fn double_ended_and_exact_size() {
        let mut vault: Vault<u32> = Vault::new();
        for value in 0..5 {
            vault.emplace(value).unwrap();
        }
        let mut iter = vault.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.len(), 3);
    }

    #[test]
    fn for_loop_borrows_the_vault() {
        let mut vault: Vault<u32> = Vault::new();
        vault.emplace(1).unwrap();
        vault.emplace(2).unwrap();
        let mut total = 0;
        for value in &vault {
            total += value;
        }
        assert_eq!(total, 3);
    }
}
