//! Test fixtures for vault development.
//!
//! Provides the payload types shared by unit tests, integration
//! scenarios, and benches: a realistic two-field [`Artifact`] and a
//! drop-counting [`Counted`] payload for destruction-order assertions.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::Cell;
use std::rc::Rc;

/// Small realistic payload: an id plus an owned label.
///
/// Owning a `String` matters for the tests that assert nothing is
/// dropped by pops and restores; a `Copy` payload would hide a
/// double-drop or a missed drop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub id: u32,
    pub label: String,
}

impl Artifact {
    pub fn new(id: u32, label: &str) -> Self {
        Self {
            id,
            label: label.to_owned(),
        }
    }
}

impl Default for Artifact {
    fn default() -> Self {
        Self::new(0, "")
    }
}

/// Shared drop tally for [`Counted`] payloads.
///
/// Create one per test, mint payloads from it, and assert on
/// [`count`](DropCounter::count) after the operations under test.
#[derive(Clone, Debug, Default)]
pub struct DropCounter {
    drops: Rc<Cell<usize>>,
}

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of [`Counted`] payloads dropped so far.
    pub fn count(&self) -> usize {
        self.drops.get()
    }

    /// Mints a payload whose drop increments this tally.
    pub fn payload(&self, id: u32) -> Counted {
        Counted {
            id,
            drops: Rc::clone(&self.drops),
        }
    }
}

/// Payload that reports its drop to the [`DropCounter`] it came from.
#[derive(Clone, Debug)]
pub struct Counted {
    pub id: u32,
    drops: Rc<Cell<usize>>,
}

impl Drop for Counted {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}
