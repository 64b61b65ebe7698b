//! Owned-object storage.
//!
//! The cell store is the arena behind every owned slot. Cells are
//! appended at the end or reconstructed in place when the vault's reuse
//! policy picks an existing cell; they are destroyed only by
//! [`clear`](CellStore::clear). Each construction takes a fresh stamp
//! from a counter that is never rewound, so a claim minted against an
//! old construction can always be told apart from the cell's current
//! occupant, including across a clear.

use crate::error::VaultError;

/// Growth floor for the first allocation, in cells.
pub(crate) const CELL_GROWTH_FLOOR: usize = 16;

/// One owned cell: a live object plus the stamp of its construction.
#[derive(Debug)]
struct Cell<T> {
    /// The stored object.
    value: T,
    /// Stamp taken when this occupant was constructed.
    stamp: u64,
}

/// Growable arena of owned cells.
#[derive(Debug)]
pub(crate) struct CellStore<T> {
    /// Constructed cells, in append order. Never shrinks except in
    /// [`clear`](Self::clear), so cell indices held by slots stay valid.
    cells: Vec<Cell<T>>,
    /// Next construction stamp. Monotonic for the store's lifetime.
    next_stamp: u64,
}

impl<T> CellStore<T> {
    /// Creates an empty store. No allocation until the first append or
    /// an explicit [`reserve`](Self::reserve).
    pub(crate) fn new() -> Self {
        Self {
            cells: Vec::new(),
            next_stamp: 0,
        }
    }

    /// Number of constructed cells.
    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    /// Cells the current allocation can hold without growing.
    pub(crate) fn capacity(&self) -> usize {
        self.cells.capacity()
    }

    /// Grows the backing allocation to hold at least `total` cells.
    ///
    /// A no-op when the current capacity already suffices. On failure
    /// the store is unchanged.
    pub(crate) fn reserve(&mut self, total: usize) -> Result<(), VaultError> {
        if total <= self.cells.capacity() {
            return Ok(());
        }
        self.cells
            .try_reserve_exact(total - self.cells.len())
            .map_err(|_| VaultError::AllocationFailed { requested: total })
    }

    /// Constructs `value` in a fresh cell at the end of the store and
    /// returns its index.
    ///
    /// When full, the allocation doubles, from a floor of
    /// [`CELL_GROWTH_FLOOR`]. Failure to grow leaves the store unchanged
    /// and `value` is dropped with the error in flight.
    pub(crate) fn append(&mut self, value: T) -> Result<usize, VaultError> {
        if self.cells.len() == self.cells.capacity() {
            let target = grown(self.cells.capacity(), CELL_GROWTH_FLOOR);
            self.reserve(target)?;
        }
        let stamp = self.take_stamp();
        let index = self.cells.len();
        self.cells.push(Cell { value, stamp });
        Ok(index)
    }

    /// Replaces the occupant of `index` with `value` under a fresh stamp.
    ///
    /// The previous occupant is dropped. Claims minted against it become
    /// stale.
    pub(crate) fn reconstruct(&mut self, index: usize, value: T) {
        let stamp = self.take_stamp();
        self.cells[index] = Cell { value, stamp };
    }

    /// Current occupant of `index`.
    pub(crate) fn value(&self, index: usize) -> &T {
        &self.cells[index].value
    }

    /// Mutable access to the occupant of `index`. Mutation is not
    /// reconstruction; the stamp is untouched.
    pub(crate) fn value_mut(&mut self, index: usize) -> &mut T {
        &mut self.cells[index].value
    }

    /// Stamp of the current occupant of `index`.
    pub(crate) fn stamp(&self, index: usize) -> u64 {
        self.cells[index].stamp
    }

    /// Whether `stamp` still names the current occupant of `cell`.
    pub(crate) fn is_current(&self, cell: usize, stamp: u64) -> bool {
        self.cells.get(cell).is_some_and(|c| c.stamp == stamp)
    }

    /// Drops every cell. Capacity and the stamp counter are retained, so
    /// claims minted before the clear can never match a later occupant.
    pub(crate) fn clear(&mut self) {
        self.cells.clear();
    }

    /// Bytes held by the backing allocation.
    pub(crate) fn memory_bytes(&self) -> usize {
        self.cells.capacity() * std::mem::size_of::<Cell<T>>()
    }

    fn take_stamp(&mut self) -> u64 {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        stamp
    }
}

/// Doubling policy shared by cell and slot storage: an empty allocation
/// grows to `floor`, a non-empty one doubles.
pub(crate) fn grown(capacity: usize, floor: usize) -> usize {
    if capacity == 0 {
        floor
    } else {
        capacity * 2
    }
}
