//! The vault container.
//!
//! Ties the owned cell store, the slot stack, and the checkpoint stack
//! together behind one public type. All depth bookkeeping lives here;
//! the submodules stay mechanism-only.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::rc::Rc;

use crate::checkpoint::CheckpointStack;
use crate::config::VaultConfig;
use crate::error::VaultError;
use crate::iter::SlotIter;
use crate::slot::{Slot, SlotKind, SlotTicket, TicketInner};
use crate::store::{grown, CellStore};

/// Growth floor for the first slot-storage allocation, in slots.
pub(crate) const SLOT_GROWTH_FLOOR: usize = 32;

/// Checkpoint nesting bound used when the const parameter is left at its
/// default.
pub const DEFAULT_MAX_CHECKPOINTS: usize = 64;

/// An arena-backed stack of owned and external objects with bounded
/// checkpoint/restore.
///
/// The vault stores the objects it constructs in a growable cell store
/// and keeps a logical stack of slots over them. A slot either names a
/// cell by index or holds a shared handle to an object supplied by the
/// caller through [`checkin`](Self::checkin). Removal operations
/// ([`pop`](Self::pop), [`checkout`](Self::checkout),
/// [`restore`](Self::restore)) only shrink the logical view; owned
/// objects stay constructed in their cells until [`clear`](Self::clear)
/// drops them, and popped cells are reclaimed by the next
/// [`emplace`](Self::emplace) before any new cell is appended.
///
/// Checkpoints save the logical depth, up to `MAX_CHECKPOINTS` deep
/// (default [`DEFAULT_MAX_CHECKPOINTS`]), and [`restore`](Self::restore)
/// rewinds to the most recent save without dropping anything.
///
/// External objects are held as [`Rc`] handles, which makes the vault
/// single-threaded (`!Send`, `!Sync`).
///
/// # Examples
///
/// ```
/// use vault::Vault;
///
/// let mut vault: Vault<u32> = Vault::new();
/// vault.emplace(1)?;
/// vault.checkpoint()?;
/// vault.emplace(2)?;
/// vault.emplace(3)?;
/// assert_eq!(vault.count(), 3);
///
/// vault.restore()?;
/// assert_eq!(vault.count(), 1);
/// assert_eq!(*vault.top()?, 1);
///
/// // The rolled-back objects were not dropped; their cells are reused
/// // by the next constructions.
/// assert_eq!(vault.owned_count(), 3);
/// vault.emplace(20)?;
/// assert_eq!(vault.owned_count(), 3);
/// # Ok::<(), vault::VaultError>(())
/// ```
pub struct Vault<T, const MAX_CHECKPOINTS: usize = DEFAULT_MAX_CHECKPOINTS> {
    /// Owned cells. Indices held by `slots` stay valid until the next
    /// clear, since cells are never removed individually.
    store: CellStore<T>,
    /// The logical stack. `slots.len()` is the logical depth.
    slots: Vec<Slot<T>>,
    /// Saved depths for restore, newest last.
    checkpoints: CheckpointStack<MAX_CHECKPOINTS>,
    /// One-way construction disable. Never reset, not even by clear.
    sealed: bool,
    /// Advisory flag. No operation in this crate consults it.
    locked: bool,
}

impl<T, const MAX_CHECKPOINTS: usize> Vault<T, MAX_CHECKPOINTS> {
    /// Creates an empty vault. Nothing is allocated until the first
    /// construction or an explicit reservation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: CellStore::new(),
            slots: Vec::new(),
            checkpoints: CheckpointStack::new(),
            sealed: false,
            locked: false,
        }
    }

    /// Creates a vault with owned storage reserved for `capacity` cells.
    ///
    /// Returns [`VaultError::AllocationFailed`] when the reservation
    /// cannot be satisfied.
    pub fn with_capacity(capacity: usize) -> Result<Self, VaultError> {
        let mut vault = Self::new();
        vault.store.reserve(capacity)?;
        Ok(vault)
    }

    /// Creates a vault with both stores reserved per `config`.
    ///
    /// Returns [`VaultError::AllocationFailed`] when either reservation
    /// cannot be satisfied.
    pub fn with_config(config: VaultConfig) -> Result<Self, VaultError> {
        let mut vault = Self::new();
        vault.store.reserve(config.initial_capacity)?;
        vault.grow_slots_to(config.initial_slot_capacity)?;
        Ok(vault)
    }

    /// Grows owned storage to hold at least `total` cells. A no-op when
    /// the capacity already suffices.
    ///
    /// Returns [`VaultError::Sealed`] on a sealed vault and
    /// [`VaultError::AllocationFailed`], with the vault unchanged, when
    /// storage cannot be obtained.
    pub fn reserve(&mut self, total: usize) -> Result<(), VaultError> {
        if self.sealed {
            return Err(VaultError::Sealed);
        }
        self.store.reserve(total)
    }

    /// Grows slot storage to hold at least `total` slots. A no-op when
    /// the capacity already suffices.
    ///
    /// Same error contract as [`reserve`](Self::reserve).
    pub fn reserve_slots(&mut self, total: usize) -> Result<(), VaultError> {
        if self.sealed {
            return Err(VaultError::Sealed);
        }
        self.grow_slots_to(total)
    }

    /// Constructs `value` in an owned cell and pushes a slot for it,
    /// returning the new logical index.
    ///
    /// Storage is reused before it is grown: when the logical depth is
    /// below the number of constructed cells, the cell just past the
    /// logical top (left behind by an earlier pop, checkout, or restore)
    /// has its occupant dropped and replaced in place, with no
    /// allocation and no new cell. Otherwise the value is appended,
    /// doubling the owned buffer first if it is full (floor 16).
    ///
    /// Returns [`VaultError::Sealed`] on a sealed vault and
    /// [`VaultError::AllocationFailed`] when growth fails, with the
    /// vault unchanged. `value` is consumed either way; callers that
    /// cannot afford to lose it on allocation failure should
    /// [`reserve`](Self::reserve) and
    /// [`reserve_slots`](Self::reserve_slots) first.
    pub fn emplace(&mut self, value: T) -> Result<usize, VaultError> {
        if self.sealed {
            return Err(VaultError::Sealed);
        }
        // Slot room first; a failed slot growth must leave the store
        // untouched.
        self.ensure_slot_room()?;
        let index = self.slots.len();
        if index < self.store.len() {
            self.store.reconstruct(index, value);
            self.slots.push(Slot::Owned(index));
        } else {
            let cell = self.store.append(value)?;
            self.slots.push(Slot::Owned(cell));
        }
        Ok(index)
    }

    /// Default-constructs an owned object and pushes a slot for it.
    /// Same reuse policy and error contract as [`emplace`](Self::emplace).
    pub fn acquire(&mut self) -> Result<usize, VaultError>
    where
        T: Default,
    {
        if self.sealed {
            return Err(VaultError::Sealed);
        }
        self.emplace(T::default())
    }

    /// Pushes a slot for an external object or re-deposits a checked-out
    /// ticket, returning the new logical index.
    ///
    /// Accepts a plain value (wrapped into a fresh shared handle), an
    /// existing [`Rc`] handle, or a [`SlotTicket`] from
    /// [`checkout`](Self::checkout). Checkin works on a sealed vault;
    /// sealing gates construction of owned objects, and an external
    /// object was constructed by the caller.
    ///
    /// Returns [`VaultError::StaleTicket`] when an owned ticket's cell
    /// has been reused or cleared since checkout, and
    /// [`VaultError::AllocationFailed`] when slot storage cannot grow.
    pub fn checkin<S>(&mut self, slot: S) -> Result<usize, VaultError>
    where
        S: Into<SlotTicket<T>>,
    {
        let slot = match slot.into().inner {
            TicketInner::Owned { cell, stamp } => {
                if !self.store.is_current(cell, stamp) {
                    return Err(VaultError::StaleTicket { cell });
                }
                Slot::Owned(cell)
            }
            TicketInner::External(handle) => Slot::External(handle),
        };
        self.ensure_slot_room()?;
        let index = self.slots.len();
        self.slots.push(slot);
        Ok(index)
    }

    /// Removes the top slot from the logical view.
    ///
    /// Nothing is dropped: an owned cell keeps its occupant (reachable
    /// by the reuse policy), and an external object survives through
    /// the caller's own handle. Returns [`VaultError::Underflow`] on an
    /// empty vault.
    pub fn pop(&mut self) -> Result<(), VaultError> {
        match self.slots.pop() {
            Some(_) => Ok(()),
            None => Err(VaultError::Underflow),
        }
    }

    /// Removes the slot at logical `index`, closing the gap, and returns
    /// a ticket for the object.
    ///
    /// An owned ticket stays redeemable through
    /// [`checkin`](Self::checkin) and readable through
    /// [`resolve`](Self::resolve) until the backing cell is reclaimed by
    /// slot reuse or dropped by [`clear`](Self::clear). An external
    /// ticket carries the handle itself and never goes stale.
    ///
    /// Returns [`VaultError::Empty`] on an empty vault and
    /// [`VaultError::OutOfRange`] past the logical depth.
    pub fn checkout(&mut self, index: usize) -> Result<SlotTicket<T>, VaultError> {
        if self.slots.is_empty() {
            return Err(VaultError::Empty);
        }
        if index >= self.slots.len() {
            return Err(VaultError::OutOfRange {
                index,
                len: self.slots.len(),
            });
        }
        let ticket = match self.slots.remove(index) {
            Slot::Owned(cell) => SlotTicket::owned(cell, self.store.stamp(cell)),
            Slot::External(handle) => SlotTicket::external(handle),
        };
        Ok(ticket)
    }

    /// Shared access to the object at logical `index`.
    ///
    /// Returns [`VaultError::OutOfRange`] at or past the logical depth.
    pub fn get(&self, index: usize) -> Result<&T, VaultError> {
        match self.slots.get(index) {
            Some(Slot::Owned(cell)) => Ok(self.store.value(*cell)),
            Some(Slot::External(handle)) => Ok(handle.as_ref()),
            None => Err(VaultError::OutOfRange {
                index,
                len: self.slots.len(),
            }),
        }
    }

    /// Exclusive access to the object at logical `index`.
    ///
    /// For an external slot this succeeds only while the vault holds the
    /// sole handle; otherwise [`VaultError::ExternalShared`] is
    /// returned and the caller keeps working through its own handle.
    /// Returns [`VaultError::OutOfRange`] at or past the logical depth.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, VaultError> {
        let len = self.slots.len();
        match self.slots.get_mut(index) {
            Some(Slot::Owned(cell)) => Ok(self.store.value_mut(*cell)),
            Some(Slot::External(handle)) => {
                Rc::get_mut(handle).ok_or(VaultError::ExternalShared { index })
            }
            None => Err(VaultError::OutOfRange { index, len }),
        }
    }

    /// The most recently pushed object.
    ///
    /// Returns [`VaultError::Empty`] on an empty vault.
    pub fn top(&self) -> Result<&T, VaultError> {
        match self.slots.last() {
            Some(Slot::Owned(cell)) => Ok(self.store.value(*cell)),
            Some(Slot::External(handle)) => Ok(handle.as_ref()),
            None => Err(VaultError::Empty),
        }
    }

    /// Reads a checked-out object through its ticket without
    /// re-depositing it.
    ///
    /// Returns [`VaultError::StaleTicket`] when an owned ticket's cell
    /// has been reused or cleared since checkout.
    pub fn resolve<'a>(&'a self, ticket: &'a SlotTicket<T>) -> Result<&'a T, VaultError> {
        match &ticket.inner {
            TicketInner::Owned { cell, stamp } => {
                if self.store.is_current(*cell, *stamp) {
                    Ok(self.store.value(*cell))
                } else {
                    Err(VaultError::StaleTicket { cell: *cell })
                }
            }
            TicketInner::External(handle) => Ok(handle.as_ref()),
        }
    }

    /// Which kind of storage backs the slot at logical `index`.
    ///
    /// Returns [`VaultError::OutOfRange`] at or past the logical depth.
    pub fn slot_kind(&self, index: usize) -> Result<SlotKind, VaultError> {
        match self.slots.get(index) {
            Some(Slot::Owned(_)) => Ok(SlotKind::Owned),
            Some(Slot::External(_)) => Ok(SlotKind::External),
            None => Err(VaultError::OutOfRange {
                index,
                len: self.slots.len(),
            }),
        }
    }

    /// Iterates the logical stack bottom to top.
    #[must_use]
    pub fn iter(&self) -> SlotIter<'_, T> {
        SlotIter::new(&self.store, &self.slots)
    }

    /// Saves the current logical depth.
    ///
    /// Returns [`VaultError::CheckpointOverflow`] once `MAX_CHECKPOINTS`
    /// saves are outstanding.
    pub fn checkpoint(&mut self) -> Result<(), VaultError> {
        self.checkpoints.push(self.slots.len())
    }

    /// Rewinds the logical stack to the most recent saved depth.
    ///
    /// Truncation only: nothing is dropped from the owned store, and a
    /// save deeper than the current depth (the caller popped past it)
    /// leaves the current, shallower depth in place. The vault's handle
    /// on any external slot above the restored depth is released.
    ///
    /// Returns [`VaultError::NoCheckpoint`] when no save is outstanding.
    pub fn restore(&mut self) -> Result<(), VaultError> {
        let depth = self.checkpoints.pop()?;
        self.slots.truncate(depth);
        Ok(())
    }

    /// Number of outstanding checkpoints.
    #[must_use]
    pub fn checkpoint_depth(&self) -> usize {
        self.checkpoints.len()
    }

    /// The compile-time checkpoint nesting bound.
    #[must_use]
    pub fn checkpoint_capacity(&self) -> usize {
        MAX_CHECKPOINTS
    }

    /// Discards every outstanding checkpoint. The logical stack is
    /// untouched.
    pub fn clear_checkpoints(&mut self) {
        self.checkpoints.clear();
    }

    /// Drops every owned object and resets the logical stack and the
    /// checkpoint stack. Capacities are retained for reuse.
    ///
    /// This is the one operation that drops owned objects. It works on a
    /// sealed vault, and sealing survives it.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.store.clear();
        self.checkpoints.clear();
    }

    /// Permanently disables construction of owned objects and explicit
    /// reservation. There is no unseal.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Whether the vault has been sealed.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Raises the advisory locked flag. No operation in this crate
    /// consults it; it is a convention for callers to build on.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Clears the advisory locked flag.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// State of the advisory locked flag.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Logical stack depth.
    #[must_use]
    pub fn count(&self) -> usize {
        self.slots.len()
    }

    /// Whether the logical stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of live owned objects, including popped cells awaiting
    /// reuse.
    #[must_use]
    pub fn owned_count(&self) -> usize {
        self.store.len()
    }

    /// Owned cells the current allocation can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Slots the current allocation can hold.
    #[must_use]
    pub fn slot_capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Bytes held by the owned and slot backing stores.
    #[must_use]
    pub fn memory_bytes(&self) -> usize {
        self.store.memory_bytes() + self.slots.capacity() * std::mem::size_of::<Slot<T>>()
    }

    fn ensure_slot_room(&mut self) -> Result<(), VaultError> {
        if self.slots.len() == self.slots.capacity() {
            let target = grown(self.slots.capacity(), SLOT_GROWTH_FLOOR);
            self.grow_slots_to(target)?;
        }
        Ok(())
    }

    fn grow_slots_to(&mut self, total: usize) -> Result<(), VaultError> {
        if total <= self.slots.capacity() {
            return Ok(());
        }
        self.slots
            .try_reserve_exact(total - self.slots.len())
            .map_err(|_| VaultError::AllocationFailed { requested: total })
    }
}

impl<T, const MAX_CHECKPOINTS: usize> Default for Vault<T, MAX_CHECKPOINTS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const MAX_CHECKPOINTS: usize> fmt::Debug for Vault<T, MAX_CHECKPOINTS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vault")
            .field("count", &self.slots.len())
            .field("owned_count", &self.store.len())
            .field("capacity", &self.store.capacity())
            .field("checkpoint_depth", &self.checkpoints.len())
            .field("sealed", &self.sealed)
            .field("locked", &self.locked)
            .finish_non_exhaustive()
    }
}

impl<T, const MAX_CHECKPOINTS: usize> Index<usize> for Vault<T, MAX_CHECKPOINTS> {
    type Output = T;

    /// Panicking form of [`get`](Vault::get).
    ///
    /// # Panics
    ///
    /// Panics when `index` is at or past the logical depth.
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T, const MAX_CHECKPOINTS: usize> IndexMut<usize> for Vault<T, MAX_CHECKPOINTS> {
    /// Panicking form of [`get_mut`](Vault::get_mut).
    ///
    /// # Panics
    ///
    /// Panics when `index` is at or past the logical depth, or when the
    /// slot is external and its handle is still shared.
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}
