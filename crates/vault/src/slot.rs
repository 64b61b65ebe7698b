//! Slot representation.
//!
//! A slot is one entry in the vault's logical stack. It never holds the
//! object itself; it names where the object lives. Owned objects sit in
//! the vault's cell store and are addressed by cell index. External
//! objects arrive through [`checkin`](crate::Vault::checkin) and are held
//! by a shared-ownership handle, so a caller can keep their own handle
//! alive across pops and restores.

use std::rc::Rc;

/// Backing storage of one logical slot.
#[derive(Clone, Debug)]
pub(crate) enum Slot<T> {
    /// Cell index into the vault's owned store.
    Owned(usize),
    /// Shared handle to an object the vault does not own.
    External(Rc<T>),
}

/// Which kind of storage backs a logical slot.
///
/// Reported by [`slot_kind`](crate::Vault::slot_kind).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// The object lives in the vault's cell store.
    Owned,
    /// The object was supplied by the caller.
    External,
}

/// A claim on a slot's object produced by [`checkout`](crate::Vault::checkout)
/// and redeemed by [`checkin`](crate::Vault::checkin).
///
/// An owned ticket names a cell together with the construction stamp the
/// cell carried at checkout. The cell itself stays in the store, so the
/// ticket remains redeemable until the cell is reconstructed by slot
/// reuse or destroyed by [`clear`](crate::Vault::clear); after either,
/// redemption reports [`StaleTicket`](crate::VaultError::StaleTicket).
///
/// An external ticket carries the shared handle itself and never goes
/// stale.
///
/// Fresh external objects convert directly: both `T` and `Rc<T>`
/// implement `Into<SlotTicket<T>>`, so `vault.checkin(value)` and
/// `vault.checkin(handle)` work without an explicit checkout first.
#[must_use = "a discarded ticket abandons its object until the vault is cleared"]
#[derive(Clone, Debug)]
pub struct SlotTicket<T> {
    pub(crate) inner: TicketInner<T>,
}

/// Private payload of a [`SlotTicket`].
#[derive(Clone, Debug)]
pub(crate) enum TicketInner<T> {
    /// Stamped claim on an owned cell.
    Owned {
        /// Cell index in the owned store.
        cell: usize,
        /// Construction stamp of the cell at checkout time.
        stamp: u64,
    },
    /// Shared handle to an external object.
    External(Rc<T>),
}

impl<T> SlotTicket<T> {
    /// Builds a ticket for an owned cell. Only checkout mints these.
    pub(crate) fn owned(cell: usize, stamp: u64) -> Self {
        Self {
            inner: TicketInner::Owned { cell, stamp },
        }
    }

    /// Builds a ticket around a shared external handle.
    pub(crate) fn external(handle: Rc<T>) -> Self {
        Self {
            inner: TicketInner::External(handle),
        }
    }

    /// Reports which kind of slot redeeming this ticket will produce.
    #[must_use]
    pub fn kind(&self) -> SlotKind {
        match self.inner {
            TicketInner::Owned { .. } => SlotKind::Owned,
            TicketInner::External(_) => SlotKind::External,
        }
    }
}

impl<T> From<T> for SlotTicket<T> {
    /// Wraps a fresh external object for checkin.
    fn from(value: T) -> Self {
        Self::external(Rc::new(value))
    }
}

impl<T> From<Rc<T>> for SlotTicket<T> {
    /// Adopts an existing shared handle for checkin. The caller may keep
    /// clones of the handle; exclusive access through the vault is then
    /// refused until those clones are gone.
    fn from(handle: Rc<T>) -> Self {
        Self::external(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_conversion_is_external() {
        let ticket: SlotTicket<u32> = 7u32.into();
        assert_eq!(ticket.kind(), SlotKind::External);
    }

    #[test]
    fn handle_conversion_shares_ownership() {
        let handle = Rc::new(String::from("probe"));
        let ticket: SlotTicket<String> = Rc::clone(&handle).into();
        assert_eq!(ticket.kind(), SlotKind::External);
        assert_eq!(Rc::strong_count(&handle), 2);
    }

    #[test]
    fn owned_tickets_report_their_kind() {
        let ticket = SlotTicket::<u32>::owned(3, 11);
        assert_eq!(ticket.kind(), SlotKind::Owned);
    }
}
