//! Arena-backed, checkpointable stack container with owned and external
//! slots.
//!
//! A [`Vault`] is one container doing three jobs that usually come from
//! three different structures:
//!
//! - an object pool: owned objects are constructed into a growable cell
//!   store and their storage is reclaimed for later constructions rather
//!   than freed,
//! - a stack: a logical view of slots, pushed and popped in order, where
//!   each slot refers to an owned cell or to a caller-supplied object,
//! - a rewind log: bounded checkpoints of the logical depth that
//!   [`restore`](Vault::restore) unwinds in LIFO order without dropping
//!   a single object.
//!
//! # Storage model
//!
//! Slots never hold objects. They indirect, either into the owned cell
//! store by index or through a shared [`Rc`](std::rc::Rc) handle for
//! objects checked in from outside:
//!
//! ```text
//!   logical stack          slot indirection        storage
//!
//!   top    -> [ Owned(1)  ] -------------------> cells[1]
//!             [ External  ] ---> Rc<T> (also held by the caller)
//!   bottom -> [ Owned(0)  ] -------------------> cells[0]
//!
//!   cells[2]: constructed but popped, first in line for reuse
//! ```
//!
//! Removal ([`pop`](Vault::pop), [`checkout`](Vault::checkout),
//! [`restore`](Vault::restore)) shrinks only the logical view. Owned
//! cells keep their occupants and are reclaimed by the next
//! [`emplace`](Vault::emplace) before any new cell is appended; the one
//! operation that drops owned objects is [`clear`](Vault::clear). Both
//! backing stores grow by doubling (owned cells from a floor of 16,
//! slots from a floor of 32) and surface allocation failure as an error
//! instead of aborting.
//!
//! # Checkpoints
//!
//! [`checkpoint`](Vault::checkpoint) saves the current depth, up to the
//! `MAX_CHECKPOINTS` const parameter (default
//! [`DEFAULT_MAX_CHECKPOINTS`]). [`restore`](Vault::restore) truncates
//! the view back to the most recent save. Because nothing is dropped,
//! a rolled-back computation leaves its cells behind for the next pass,
//! which makes checkpoint/rewind loops allocation-free at steady state.
//!
//! # Ownership and threading
//!
//! External objects are shared through [`Rc`](std::rc::Rc): the vault
//! never drops a caller's object, and a caller handle kept across a
//! checkin lets the object outlive any pop or rewind. The price is that
//! a vault is single-threaded (`!Send`, `!Sync`).
//!
//! # Examples
//!
//! ```
//! use vault::{SlotKind, Vault};
//!
//! let mut vault: Vault<String> = Vault::new();
//!
//! // Owned objects are constructed in place and addressed by logical
//! // position.
//! vault.emplace(String::from("alpha"))?;
//! vault.emplace(String::from("beta"))?;
//!
//! // External objects participate in the same stack.
//! vault.checkin(String::from("gamma"))?;
//! assert_eq!(vault.slot_kind(2)?, SlotKind::External);
//!
//! // Checkpoints rewind the view without dropping anything.
//! vault.checkpoint()?;
//! vault.emplace(String::from("delta"))?;
//! vault.restore()?;
//! assert_eq!(vault.count(), 3);
//!
//! // A checked-out object can be read and re-deposited later.
//! let ticket = vault.checkout(0)?;
//! assert_eq!(vault.resolve(&ticket)?, "alpha");
//! vault.checkin(ticket)?;
//!
//! let collected: Vec<&str> = vault.iter().map(String::as_str).collect();
//! assert_eq!(collected, ["beta", "gamma", "alpha"]);
//! # Ok::<(), vault::VaultError>(())
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod checkpoint;
mod config;
mod error;
mod iter;
mod slot;
mod store;
mod vault;

pub use config::VaultConfig;
pub use error::VaultError;
pub use iter::SlotIter;
pub use slot::{SlotKind, SlotTicket};
pub use vault::{Vault, DEFAULT_MAX_CHECKPOINTS};
