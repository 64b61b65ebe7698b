//! Vault error types.

use std::error::Error;
use std::fmt;

/// Errors reported by vault operations.
///
/// Every fallible operation reports synchronously to its caller and leaves
/// the container's logical state unchanged on failure. With the exception
/// of [`VaultError::AllocationFailed`] (genuine resource exhaustion, which
/// a caller may handle by reducing demand and retrying), each variant marks
/// a caller-contract violation to fix rather than a condition to recover
/// from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VaultError {
    /// Structural mutation attempted after [`seal`](crate::Vault::seal).
    Sealed,
    /// Backing storage could not be obtained; the container is untouched.
    AllocationFailed {
        /// The capacity (in elements) the failed growth aimed for.
        requested: usize,
    },
    /// A logical index at or past the current stack depth.
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The logical stack depth at the time of the call.
        len: usize,
    },
    /// `top` or `checkout` invoked on a zero-depth logical stack.
    Empty,
    /// `pop` invoked on a zero-depth logical stack.
    Underflow,
    /// A checked-out ticket whose owned cell has been reused or cleared
    /// since checkout.
    StaleTicket {
        /// The cell index the ticket referred to.
        cell: usize,
    },
    /// Exclusive access to an external slot whose handle is still shared
    /// with the caller.
    ExternalShared {
        /// The logical index of the external slot.
        index: usize,
    },
    /// Checkpoint nesting exceeds the compile-time bound.
    CheckpointOverflow {
        /// The `MAX_CHECKPOINTS` bound of the vault.
        limit: usize,
    },
    /// `restore` invoked with no saved checkpoint.
    NoCheckpoint,
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sealed => write!(f, "vault is sealed; construction and reservation disabled"),
            Self::AllocationFailed { requested } => {
                write!(f, "allocation failed while growing to {requested} elements")
            }
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range (logical depth {len})")
            }
            Self::Empty => write!(f, "vault is empty"),
            Self::Underflow => write!(f, "pop on an empty vault"),
            Self::StaleTicket { cell } => {
                write!(f, "stale ticket: cell {cell} has been reused or cleared")
            }
            Self::ExternalShared { index } => {
                write!(f, "external slot {index} is shared; exclusive access unavailable")
            }
            Self::CheckpointOverflow { limit } => {
                write!(f, "checkpoint stack overflow (limit {limit})")
            }
            Self::NoCheckpoint => write!(f, "restore without a saved checkpoint"),
        }
    }
}

impl Error for VaultError {}
