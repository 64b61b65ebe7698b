//! Bounded checkpoint stack.
//!
//! Checkpoints record logical stack depths and restore in LIFO order.
//! The nesting bound `N` comes from the vault's const parameter and is
//! enforced on every push. Storage stays inline for the common shallow
//! nesting and spills to the heap past eight outstanding saves.

use smallvec::SmallVec;

use crate::error::VaultError;

/// LIFO stack of saved depths, capped at `N` entries.
#[derive(Debug)]
pub(crate) struct CheckpointStack<const N: usize> {
    saved: SmallVec<[usize; 8]>,
}

impl<const N: usize> CheckpointStack<N> {
    pub(crate) fn new() -> Self {
        Self {
            saved: SmallVec::new(),
        }
    }

    /// Saves `depth`, refusing once `N` checkpoints are outstanding.
    pub(crate) fn push(&mut self, depth: usize) -> Result<(), VaultError> {
        if self.saved.len() == N {
            return Err(VaultError::CheckpointOverflow { limit: N });
        }
        self.saved.push(depth);
        Ok(())
    }

    /// Takes the most recent saved depth.
    pub(crate) fn pop(&mut self) -> Result<usize, VaultError> {
        self.saved.pop().ok_or(VaultError::NoCheckpoint)
    }

    pub(crate) fn len(&self) -> usize {
        self.saved.len()
    }

    pub(crate) fn clear(&mut self) {
        self.saved.clear();
    }
}
