//! Benchmark workloads for the vault container.
//!
//! Provides deterministic operation scripts so bench runs and profiling
//! sessions replay identical sequences for a given seed.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vault::Vault;

/// One step of a mixed container workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkloadOp {
    /// Construct an owned payload.
    Emplace,
    /// Push an external payload.
    Checkin,
    /// Drop the top slot from the view.
    Pop,
    /// Move the bottom slot to the top through a ticket.
    Rotate,
    /// Save the current depth.
    Checkpoint,
    /// Rewind to the last save.
    Restore,
}

/// Builds a deterministic mixed workload script.
///
/// Weighted toward pushes so the stack stays populated. The same seed
/// always yields the same script (ChaCha8, seeded).
pub fn mixed_workload(seed: u64, len: usize) -> Vec<WorkloadOp> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| match rng.next_u32() % 9 {
            0..=2 => WorkloadOp::Emplace,
            3 => WorkloadOp::Checkin,
            4..=5 => WorkloadOp::Pop,
            6 => WorkloadOp::Rotate,
            7 => WorkloadOp::Checkpoint,
            _ => WorkloadOp::Restore,
        })
        .collect()
}

/// Applies one workload step.
///
/// Rule errors (popping an empty vault, overflowing the checkpoint
/// stack) are part of the workload and are discarded.
pub fn apply_op(vault: &mut Vault<u64>, op: WorkloadOp, next_value: &mut u64) {
    match op {
        WorkloadOp::Emplace => {
            let _ = vault.emplace(*next_value);
            *next_value += 1;
        }
        WorkloadOp::Checkin => {
            let _ = vault.checkin(*next_value);
            *next_value += 1;
        }
        WorkloadOp::Pop => {
            let _ = vault.pop();
        }
        WorkloadOp::Rotate => {
            if let Ok(ticket) = vault.checkout(0) {
                let _ = vault.checkin(ticket);
            }
        }
        WorkloadOp::Checkpoint => {
            let _ = vault.checkpoint();
        }
        WorkloadOp::Restore => {
            let _ = vault.restore();
        }
    }
}

/// Runs a whole script against a fresh vault and returns the final
/// logical depth.
pub fn run_script(script: &[WorkloadOp]) -> usize {
    let mut vault: Vault<u64> = Vault::new();
    let mut next_value = 0u64;
    for op in script {
        apply_op(&mut vault, *op, &mut next_value);
    }
    vault.count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_script() {
        let a = mixed_workload(42, 512);
        let b = mixed_workload(42, 512);
        assert_eq!(a, b);
        assert_eq!(a.len(), 512);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = mixed_workload(1, 512);
        let b = mixed_workload(2, 512);
        assert_ne!(a, b);
    }

    #[test]
    fn long_scripts_cover_every_op() {
        let script = mixed_workload(7, 4096);
        for op in [
            WorkloadOp::Emplace,
            WorkloadOp::Checkin,
            WorkloadOp::Pop,
            WorkloadOp::Rotate,
            WorkloadOp::Checkpoint,
            WorkloadOp::Restore,
        ] {
            assert!(script.contains(&op));
        }
    }

    #[test]
    fn run_script_completes_and_stays_bounded() {
        let script = mixed_workload(42, 4096);
        let depth = run_script(&script);
        assert!(depth <= 4096);
        assert_eq!(depth, run_script(&script));
    }
}
