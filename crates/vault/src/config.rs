//! Vault configuration parameters.

/// Configuration for a vault's initial storage reservations.
///
/// Controls how much backing storage is reserved up front for the owned
/// buffer and the slot stack. Both stores also grow on demand, so the
/// configuration is purely a pre-allocation hint; a zero value means the
/// corresponding store starts unallocated and is grown lazily.
///
/// The checkpoint nesting bound is not part of this struct: it is the
/// `MAX_CHECKPOINTS` const parameter on [`Vault`](crate::Vault) (default
/// 64) because it must be fixed at compile time.
#[derive(Clone, Debug)]
pub struct VaultConfig {
    /// Number of owned cells to reserve at construction.
    ///
    /// Default: 16, matching the owned buffer's growth floor.
    pub initial_capacity: usize,

    /// Number of slot entries to reserve at construction.
    ///
    /// Default: 32, matching the slot stack's growth floor.
    pub initial_slot_capacity: usize,
}

impl VaultConfig {
    /// Default owned-buffer reservation, also the floor when the buffer
    /// grows from empty (capacity doubles on every growth after that).
    pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

    /// Default slot-stack reservation, also the floor when slot storage
    /// grows from empty.
    pub const DEFAULT_SLOT_CAPACITY: usize = 32;

    /// Create a config with the default reservations.
    pub fn new() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            initial_slot_capacity: Self::DEFAULT_SLOT_CAPACITY,
        }
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CELL_GROWTH_FLOOR;
    use crate::vault::SLOT_GROWTH_FLOOR;

    #[test]
    fn defaults_match_growth_floors() {
        let config = VaultConfig::new();
        assert_eq!(config.initial_capacity, CELL_GROWTH_FLOOR);
        assert_eq!(config.initial_slot_capacity, SLOT_GROWTH_FLOOR);
    }
}
