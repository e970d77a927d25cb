//! Per-call random sources.
//!
//! Every generation call owns its own `StdRng`; nothing in this crate touches
//! a process-wide generator. Seeded calls are reproducible, unseeded calls draw
//! fresh OS entropy for their private instance.
//!
//! For batches, a master seed expands into per-`(symbol, iteration)` sub-seeds
//! via BLAKE3. Derivation is hash-based, not order-dependent, so parallel
//! batches give identical results regardless of thread scheduling.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Build the random source for one generation call.
pub fn simulation_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Deterministic seed hierarchy for scenario batches.
#[derive(Debug, Clone)]
pub struct RngHierarchy {
    master_seed: u64,
}

impl RngHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive the seed for scenario `iteration` of `symbol`.
    pub fn sub_seed(&self, symbol: &str, iteration: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(&(symbol.len() as u64).to_le_bytes());
        hasher.update(symbol.as_bytes());
        hasher.update(&iteration.to_le_bytes());
        let hash = hasher.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }

    pub fn rng_for(&self, symbol: &str, iteration: u64) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(symbol, iteration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn seeded_sources_repeat() {
        let draw = |seed| -> Vec<u64> {
            simulation_rng(Some(seed))
                .sample_iter(rand::distributions::Standard)
                .take(8)
                .collect()
        };
        assert_eq!(draw(9), draw(9));
        assert_ne!(draw(9), draw(10));
    }

    #[test]
    fn unseeded_sources_are_independent() {
        let a: u128 = simulation_rng(None).gen();
        let b: u128 = simulation_rng(None).gen();
        assert_ne!(a, b);
    }

    #[test]
    fn sub_seeds_are_deterministic() {
        let hierarchy = RngHierarchy::new(42);
        assert_eq!(hierarchy.sub_seed("TIC", 0), hierarchy.sub_seed("TIC", 0));
    }

    #[test]
    fn different_symbols_and_iterations_differ() {
        let hierarchy = RngHierarchy::new(42);
        assert_ne!(hierarchy.sub_seed("TIC", 0), hierarchy.sub_seed("TOC", 0));
        assert_ne!(hierarchy.sub_seed("TIC", 0), hierarchy.sub_seed("TIC", 1));
    }

    #[test]
    fn derivation_order_independent() {
        let hierarchy = RngHierarchy::new(42);
        let tic_first = hierarchy.sub_seed("TIC", 0);
        let toc_second = hierarchy.sub_seed("TOC", 0);
        let toc_first = hierarchy.sub_seed("TOC", 0);
        let tic_second = hierarchy.sub_seed("TIC", 0);
        assert_eq!(tic_first, tic_second);
        assert_eq!(toc_first, toc_second);
    }

    #[test]
    fn different_master_seeds_different_output() {
        assert_ne!(
            RngHierarchy::new(42).sub_seed("TIC", 0),
            RngHierarchy::new(43).sub_seed("TIC", 0)
        );
    }
}
