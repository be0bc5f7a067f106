//! The SDM store.
//!
//! One fixed random address table, one mutable integer trace table, and the
//! four operations Kanerva's model defines over them: construct, write,
//! read, erase.

use crate::{BitVector, SdmError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Default seed for the address table, matching the reference parameters.
pub const DEFAULT_SEED: u64 = 42;

/// Construction parameters for an [`SdmStore`].
///
/// Letters in parentheses follow Kanerva's notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdmConfig {
    /// Length of address vectors (N).
    pub address_dim: usize,
    /// Length of memory vectors (U).
    pub memory_dim: usize,
    /// Number of hard locations (M).
    pub num_locations: usize,
    /// Hamming distance threshold for activation (H).
    pub activation_threshold: u32,
    /// Seed for the fixed random address table.
    pub seed: u64,
}

impl SdmConfig {
    pub fn new(
        address_dim: usize,
        memory_dim: usize,
        num_locations: usize,
        activation_threshold: u32,
    ) -> Self {
        Self {
            address_dim,
            memory_dim,
            num_locations,
            activation_threshold,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Kanerva Sparse Distributed Memory.
///
/// Stores binary memory vectors across `num_locations` hard locations, each
/// holding a fixed random binary address and an accumulating signed trace
/// row. A write touches every location whose address is within
/// `activation_threshold` Hamming distance of the target address; a read
/// sums the same set of rows and thresholds the result at zero.
///
/// # Example
/// ```
/// use kanerva_sdm::{SdmConfig, SdmStore};
///
/// let mut sdm = SdmStore::new(SdmConfig::new(8, 8, 4, 8))?;
/// let address = [1, 1, 0, 0, 1, 0, 1, 0];
/// let memory = [1, 0, 1, 0, 1, 0, 1, 0];
///
/// sdm.write(&address, &memory)?;
/// assert_eq!(sdm.read(&address)?, memory);
/// # Ok::<(), kanerva_sdm::SdmError>(())
/// ```
pub struct SdmStore {
    config: SdmConfig,
    /// Fixed random addresses (A), one row per hard location. Never mutated
    /// after construction.
    address_table: Vec<BitVector>,
    /// Accumulated traces (C), row-major `num_locations x memory_dim`.
    trace_table: Vec<i32>,
    /// Number of completed writes since construction or the last erase (T).
    stored_count: u64,
}

impl SdmStore {
    /// Create a store with a freshly drawn address table.
    ///
    /// The same configuration (seed included) always produces the same
    /// address table, so recall behavior is reproducible across runs.
    pub fn new(config: SdmConfig) -> Result<Self, SdmError> {
        if config.address_dim == 0 || config.memory_dim == 0 || config.num_locations == 0 {
            return Err(SdmError::InvalidConfiguration {
                message: format!(
                    "dimensions and location count must be positive \
                     (address_dim={}, memory_dim={}, num_locations={})",
                    config.address_dim, config.memory_dim, config.num_locations
                ),
            });
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let address_table = (0..config.num_locations)
            .map(|_| BitVector::random(&mut rng, config.address_dim))
            .collect();

        debug!(
            address_dim = config.address_dim,
            memory_dim = config.memory_dim,
            num_locations = config.num_locations,
            activation_threshold = config.activation_threshold,
            seed = config.seed,
            "initialized SDM store"
        );

        Ok(Self {
            trace_table: vec![0i32; config.num_locations * config.memory_dim],
            address_table,
            stored_count: 0,
            config,
        })
    }

    /// Write a memory vector at an address.
    ///
    /// The memory is converted to polar {-1,+1} encoding and accumulated
    /// into the trace row of every activated hard location. Repeated writes
    /// superimpose. An empty activation set leaves the trace table untouched
    /// but still counts as a completed write.
    pub fn write(&mut self, address: &[u8], memory: &[u8]) -> Result<(), SdmError> {
        self.check_vector(address, self.config.address_dim, "address")?;
        self.check_vector(memory, self.config.memory_dim, "memory")?;

        let activated = self.activated_locations(&BitVector::from_bits(address));
        trace!(activated = activated.len(), "write");

        let memory_dim = self.config.memory_dim;
        for &location in &activated {
            let row = &mut self.trace_table[location * memory_dim..(location + 1) * memory_dim];
            for (entry, &bit) in row.iter_mut().zip(memory.iter()) {
                // polar encoding: 0 -> -1, 1 -> +1
                *entry += 2 * bit as i32 - 1;
            }
        }
        self.stored_count += 1;
        Ok(())
    }

    /// Read the memory vector recalled at an address.
    ///
    /// Sums the trace rows of all activated hard locations and decodes each
    /// position to 1 where the sum is >= 0 (a tie at exactly zero decodes
    /// to 1). Returns all zeros when no location activates.
    pub fn read(&self, address: &[u8]) -> Result<Vec<u8>, SdmError> {
        self.check_vector(address, self.config.address_dim, "address")?;

        let activated = self.activated_locations(&BitVector::from_bits(address));
        trace!(activated = activated.len(), "read");

        if activated.is_empty() {
            return Ok(vec![0u8; self.config.memory_dim]);
        }

        let memory_dim = self.config.memory_dim;
        let mut sums = vec![0i64; memory_dim];
        for &location in &activated {
            let row = &self.trace_table[location * memory_dim..(location + 1) * memory_dim];
            for (sum, &entry) in sums.iter_mut().zip(row.iter()) {
                *sum += entry as i64;
            }
        }
        Ok(sums.iter().map(|&s| (s >= 0) as u8).collect())
    }

    /// Clear all accumulated traces and the stored count.
    ///
    /// The address table is preserved: hard-location geometry survives an
    /// erase, only content is lost. Idempotent.
    pub fn erase_memory(&mut self) {
        self.trace_table.fill(0);
        self.stored_count = 0;
        debug!("erased SDM traces");
    }

    /// Number of completed writes since construction or the last erase.
    pub fn stored_count(&self) -> u64 {
        self.stored_count
    }

    /// Length of address vectors (N).
    pub fn address_dim(&self) -> usize {
        self.config.address_dim
    }

    /// Length of memory vectors (U).
    pub fn memory_dim(&self) -> usize {
        self.config.memory_dim
    }

    /// Number of hard locations (M).
    pub fn num_locations(&self) -> usize {
        self.config.num_locations
    }

    /// Hamming distance threshold for activation (H).
    pub fn activation_threshold(&self) -> u32 {
        self.config.activation_threshold
    }

    /// Number of hard locations a query address would activate.
    ///
    /// Diagnostic accessor; useful for tuning H against M before writing.
    pub fn activation_count(&self, address: &[u8]) -> Result<usize, SdmError> {
        self.check_vector(address, self.config.address_dim, "address")?;
        Ok(self
            .activated_locations(&BitVector::from_bits(address))
            .len())
    }

    /// Indices of hard locations within the activation threshold of the
    /// query. Evaluated fresh on every call by a full table scan.
    fn activated_locations(&self, address: &BitVector) -> Vec<usize> {
        self.address_table
            .iter()
            .enumerate()
            .filter(|(_, row)| row.distance(address) <= self.config.activation_threshold)
            .map(|(i, _)| i)
            .collect()
    }

    /// Shared dimension and binary-content validation for write/read inputs.
    fn check_vector(
        &self,
        vector: &[u8],
        expected: usize,
        name: &'static str,
    ) -> Result<(), SdmError> {
        if vector.len() != expected {
            return Err(SdmError::DimensionMismatch {
                vector: name,
                expected,
                actual: vector.len(),
            });
        }
        if let Some(position) = vector.iter().position(|&b| b > 1) {
            return Err(SdmError::NotBinary {
                vector: name,
                position,
                value: vector[position],
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for SdmStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdmStore")
            .field("config", &self.config)
            .field("stored_count", &self.stored_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_activation_config() -> SdmConfig {
        // H equals N, so every location activates on every call
        SdmConfig::new(8, 8, 4, 8)
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        for config in [
            SdmConfig::new(0, 8, 4, 1),
            SdmConfig::new(8, 0, 4, 1),
            SdmConfig::new(8, 8, 0, 1),
        ] {
            assert!(matches!(
                SdmStore::new(config),
                Err(SdmError::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn test_fresh_store_tie_break() {
        // All-zero trace rows sum to exactly zero at every position, and a
        // zero sum decodes to bit 1. Matches the reference behavior.
        let sdm = SdmStore::new(full_activation_config()).unwrap();
        assert_eq!(sdm.read(&[1u8; 8]).unwrap(), vec![1u8; 8]);
        assert_eq!(sdm.stored_count(), 0);
    }

    #[test]
    fn test_single_write_round_trip() {
        let mut sdm = SdmStore::new(full_activation_config()).unwrap();
        let address = [1, 0, 0, 1, 1, 0, 1, 1];
        let memory = [1, 0, 1, 0, 1, 0, 1, 0];
        sdm.write(&address, &memory).unwrap();
        assert_eq!(sdm.read(&address).unwrap(), memory);
        assert_eq!(sdm.stored_count(), 1);
    }

    #[test]
    fn test_zero_sum_decodes_to_one() {
        let mut sdm = SdmStore::new(full_activation_config()).unwrap();
        // Opposite memories cancel, every trace sum lands at exactly zero
        sdm.write(&[0u8; 8], &[1, 0, 1, 0, 1, 0, 1, 0]).unwrap();
        sdm.write(&[0u8; 8], &[0, 1, 0, 1, 0, 1, 0, 1]).unwrap();
        assert_eq!(sdm.read(&[0u8; 8]).unwrap(), vec![1u8; 8]);
    }

    #[test]
    fn test_empty_activation_set() {
        // H = 0 and a query at distance >= 1 from every stored address
        let config = SdmConfig::new(16, 8, 4, 0);
        let mut sdm = SdmStore::new(config).unwrap();
        let query = find_unmatched_address(&sdm);

        sdm.write(&query, &[1u8; 8]).unwrap();
        assert_eq!(sdm.stored_count(), 1, "empty-activation write still counts");
        assert_eq!(sdm.read(&query).unwrap(), vec![0u8; 8]);
    }

    // Flip bits of an all-zero query until it matches no hard location
    // exactly. With N=16 and M=4 a miss exists within a few probes.
    fn find_unmatched_address(sdm: &SdmStore) -> Vec<u8> {
        let mut query = vec![0u8; sdm.address_dim()];
        loop {
            if sdm.activation_count(&query).unwrap() == 0 {
                return query;
            }
            let flip = query.iter().position(|&b| b == 0).unwrap();
            query[flip] = 1;
        }
    }
}
