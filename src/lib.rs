//! # kanerva-sdm
//!
//! Kanerva's Sparse Distributed Memory (SDM): a content-addressable
//! associative memory that stores and recalls fixed-length binary vectors
//! across a large set of fixed random hard locations.
//!
//! Each hard location holds a fixed random binary address and a signed
//! integer trace row. A write activates every location whose address is
//! within a Hamming-distance threshold of the target address and adds the
//! memory, in polar {-1,+1} encoding, to each activated trace row. A read
//! sums the activated rows and thresholds each position at zero.
//!
//! Features:
//! - Bitpacked addresses with POPCNT-accelerated Hamming distance
//! - Seeded, reproducible hard-location generation
//! - Strict dimension and binary-content validation on every input vector
//!
//! Reference: Pentti Kanerva (1992), Sparse Distributed Memory and Related
//! Models.
//!
//! ## Quick Start
//! ```
//! use kanerva_sdm::{SdmConfig, SdmStore};
//!
//! let config = SdmConfig::new(100, 100, 1000, 37).with_seed(7);
//! let mut sdm = SdmStore::new(config)?;
//!
//! let address = vec![1u8; 100];
//! let memory: Vec<u8> = (0..100).map(|i| (i % 2) as u8).collect();
//!
//! sdm.write(&address, &memory)?;
//! let recalled = sdm.read(&address)?;
//! assert_eq!(recalled.len(), 100);
//! # Ok::<(), kanerva_sdm::SdmError>(())
//! ```

pub mod error;
pub mod store;
pub mod vector;

pub use error::*;
pub use store::*;
pub use vector::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exports() {
        let sdm = SdmStore::new(SdmConfig::new(8, 8, 4, 8)).unwrap();
        assert_eq!(sdm.address_dim(), 8);
        assert_eq!(sdm.memory_dim(), 8);
        assert_eq!(sdm.num_locations(), 4);
        assert_eq!(sdm.activation_threshold(), 8);
        assert_eq!(sdm.stored_count(), 0);
    }
}
