//! # fabmatrix: parameter matrices for fabric RMA test suites
//!
//! fabmatrix derives the parameter combinations of a host/accelerator memory
//! transfer test suite and the order its collected tests run in. Running the
//! tests, launching processes and probing hardware belong to the harness.
//!
//! ## Overview
//!
//! The library has four pieces:
//!
//! 1. **Range descriptors**: `r:<start>,<step>,<end>` parsed into a lazy,
//!    restartable progression of message sizes ([`RangeSpec`]).
//!
//! 2. **Memory-type matrix**: the supported `<source>_to_<destination>`
//!    pairs, split into bidirectional-capable and unidirectional-only sets,
//!    each pair tagged with the accelerator capability it needs
//!    ([`MemoryTypeMatrix`]).
//!
//! 3. **Bidirectional deduplication**: unidirectional-only pairs are skipped
//!    for operations that already move data both ways ([`resolve`]).
//!
//! 4. **Collection ordering**: memory-region exhaustion tests are moved to
//!    the end of the run, keeping collected order otherwise
//!    ([`defer_mr_exhaustion`]).
//!
//! ## Usage
//!
//! ```
//! use fabmatrix::{rma_bw_combinations, MemoryTypeMatrix, RangeSpec};
//!
//! let sizes: RangeSpec = "r:0,1024,8192".parse().unwrap();
//! assert_eq!(sizes.len(), 9);
//!
//! let matrix = MemoryTypeMatrix::default();
//! let combos = rma_bw_combinations(&matrix);
//! assert!(combos.iter().any(|c| c.id() == "cuda_to_host-writedata"));
//! assert!(!combos.iter().any(|c| c.id() == "cuda_to_host-read"));
//! ```
//!
//! Reordering collected tests:
//!
//! ```
//! use fabmatrix::defer_mr_exhaustion;
//!
//! let ordered = defer_mr_exhaustion(vec!["test_mr_exhaustion", "test_rma_bw"]);
//! assert_eq!(ordered, vec!["test_rma_bw", "test_mr_exhaustion"]);
//! ```

pub mod axes;
pub mod constants;
pub mod dedup;
pub mod error;
pub mod memory;
pub mod operation;
pub mod ordering;
pub mod range_spec;

// Re-export primary components
pub use axes::{SizeAxes, SizeAxis};
pub use dedup::{combinations, resolve, resolve_token, rma_bw_combinations, Resolution, RmaCombination};
pub use error::{Error, Result};
pub use memory::{CapabilitySet, CapabilityTag, MemoryLocation, MemoryTypeMatrix, MemoryTypePair};
pub use operation::OperationKind;
pub use ordering::{
    defer_mr_exhaustion, defer_mr_exhaustion_in_place, is_mr_exhaustion, order_collected_names,
    read_collected_names, OrderingSummary, TestInstance,
};
pub use range_spec::{RangeInt, RangeIter, RangeSpec};

/// Version information for the fabmatrix library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
