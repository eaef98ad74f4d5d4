//! # Bidirectional deduplication
//!
//! Bidirectional operations move data both ways, so `cuda_to_host` under
//! `read` exercises the same transfers as `host_to_cuda` under `read`. The
//! unidirectional-only pairs exist for directional operations such as
//! `writedata`; combining them with a bidirectional operation is skipped.
//!
//! The decision is a total function over `(pair, operation)` and is taken
//! once, when the combination table is built, before any test setup.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::constants::PARAM_ID_SEPARATOR;
use crate::error::Result;
use crate::memory::{MemoryTypeMatrix, MemoryTypePair};
use crate::operation::OperationKind;

/// Outcome of resolving a memory type pair against an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Run the combination with this pair
    Run(MemoryTypePair),
    /// The combination duplicates a bidirectional one
    Skip,
}

impl Resolution {
    /// Check whether the combination is dropped
    pub fn is_skip(&self) -> bool {
        matches!(self, Resolution::Skip)
    }

    /// The pair to run, if any
    pub fn pair(&self) -> Option<MemoryTypePair> {
        match self {
            Resolution::Run(pair) => Some(*pair),
            Resolution::Skip => None,
        }
    }
}

/// Decide whether `pair` runs under `op`
pub fn resolve(matrix: &MemoryTypeMatrix, pair: MemoryTypePair, op: OperationKind) -> Resolution {
    if op.is_bidirectional() && !matrix.is_bidirectional_capable(&pair) {
        debug!(
            target: "fabmatrix::dedup",
            memory_type = %pair,
            operation = %op,
            "Duplicated memory type for bidirectional test"
        );
        return Resolution::Skip;
    }
    Resolution::Run(pair)
}

/// [`resolve`] for a raw operation token
///
/// Fails with `UnsupportedOperationKind` for tokens outside
/// `read`, `write` and `writedata`.
pub fn resolve_token(matrix: &MemoryTypeMatrix, pair: MemoryTypePair, op: &str) -> Result<Resolution> {
    Ok(resolve(matrix, pair, op.parse()?))
}

/// A memory type and operation that survived deduplication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RmaCombination {
    pub memory_type: MemoryTypePair,
    pub operation: OperationKind,
}

impl RmaCombination {
    /// Parameter id in the harness's `<memory_type>-<operation>` form
    pub fn id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RmaCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.memory_type, PARAM_ID_SEPARATOR, self.operation)
    }
}

/// Resolve every `(pair, op)` in `all_pairs × operations`, keeping the
/// combinations that run
///
/// Pairs are the outer loop and operations the inner one, both in fixture
/// order.
pub fn combinations(matrix: &MemoryTypeMatrix, operations: &[OperationKind]) -> Vec<RmaCombination> {
    let mut combos = Vec::with_capacity(matrix.all_pairs().len() * operations.len());
    let mut skipped = 0;

    for &pair in matrix.all_pairs() {
        for &operation in operations {
            match resolve(matrix, pair, operation) {
                Resolution::Run(memory_type) => combos.push(RmaCombination {
                    memory_type,
                    operation,
                }),
                Resolution::Skip => skipped += 1,
            }
        }
    }

    debug!(
        target: "fabmatrix::dedup",
        kept = combos.len(),
        skipped,
        "Resolved RMA combinations"
    );
    combos
}

/// The RMA bandwidth table over every known operation kind
pub fn rma_bw_combinations(matrix: &MemoryTypeMatrix) -> Vec<RmaCombination> {
    combinations(matrix, OperationKind::ALL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::memory::MemoryLocation::*;

    #[test]
    fn test_unidirectional_pair_skipped_for_read() {
        let matrix = MemoryTypeMatrix::default();
        let pair = MemoryTypePair::new(Cuda, Host);
        assert_eq!(resolve(&matrix, pair, OperationKind::Read), Resolution::Skip);
        assert_eq!(resolve(&matrix, pair, OperationKind::Write), Resolution::Skip);
        assert_eq!(resolve(&matrix, pair, OperationKind::WriteData), Resolution::Run(pair));
    }

    #[test]
    fn test_bidirectional_pair_always_runs() {
        let matrix = MemoryTypeMatrix::default();
        let pair = MemoryTypePair::new(Host, Neuron);
        for &op in OperationKind::ALL {
            assert_eq!(resolve(&matrix, pair, op).pair(), Some(pair));
        }
    }

    #[test]
    fn test_resolve_token() {
        let matrix = MemoryTypeMatrix::default();
        let pair = MemoryTypePair::new(Neuron, Host);
        assert!(resolve_token(&matrix, pair, "read").unwrap().is_skip());
        assert!(!resolve_token(&matrix, pair, "writedata").unwrap().is_skip());
        assert!(matches!(
            resolve_token(&matrix, pair, "send"),
            Err(Error::UnsupportedOperationKind(token)) if token == "send"
        ));
    }

    #[test]
    fn test_rma_bw_table() {
        let combos = rma_bw_combinations(&MemoryTypeMatrix::default());
        // 5 bidirectional pairs × 3 ops + 2 unidirectional pairs × writedata
        assert_eq!(combos.len(), 17);
        assert_eq!(combos[0].id(), "host_to_host-read");
        assert_eq!(combos[1].id(), "host_to_host-writedata");
        assert_eq!(combos[2].id(), "host_to_host-write");
        let tail: Vec<String> = combos[15..].iter().map(|c| c.id()).collect();
        assert_eq!(tail, vec!["cuda_to_host-writedata", "neuron_to_host-writedata"]);
    }
}
