//! # Memory-Type Matrix
//!
//! The set of memory type pairs a session runs against, split into pairs
//! that are valid for bidirectional tests and pairs that only extend
//! coverage for directional operations.
//!
//! Every bidirectional pair is also part of [`MemoryTypeMatrix::all_pairs`],
//! and no pair is listed twice. Capability tags are attached, never probed:
//! the harness decides what is available and hands that in as a
//! [`CapabilitySet`].

use std::collections::HashSet;

use tracing::debug;

use crate::error::{Error, Result};
use crate::memory::location::{CapabilityTag, MemoryLocation};
use crate::memory::pair::MemoryTypePair;

use MemoryLocation::{Cuda, Host, Neuron};

/// Pairs valid for bidirectional tests
pub const DEFAULT_BIDIRECTIONAL_PAIRS: &[MemoryTypePair] = &[
    MemoryTypePair::new(Host, Host),
    MemoryTypePair::new(Host, Cuda),
    MemoryTypePair::new(Cuda, Cuda),
    MemoryTypePair::new(Host, Neuron),
    MemoryTypePair::new(Neuron, Neuron),
];

/// Reverse-direction pairs that are only meaningful for unidirectional tests
pub const DEFAULT_UNIDIRECTIONAL_PAIRS: &[MemoryTypePair] = &[
    MemoryTypePair::new(Cuda, Host),
    MemoryTypePair::new(Neuron, Host),
];

/// Ordered memory type pairs for a test session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryTypeMatrix {
    bidirectional: Vec<MemoryTypePair>,
    all: Vec<MemoryTypePair>,
}

impl Default for MemoryTypeMatrix {
    fn default() -> Self {
        Self {
            bidirectional: DEFAULT_BIDIRECTIONAL_PAIRS.to_vec(),
            all: DEFAULT_BIDIRECTIONAL_PAIRS
                .iter()
                .chain(DEFAULT_UNIDIRECTIONAL_PAIRS)
                .copied()
                .collect(),
        }
    }
}

impl MemoryTypeMatrix {
    /// Build a matrix from explicit pair lists
    ///
    /// `all_pairs` is `bidirectional` followed by `unidirectional_only`.
    /// Fails if any pair appears more than once across the two lists.
    pub fn new(
        bidirectional: Vec<MemoryTypePair>,
        unidirectional_only: Vec<MemoryTypePair>,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for pair in bidirectional.iter().chain(&unidirectional_only) {
            if !seen.insert(*pair) {
                return Err(Error::Config(format!("memory type pair {pair} listed twice")));
            }
        }

        let mut all = bidirectional.clone();
        all.extend(unidirectional_only);
        debug!(
            target: "fabmatrix::memory",
            bidirectional = bidirectional.len(),
            all = all.len(),
            "Memory type matrix built"
        );

        Ok(Self { bidirectional, all })
    }

    /// Pairs valid for bidirectional tests, in fixture order
    pub fn bidirectional_pairs(&self) -> &[MemoryTypePair] {
        &self.bidirectional
    }

    /// Bidirectional pairs followed by unidirectional-only pairs
    pub fn all_pairs(&self) -> &[MemoryTypePair] {
        &self.all
    }

    /// Pairs that only appear in `all_pairs`
    pub fn unidirectional_only_pairs(&self) -> &[MemoryTypePair] {
        &self.all[self.bidirectional.len()..]
    }

    /// Check membership in the bidirectional set by pair identity
    pub fn is_bidirectional_capable(&self, pair: &MemoryTypePair) -> bool {
        self.bidirectional.contains(pair)
    }

    /// Filter `pairs` down to those whose capability is present
    pub fn runnable<'a>(
        pairs: &'a [MemoryTypePair],
        capabilities: &'a CapabilitySet,
    ) -> impl Iterator<Item = MemoryTypePair> + 'a {
        pairs
            .iter()
            .copied()
            .filter(move |pair| capabilities.supports(pair.capability()))
    }
}

/// Capabilities the harness has found on the current host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    available: HashSet<CapabilityTag>,
}

impl CapabilitySet {
    /// Baseline hardware only
    pub fn new() -> Self {
        Self::default()
    }

    /// Every known capability
    pub fn all() -> Self {
        CapabilityTag::ALL.iter().copied().collect()
    }

    /// Parse a list of markers such as `cuda_memory`
    pub fn from_markers<'a>(markers: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        markers.into_iter().map(str::parse::<CapabilityTag>).collect()
    }

    /// Add `tag`, builder style
    pub fn with(mut self, tag: CapabilityTag) -> Self {
        self.available.insert(tag);
        self
    }

    /// Record that `tag` is available
    pub fn insert(&mut self, tag: CapabilityTag) {
        self.available.insert(tag);
    }

    /// Check whether a pair with the given tag can run
    pub fn supports(&self, required: Option<CapabilityTag>) -> bool {
        required.map_or(true, |tag| self.available.contains(&tag))
    }
}

impl FromIterator<CapabilityTag> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = CapabilityTag>>(iter: I) -> Self {
        Self {
            available: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matrix_names() {
        let matrix = MemoryTypeMatrix::default();
        let bi: Vec<String> = matrix.bidirectional_pairs().iter().map(|p| p.name()).collect();
        assert_eq!(
            bi,
            vec!["host_to_host", "host_to_cuda", "cuda_to_cuda", "host_to_neuron", "neuron_to_neuron"]
        );
        let uni: Vec<String> = matrix.unidirectional_only_pairs().iter().map(|p| p.name()).collect();
        assert_eq!(uni, vec!["cuda_to_host", "neuron_to_host"]);
        assert_eq!(matrix.all_pairs().len(), 7);
    }

    #[test]
    fn test_default_matches_constructor() {
        let built = MemoryTypeMatrix::new(
            DEFAULT_BIDIRECTIONAL_PAIRS.to_vec(),
            DEFAULT_UNIDIRECTIONAL_PAIRS.to_vec(),
        )
        .unwrap();
        assert_eq!(built, MemoryTypeMatrix::default());
    }

    #[test]
    fn test_rejects_duplicates() {
        let pair = MemoryTypePair::new(Host, Host);
        assert!(MemoryTypeMatrix::new(vec![pair, pair], vec![]).is_err());
        assert!(MemoryTypeMatrix::new(vec![pair], vec![pair]).is_err());
    }

    #[test]
    fn test_runnable_filters_by_capability() {
        let matrix = MemoryTypeMatrix::default();

        let baseline = CapabilitySet::new();
        let names: Vec<String> = MemoryTypeMatrix::runnable(matrix.all_pairs(), &baseline)
            .map(|p| p.name())
            .collect();
        assert_eq!(names, vec!["host_to_host"]);

        let cuda = CapabilitySet::new().with(CapabilityTag::CudaMemory);
        let count = MemoryTypeMatrix::runnable(matrix.all_pairs(), &cuda).count();
        assert_eq!(count, 4);

        let everything = CapabilitySet::all();
        assert_eq!(MemoryTypeMatrix::runnable(matrix.all_pairs(), &everything).count(), 7);
    }

    #[test]
    fn test_capability_set_from_markers() {
        let set = CapabilitySet::from_markers(["neuron_memory"]).unwrap();
        assert!(set.supports(Some(CapabilityTag::NeuronMemory)));
        assert!(!set.supports(Some(CapabilityTag::CudaMemory)));
        assert!(set.supports(None));
        assert!(CapabilitySet::from_markers(["gaudi_memory"]).is_err());
    }
}
