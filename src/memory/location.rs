//! Memory locations and the capabilities they require

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{Error, Result};

/// The memory domain a transfer buffer resides in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryLocation {
    /// Host RAM
    Host,
    /// CUDA accelerator memory
    Cuda,
    /// Neuron accelerator memory
    Neuron,
}

impl MemoryLocation {
    /// All known memory locations.
    pub const ALL: &'static [MemoryLocation] =
        &[MemoryLocation::Host, MemoryLocation::Cuda, MemoryLocation::Neuron];

    /// Lowercase token used in pair names
    pub fn token(&self) -> &'static str {
        match self {
            MemoryLocation::Host => HOST_TOKEN,
            MemoryLocation::Cuda => CUDA_TOKEN,
            MemoryLocation::Neuron => NEURON_TOKEN,
        }
    }

    /// Capability the harness must have before using this location
    pub fn capability(&self) -> Option<CapabilityTag> {
        match self {
            MemoryLocation::Host => None,
            MemoryLocation::Cuda => Some(CapabilityTag::CudaMemory),
            MemoryLocation::Neuron => Some(CapabilityTag::NeuronMemory),
        }
    }

    /// Check if this location lives on an accelerator
    pub fn is_accelerator(&self) -> bool {
        self.capability().is_some()
    }
}

impl fmt::Display for MemoryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for MemoryLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MemoryLocation::ALL
            .iter()
            .copied()
            .find(|loc| loc.token() == s)
            .ok_or_else(|| Error::UnknownMemoryLocation(s.to_string()))
    }
}

/// Hardware capability a memory type pair depends on
///
/// Absence of a tag means the pair runs on baseline hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityTag {
    /// A CUDA device is present
    CudaMemory,
    /// A Neuron device is present
    NeuronMemory,
}

impl CapabilityTag {
    /// All known capability tags.
    pub const ALL: &'static [CapabilityTag] = &[CapabilityTag::CudaMemory, CapabilityTag::NeuronMemory];

    /// Marker name, as used by the harness for test selection
    pub fn marker(&self) -> &'static str {
        match self {
            CapabilityTag::CudaMemory => CUDA_MEMORY_CAPABILITY,
            CapabilityTag::NeuronMemory => NEURON_MEMORY_CAPABILITY,
        }
    }
}

impl fmt::Display for CapabilityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

impl FromStr for CapabilityTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CapabilityTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.marker() == s)
            .ok_or_else(|| Error::UnknownCapability(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_tokens() {
        for &loc in MemoryLocation::ALL {
            assert_eq!(loc.token().parse::<MemoryLocation>().unwrap(), loc);
        }
        assert!(matches!(
            "gpu".parse::<MemoryLocation>(),
            Err(Error::UnknownMemoryLocation(_))
        ));
    }

    #[test]
    fn test_host_needs_no_capability() {
        assert_eq!(MemoryLocation::Host.capability(), None);
        assert!(!MemoryLocation::Host.is_accelerator());
        assert_eq!(MemoryLocation::Cuda.capability(), Some(CapabilityTag::CudaMemory));
        assert_eq!(MemoryLocation::Neuron.capability(), Some(CapabilityTag::NeuronMemory));
    }

    #[test]
    fn test_capability_markers() {
        assert_eq!(CapabilityTag::CudaMemory.to_string(), "cuda_memory");
        assert_eq!("neuron_memory".parse::<CapabilityTag>().unwrap(), CapabilityTag::NeuronMemory);
        assert!("rocm_memory".parse::<CapabilityTag>().is_err());
    }
}
