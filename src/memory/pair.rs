//! Ordered source/destination memory pairs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::PAIR_SEPARATOR;
use crate::error::{Error, Result};
use crate::memory::location::{CapabilityTag, MemoryLocation};

/// An ordered `(source, destination)` pair, named `<source>_to_<destination>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemoryTypePair {
    pub source: MemoryLocation,
    pub destination: MemoryLocation,
}

impl MemoryTypePair {
    /// Pair data moving from `source` to `destination`
    pub const fn new(source: MemoryLocation, destination: MemoryLocation) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Name used by the harness for test ids and reporting
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// The same endpoints with the direction flipped
    pub fn reversed(&self) -> Self {
        Self::new(self.destination, self.source)
    }

    /// Both endpoints are the same kind of memory
    pub fn is_symmetric(&self) -> bool {
        self.source == self.destination
    }

    /// Capability needed to run this pair, taken from its accelerator endpoint
    ///
    /// `None` means the pair only touches host memory.
    pub fn capability(&self) -> Option<CapabilityTag> {
        self.source.capability().or_else(|| self.destination.capability())
    }
}

impl fmt::Display for MemoryTypePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.source, PAIR_SEPARATOR, self.destination)
    }
}

impl FromStr for MemoryTypePair {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (source, destination) = s
            .split_once(PAIR_SEPARATOR)
            .ok_or_else(|| Error::MalformedMemoryTypePair(s.to_string()))?;
        Ok(Self::new(source.parse()?, destination.parse()?))
    }
}

impl TryFrom<String> for MemoryTypePair {
    type Error = Error;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

impl From<MemoryTypePair> for String {
    fn from(pair: MemoryTypePair) -> Self {
        pair.to_string()
    }
}
