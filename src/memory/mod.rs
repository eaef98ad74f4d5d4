// Memory locations, pairs and the session's memory type matrix

pub mod location;
pub mod matrix;
pub mod pair;

pub use location::{CapabilityTag, MemoryLocation};
pub use matrix::{CapabilitySet, MemoryTypeMatrix, DEFAULT_BIDIRECTIONAL_PAIRS, DEFAULT_UNIDIRECTIONAL_PAIRS};
pub use pair::MemoryTypePair;
