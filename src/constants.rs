//! Centralized constants for the fabmatrix parameter matrix
//!
//! This module contains every literal the parameter matrix owns: text
//! formats, naming markers and the default size axes.
//! All new constants should be added here rather than scattered throughout the code.

// ============================================================================
// TEXT FORMATS
// ============================================================================

/// Prefix of a range descriptor (`r:<start>,<step>,<end>`)
pub const RANGE_SPEC_PREFIX: &str = "r:";

/// Separator between the components of a range descriptor
pub const RANGE_SPEC_SEPARATOR: char = ',';

/// Separator between source and destination in a memory type pair name
pub const PAIR_SEPARATOR: &str = "_to_";

/// Separator between parameter ids in a combined test id
pub const PARAM_ID_SEPARATOR: &str = "-";

/// Separator between descriptors in a size axis override
pub const AXIS_LIST_SEPARATOR: char = ';';

// ============================================================================
// MEMORY LOCATION TOKENS
// ============================================================================

/// Token for host-resident memory
pub const HOST_TOKEN: &str = "host";

/// Token for CUDA accelerator memory
pub const CUDA_TOKEN: &str = "cuda";

/// Token for Neuron accelerator memory
pub const NEURON_TOKEN: &str = "neuron";

/// Capability marker required by CUDA memory
pub const CUDA_MEMORY_CAPABILITY: &str = "cuda_memory";

/// Capability marker required by Neuron memory
pub const NEURON_MEMORY_CAPABILITY: &str = "neuron_memory";

// ============================================================================
// OPERATION TOKENS
// ============================================================================

/// RMA read
pub const READ_TOKEN: &str = "read";

/// RMA write
pub const WRITE_TOKEN: &str = "write";

/// RMA write with remote completion data
pub const WRITEDATA_TOKEN: &str = "writedata";

// ============================================================================
// ORDERING
// ============================================================================

/// Substring identifying memory-region exhaustion tests
pub const MR_EXHAUSTION_MARKER: &str = "mr_exhaustion";

// ============================================================================
// DEFAULT SIZE AXES
// ============================================================================

/// Message sizes for general transfer tests
pub const DEFAULT_MESSAGE_SIZES: &[&str] = &[
    "r:0,4,64",
    "r:4048,4,4148",
    "r:8000,4,9000",
    "r:17000,4,18000",
    "r:0,1024,1048576",
];

/// Message sizes for inject tests
pub const DEFAULT_INJECT_MESSAGE_SIZES: &[&str] = &["r:0,4,64", "r:4048,4,4148", "r:8000,4,9000"];

/// Message sizes for zero-copy receive tests
pub const DEFAULT_ZCPY_RECV_MESSAGE_SIZES: &[&str] = &["r:0,4,32", "r:0,1024,8192"];

/// Largest message posted by zero-copy receive tests
pub const DEFAULT_ZCPY_RECV_MAX_MSG_SIZE: u64 = 8192;

// ============================================================================
// ENVIRONMENT OVERRIDES
// ============================================================================

/// Override for the message size axis
pub const ENV_MESSAGE_SIZES: &str = "FABMATRIX_MESSAGE_SIZES";

/// Override for the inject message size axis
pub const ENV_INJECT_MESSAGE_SIZES: &str = "FABMATRIX_INJECT_MESSAGE_SIZES";

/// Override for the zero-copy receive message size axis
pub const ENV_ZCPY_RECV_MESSAGE_SIZES: &str = "FABMATRIX_ZCPY_RECV_MESSAGE_SIZES";

/// Override for the zero-copy receive max message size
pub const ENV_ZCPY_RECV_MAX_MSG_SIZE: &str = "FABMATRIX_ZCPY_RECV_MAX_MSG_SIZE";
