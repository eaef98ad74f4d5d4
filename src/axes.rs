//! Session-scoped message size axes
//!
//! Each axis is a list of range descriptors, one test parameter per
//! descriptor. Descriptors are parsed when the axis is built so a broken
//! axis fails before any test instance exists. Axes are immutable once
//! built and can be read from any number of threads. An axis always has at
//! least one descriptor, however it was built.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::*;
use crate::error::{Error, Result};
use crate::range_spec::RangeSpec;

/// One parameter axis of range descriptors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RangeSpec>", into = "Vec<RangeSpec>")]
pub struct SizeAxis {
    specs: Vec<RangeSpec>,
}

impl SizeAxis {
    /// Build an axis from parsed ranges
    ///
    /// Fails with [`Error::Config`] when `specs` is empty.
    pub fn new(specs: Vec<RangeSpec>) -> Result<Self> {
        if specs.is_empty() {
            return Err(Error::Config("size axis lists no range descriptors".to_string()));
        }
        Ok(Self { specs })
    }

    /// Parse every descriptor, failing on the first malformed one
    pub fn parse<'a>(descriptors: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let specs = descriptors
            .into_iter()
            .map(RangeSpec::<u64>::parse)
            .collect::<Result<Vec<_>>>()?;
        Self::new(specs)
    }

    /// Parse a `;`-separated list of descriptors
    pub fn parse_list(list: &str) -> Result<Self> {
        Self::parse(
            list.split(AXIS_LIST_SEPARATOR)
                .map(str::trim)
                .filter(|d| !d.is_empty()),
        )
    }

    /// The axis parameters, in order
    pub fn specs(&self) -> &[RangeSpec] {
        &self.specs
    }

    /// Number of parameters on the axis
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Always false for a constructed axis
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Descriptor strings, as used for parameter ids
    pub fn ids(&self) -> Vec<String> {
        self.specs.iter().map(|s| s.to_string()).collect()
    }

    /// Every size the axis expands to, parameter by parameter
    pub fn sizes(&self) -> impl Iterator<Item = u64> + '_ {
        self.specs.iter().flat_map(|s| s.iter())
    }

    /// Largest size any parameter produces
    pub fn max_size(&self) -> Option<u64> {
        self.specs.iter().map(|s| s.last()).max()
    }
}

impl TryFrom<Vec<RangeSpec>> for SizeAxis {
    type Error = Error;

    fn try_from(specs: Vec<RangeSpec>) -> Result<Self> {
        Self::new(specs)
    }
}

impl From<SizeAxis> for Vec<RangeSpec> {
    fn from(axis: SizeAxis) -> Self {
        axis.specs
    }
}

/// Message size axes for a test session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeAxes {
    /// General transfer tests
    pub message_size: SizeAxis,
    /// Inject tests
    pub inject_message_size: SizeAxis,
    /// Zero-copy receive tests
    pub zcpy_recv_message_size: SizeAxis,
    /// Largest message posted by zero-copy receive tests
    pub zcpy_recv_max_msg_size: u64,
}

impl Default for SizeAxes {
    fn default() -> Self {
        Self::from_lists(
            DEFAULT_MESSAGE_SIZES,
            DEFAULT_INJECT_MESSAGE_SIZES,
            DEFAULT_ZCPY_RECV_MESSAGE_SIZES,
            DEFAULT_ZCPY_RECV_MAX_MSG_SIZE,
        )
        .unwrap_or_else(|e| unreachable!("built-in size axes are well formed: {e}"))
    }
}

impl SizeAxes {
    /// Build axes from descriptor lists
    pub fn from_lists(
        message_size: &[&str],
        inject_message_size: &[&str],
        zcpy_recv_message_size: &[&str],
        zcpy_recv_max_msg_size: u64,
    ) -> Result<Self> {
        Ok(Self {
            message_size: SizeAxis::parse(message_size.iter().copied())?,
            inject_message_size: SizeAxis::parse(inject_message_size.iter().copied())?,
            zcpy_recv_message_size: SizeAxis::parse(zcpy_recv_message_size.iter().copied())?,
            zcpy_recv_max_msg_size,
        })
    }

    /// Defaults with overrides from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from `lookup`
    ///
    /// Separated from [`SizeAxes::from_env`] so overrides can be tested
    /// without touching the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut axes = Self::default();

        let axis_overrides: [(&str, &mut SizeAxis); 3] = [
            (ENV_MESSAGE_SIZES, &mut axes.message_size),
            (ENV_INJECT_MESSAGE_SIZES, &mut axes.inject_message_size),
            (ENV_ZCPY_RECV_MESSAGE_SIZES, &mut axes.zcpy_recv_message_size),
        ];
        for (key, axis) in axis_overrides {
            if let Some(value) = lookup(key) {
                let parsed = SizeAxis::parse_list(&value).map_err(|e| match e {
                    Error::Config(reason) => Error::Config(format!("{key}: {reason}")),
                    other => other,
                })?;
                info!(target: "fabmatrix::config", key, value = %value, "Size axis override");
                *axis = parsed;
            }
        }

        if let Some(value) = lookup(ENV_ZCPY_RECV_MAX_MSG_SIZE) {
            axes.zcpy_recv_max_msg_size = value.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "{ENV_ZCPY_RECV_MAX_MSG_SIZE} must be a non-negative integer, got {value:?}"
                ))
            })?;
            info!(
                target: "fabmatrix::config",
                key = ENV_ZCPY_RECV_MAX_MSG_SIZE,
                value = axes.zcpy_recv_max_msg_size,
                "Size override"
            );
        }

        Ok(axes)
    }

    /// Get a descriptive summary of these axes
    pub fn summary(&self) -> String {
        format!(
            "Size Axes:\n\
             - Message sizes: {:?}\n\
             - Inject message sizes: {:?}\n\
             - Zero-copy recv message sizes: {:?}\n\
             - Zero-copy recv max message size: {}",
            self.message_size.ids(),
            self.inject_message_size.ids(),
            self.zcpy_recv_message_size.ids(),
            self.zcpy_recv_max_msg_size
        )
    }
}
