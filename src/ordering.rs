//! # Collection ordering
//!
//! Memory-region exhaustion tests drive the pool of registered memory
//! regions to its limit. They must run after everything else in the
//! session, whatever order the harness collected them in.
//!
//! The reordering is a stable two-way partition: instances whose name
//! contains `mr_exhaustion` move to the tail, and both groups keep their
//! collected order. Nothing is added, dropped or modified.

use std::borrow::Cow;
use std::io::BufRead;

use tracing::debug;

use crate::constants::MR_EXHAUSTION_MARKER;
use crate::error::Result;

/// A collected test instance, as seen by the ordering policy
pub trait TestInstance {
    /// Full test name including parameter ids
    fn name(&self) -> &str;
}

impl TestInstance for String {
    fn name(&self) -> &str {
        self
    }
}

impl TestInstance for &str {
    fn name(&self) -> &str {
        self
    }
}

impl TestInstance for Cow<'_, str> {
    fn name(&self) -> &str {
        self
    }
}

impl<T: TestInstance + ?Sized> TestInstance for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Check whether a test name marks a memory-region exhaustion test
pub fn is_mr_exhaustion(name: &str) -> bool {
    name.contains(MR_EXHAUSTION_MARKER)
}

/// Group sizes after ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderingSummary {
    /// Instances left in front
    pub regular: usize,
    /// Instances moved to the tail
    pub deferred: usize,
}

impl OrderingSummary {
    /// Number of instances ordered
    pub fn total(&self) -> usize {
        self.regular + self.deferred
    }
}

/// Move every `mr_exhaustion` instance behind all other instances
pub fn defer_mr_exhaustion<T: TestInstance>(items: Vec<T>) -> Vec<T> {
    let (regular, deferred): (Vec<T>, Vec<T>) = items
        .into_iter()
        .partition(|item| !is_mr_exhaustion(item.name()));

    debug!(
        target: "fabmatrix::ordering",
        regular = regular.len(),
        deferred = deferred.len(),
        "Deferred memory-region exhaustion tests"
    );

    let mut ordered = regular;
    ordered.extend(deferred);
    ordered
}

/// In-place form of [`defer_mr_exhaustion`] for harness-owned lists
pub fn defer_mr_exhaustion_in_place<T: TestInstance>(items: &mut Vec<T>) -> OrderingSummary {
    let ordered = defer_mr_exhaustion(std::mem::take(items));
    let deferred = ordered.iter().filter(|item| is_mr_exhaustion(item.name())).count();
    let summary = OrderingSummary {
        regular: ordered.len() - deferred,
        deferred,
    };
    *items = ordered;
    summary
}

/// Read one collected test name per line, skipping blank lines
///
/// Any read failure, including a line that is not valid UTF-8, fails the
/// whole read so that no collected test is lost.
pub fn read_collected_names<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
    Ok(lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect())
}

/// Read collected test names and return them in run order
pub fn order_collected_names<R: BufRead>(reader: R) -> Result<Vec<String>> {
    Ok(defer_mr_exhaustion(read_collected_names(reader)?))
}
