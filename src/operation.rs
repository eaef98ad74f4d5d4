//! RMA operation kinds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{READ_TOKEN, WRITEDATA_TOKEN, WRITE_TOKEN};
use crate::error::{Error, Result};

/// Remote memory access operation exercised by a bandwidth test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Read,
    WriteData,
    Write,
}

impl OperationKind {
    /// All operation kinds, in fixture order.
    pub const ALL: &'static [OperationKind] =
        &[OperationKind::Read, OperationKind::WriteData, OperationKind::Write];

    /// Literal token used on the command line and in test ids
    pub fn token(&self) -> &'static str {
        match self {
            OperationKind::Read => READ_TOKEN,
            OperationKind::WriteData => WRITEDATA_TOKEN,
            OperationKind::Write => WRITE_TOKEN,
        }
    }

    /// Whether the test runs traffic in both directions
    ///
    /// `writedata` carries remote completion data and is inherently
    /// directional. Every new kind must state this explicitly.
    pub fn is_bidirectional(&self) -> bool {
        match self {
            OperationKind::Read => true,
            OperationKind::Write => true,
            OperationKind::WriteData => false,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for OperationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OperationKind::ALL
            .iter()
            .copied()
            .find(|op| op.token() == s)
            .ok_or_else(|| Error::UnsupportedOperationKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_round_trip() {
        for &op in OperationKind::ALL {
            assert_eq!(op.token().parse::<OperationKind>().unwrap(), op);
        }
    }

    #[test]
    fn test_unsupported_token() {
        for bad in ["atomic", "READ", "write_data", ""] {
            assert!(matches!(
                bad.parse::<OperationKind>(),
                Err(Error::UnsupportedOperationKind(token)) if token == bad
            ));
        }
    }

    #[test]
    fn test_only_writedata_is_unidirectional() {
        assert!(OperationKind::Read.is_bidirectional());
        assert!(OperationKind::Write.is_bidirectional());
        assert!(!OperationKind::WriteData.is_bidirectional());
    }
}
