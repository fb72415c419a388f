//! Per-property access levels.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Access level gating read/write access to a single named property.
///
/// A property with no explicit permission falls back to its node's default
/// policy; the default policy itself defaults to [`Permission::ReadWrite`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Permission {
    /// Neither readable nor writable.
    #[cfg_attr(feature = "serde", serde(rename = "none"))]
    None,
    /// Readable only.
    #[cfg_attr(feature = "serde", serde(rename = "r"))]
    Read,
    /// Writable only.
    #[cfg_attr(feature = "serde", serde(rename = "w"))]
    Write,
    /// Readable and writable.
    #[cfg_attr(feature = "serde", serde(rename = "rw"))]
    ReadWrite,
}

impl Permission {
    /// Returns true if this permission allows reading.
    #[must_use]
    pub const fn allows_read(self) -> bool {
        matches!(self, Self::Read | Self::ReadWrite)
    }

    /// Returns true if this permission allows writing.
    #[must_use]
    pub const fn allows_write(self) -> bool {
        matches!(self, Self::Write | Self::ReadWrite)
    }

    /// Returns the canonical string form (`"none"`, `"r"`, `"w"`, `"rw"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Read => "r",
            Self::Write => "w",
            Self::ReadWrite => "rw",
        }
    }
}

impl Default for Permission {
    fn default() -> Self {
        Self::ReadWrite
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized permission string.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unrecognized permission: {0:?}")]
pub struct ParsePermissionError(pub String);

impl FromStr for Permission {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "r" => Ok(Self::Read),
            "w" => Ok(Self::Write),
            "rw" => Ok(Self::ReadWrite),
            other => Err(ParsePermissionError(other.to_string())),
        }
    }
}
