// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::Guid;
use std::fmt::{self, Debug, Display, Formatter};
use std::io;
use std::path::PathBuf;

/// Return type of every variable operation.
pub type Result<T = (), E = Error> = core::result::Result<T, E>;

/// All errors that can happen when working with UEFI variables.
#[derive(Debug)]
pub enum Error {
    /// Filesystem errors from the efivarfs backend. See [`IoError`].
    Io(IoError),
    /// No variable matched the lookup.
    NotFound {
        /// Name that was looked up.
        name: String,
        /// Vendor that was looked up, if the lookup was restricted to one.
        vendor: Option<Guid>,
    },
    /// A strict lookup by name matched more than one vendor.
    Ambiguous {
        /// Name that was looked up.
        name: String,
        /// Number of variables carrying that name.
        count: usize,
    },
    /// The variable name cannot be represented by the backend.
    InvalidName(String),
    /// The string is not a textual GUID.
    InvalidGuid(String),
    /// Data handed back by the operating system does not have the expected
    /// layout. See [`MalformedError`].
    Malformed(MalformedError),
    /// The value cannot be interpreted as an integer of this many bytes.
    UnsupportedLength(usize),
    /// The caller lacks the privilege to access firmware variables.
    PermissionDenied,
    /// A native NT call failed with this `NTSTATUS`.
    Nt(i32),
    /// UEFI variables are not reachable on this platform.
    Unsupported,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => Display::fmt(err, f),
            Self::NotFound { name, vendor: None } => {
                write!(f, "could not locate variable {name}")
            }
            Self::NotFound {
                name,
                vendor: Some(vendor),
            } => write!(f, "could not locate variable {name}-{vendor}"),
            Self::Ambiguous { name, count } => {
                write!(f, "found {count} variables with name {name}")
            }
            Self::InvalidName(name) => write!(f, "invalid variable name {name:?}"),
            Self::InvalidGuid(s) => write!(f, "invalid GUID {s:?}"),
            Self::Malformed(err) => Display::fmt(err, f),
            Self::UnsupportedLength(len) => {
                write!(f, "unable to convert a value of {len} bytes to an integer")
            }
            Self::PermissionDenied => write!(f, "requires administrator privilege"),
            Self::Nt(status) => write!(f, "failed with NTSTATUS {:#010x}", *status as u32),
            Self::Unsupported => write!(f, "UEFI variables are not supported on this platform"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<IoError> for Error {
    fn from(value: IoError) -> Self {
        Self::Io(value)
    }
}

impl From<MalformedError> for Error {
    fn from(value: MalformedError) -> Self {
        Self::Malformed(value)
    }
}

/// IO error with the path and operation that caused it.
#[derive(Debug)]
pub struct IoError {
    /// The path that led to the error.
    pub path: PathBuf,
    /// The context in which the path was used.
    pub context: IoErrorContext,
    /// The underlying IO error.
    pub source: io::Error,
}

impl IoError {
    pub(crate) fn new(
        path: impl Into<PathBuf>,
        context: IoErrorContext,
        source: io::Error,
    ) -> Self {
        Self {
            path: path.into(),
            context,
            source,
        }
    }
}

impl Display for IoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.context, self.path.display(), self.source)
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Enum that further specifies the context in which an [`IoError`] occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IoErrorContext {
    /// Could not list the variable directory.
    ReadDirectory,
    /// Could not open the variable file.
    Open,
    /// Error reading the variable file.
    Read,
    /// Error writing the variable file.
    Write,
    /// Could not remove the variable file.
    Remove,
}

impl Display for IoErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ReadDirectory => "failed to read directory",
            Self::Open => "failed to open",
            Self::Read => "failed to read",
            Self::Write => "failed to write",
            Self::Remove => "failed to remove",
        };
        write!(f, "{s}")
    }
}

/// Layout violation found while decoding data from the operating system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedError {
    /// Byte offset at which decoding failed.
    pub offset: usize,
    /// What was wrong at that offset.
    pub reason: &'static str,
}

impl MalformedError {
    pub(crate) const fn new(offset: usize, reason: &'static str) -> Self {
        Self { offset, reason }
    }
}

impl Display for MalformedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "malformed data at offset {:#x}: {}", self.offset, self.reason)
    }
}

impl std::error::Error for MalformedError {}
