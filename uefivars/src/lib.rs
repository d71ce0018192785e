// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access UEFI firmware variables from a running operating system.
//!
//! A UEFI variable is identified by a name and a vendor GUID, and holds an
//! attribute word plus an opaque value that the platform firmware keeps in
//! non-volatile storage. Operating systems expose the variable store in
//! different ways; this crate wraps each of them behind the
//! [`VariableStore`] trait:
//!
//! - [`efivarfs::Efivarfs`] on Linux, reading and writing the files of the
//!   efivarfs pseudo-filesystem.
//! - [`nt::NtVariableStore`] on Windows, enumerating the store with the
//!   privileged `ntdll` system environment calls.
//!
//! [`SystemStore`] names the backend of the current platform, and the
//! functions in [`vars`] use it directly.
//!
//! # Example
//!
//! ```no_run
//! use uefivars::{vars, VariableVendor};
//!
//! # fn main() -> uefivars::Result {
//! let timeout = vars::variable("Timeout", VariableVendor::GLOBAL_VARIABLE)?;
//! let (value, attributes) = vars::get(&timeout)?;
//! println!("{timeout}: {value:?} ({attributes:?})");
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! Backend calls are reported through the [`log`] crate at debug level, and
//! recoverable oddities (unparsable efivarfs entries, immutable flags that
//! cannot be cleared) at warn level.
//!
//! [`log`]: https://crates.io/crates/log

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::ptr_as_ptr, missing_docs, unused)]
#![deny(clippy::all)]
#![deny(clippy::must_use_candidate)]

mod error;
mod store;
mod variable;

#[cfg(target_os = "linux")]
pub mod efivarfs;
pub mod guid;
pub mod nt;
pub mod vars;

pub use error::{Error, IoError, IoErrorContext, MalformedError, Result};
pub use store::{SystemStore, UnsupportedStore, VariableStore};
pub use uefivars_raw::{guid, Guid, VariableAttributes, VariableVendor};
pub use variable::{decode_string, decode_uint, decode_ucs2, UefiVariable};
