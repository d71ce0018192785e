// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw types for working with UEFI variables from an operating system.
//!
//! This crate holds the plain data definitions shared by every variable
//! backend: the attribute flags, the vendor GUID namespace, and the record
//! layout that Windows uses when it enumerates the firmware variable store.
//!
//! For reading and writing variables, use the [`uefivars`] crate instead of
//! `uefivars-raw`.
//!
//! [`uefivars`]: https://crates.io/crates/uefivars

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(
    clippy::all,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate,
    clippy::ptr_as_ptr,
    clippy::use_self,
    missing_debug_implementations,
    unused
)]

#[macro_use]
mod enums;

pub mod nt;
pub mod variable;

pub use uguid::{guid, Guid};
pub use variable::{VariableAttributes, VariableVendor};
