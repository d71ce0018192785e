// SPDX-License-Identifier: MIT OR Apache-2.0

//! Windows backend, built on the NT system environment value calls.
//!
//! Windows has no per-variable read call that works reliably for arbitrary
//! vendors, so the whole variable store is enumerated into one buffer with
//! `NtEnumerateSystemEnvironmentValuesEx` and decoded with [`decode`].
//! The decoder is platform independent.

mod decode;
mod status;

pub use decode::decode;

#[cfg(windows)]
mod ffi;
#[cfg(windows)]
mod store;

#[cfg(windows)]
pub use store::NtVariableStore;
