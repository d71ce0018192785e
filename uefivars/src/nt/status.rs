// SPDX-License-Identifier: MIT OR Apache-2.0

//! `NTSTATUS` handling around the system environment calls.

// Only the Windows store calls into this outside of tests.
#![cfg_attr(not(windows), allow(dead_code))]

use crate::{Error, Result};
use core::ptr;
use log::debug;
use uefivars_raw::nt::{STATUS_ACCESS_DENIED, STATUS_BUFFER_TOO_SMALL, STATUS_PRIVILEGE_NOT_HELD};

/// Whether `status` is a success or informational status.
pub(crate) const fn nt_success(status: i32) -> bool {
    status >= 0
}

/// Map a failure status to an [`Error`].
pub(crate) fn status_error(status: i32) -> Error {
    match status {
        STATUS_ACCESS_DENIED | STATUS_PRIVILEGE_NOT_HELD => Error::PermissionDenied,
        status => Error::Nt(status),
    }
}

/// Run a buffer-filling call until the buffer is large enough.
///
/// `call` gets the buffer (`None` for the first, sizing call) and the buffer
/// length, which it updates to the length it needs or the length it filled.
/// It returns an `NTSTATUS`. The buffer grows for as long as the call answers
/// `STATUS_BUFFER_TOO_SMALL` with a larger length.
pub(crate) fn fill_buffer<F>(mut call: F) -> Result<Vec<u8>>
where
    F: FnMut(Option<&mut [u8]>, &mut u32) -> i32,
{
    let mut len: u32 = 0;
    let mut buffer: Vec<u8> = Vec::new();
    loop {
        let data = if buffer.is_empty() {
            None
        } else {
            Some(buffer.as_mut_slice())
        };
        let status = call(data, &mut len);
        debug!("status {status:#x}, length {len}");

        match status {
            STATUS_BUFFER_TOO_SMALL if len as usize > buffer.len() => {
                buffer.resize(len as usize, 0);
            }
            status if nt_success(status) => {
                buffer.truncate(len as usize);
                return Ok(buffer);
            }
            status => return Err(status_error(status)),
        }
    }
}

/// Pointer to hand over for `value`. An empty value is passed as null, which
/// deletes the variable.
pub(crate) fn value_ptr(value: &[u8]) -> *const u8 {
    if value.is_empty() {
        ptr::null()
    } else {
        value.as_ptr()
    }
}
