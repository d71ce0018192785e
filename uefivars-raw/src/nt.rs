// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layout of the buffer filled by `NtEnumerateSystemEnvironmentValuesEx`.
//!
//! The buffer is a chain of variable-length records. Each record starts with
//! a [`VariableNameAndValue`] header, followed by the NUL-terminated UTF-16LE
//! variable name, followed by the value bytes:
//!
//! ```text
//! offset  size  field
//! 0       4     next_entry_offset  (relative to this record, 0 = last)
//! 4       4     value_offset       (relative to this record)
//! 8       4     value_length
//! 12      4     attributes
//! 16      16    vendor_guid        (mixed-endian)
//! 32      ..    name               (UTF-16LE, NUL-terminated)
//! ..      ..    value
//! ```

use crate::{Guid, VariableAttributes};

/// Information class asking for variable names only.
pub const VARIABLE_INFORMATION_NAMES: u32 = 1;

/// Information class asking for names, vendors, attributes and values.
pub const VARIABLE_INFORMATION_VALUES: u32 = 2;

/// Privilege required to read or write firmware environment values.
pub const SE_SYSTEM_ENVIRONMENT_PRIVILEGE: u32 = 22;

/// `NTSTATUS`: the buffer is too small; the required length was returned.
pub const STATUS_BUFFER_TOO_SMALL: i32 = 0xc000_0023_u32 as i32;

/// `NTSTATUS`: access denied.
pub const STATUS_ACCESS_DENIED: i32 = 0xc000_0022_u32 as i32;

/// `NTSTATUS`: a required privilege is not held by the client.
pub const STATUS_PRIVILEGE_NOT_HELD: i32 = 0xc000_0061_u32 as i32;

/// Fixed-size header of one record in the enumeration buffer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(C)]
pub struct VariableNameAndValue {
    /// Offset from the start of this record to the next one, or zero if this
    /// is the last record.
    pub next_entry_offset: u32,

    /// Offset from the start of this record to the value bytes. The name
    /// occupies the space between the header and the value.
    pub value_offset: u32,

    /// Length of the value in bytes.
    pub value_length: u32,

    /// Attribute word of the variable.
    pub attributes: u32,

    /// Vendor GUID of the variable.
    pub vendor_guid: Guid,
}

impl VariableNameAndValue {
    /// Size of the header in bytes; the name starts at this offset.
    pub const SIZE: usize = 32;

    /// Read a header from the first [`SIZE`] bytes of a record.
    ///
    /// [`SIZE`]: Self::SIZE
    #[must_use]
    pub const fn from_bytes(bytes: &[u8; Self::SIZE]) -> Self {
        let mut guid = [0u8; 16];
        let mut i = 0;
        while i < guid.len() {
            guid[i] = bytes[16 + i];
            i += 1;
        }
        Self {
            next_entry_offset: u32_at(bytes, 0),
            value_offset: u32_at(bytes, 4),
            value_length: u32_at(bytes, 8),
            attributes: u32_at(bytes, 12),
            vendor_guid: Guid::from_bytes(guid),
        }
    }

    /// Attribute word as flags.
    #[must_use]
    pub const fn attributes(&self) -> VariableAttributes {
        VariableAttributes::from_bits_retain(self.attributes)
    }
}

const fn u32_at(bytes: &[u8; VariableNameAndValue::SIZE], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guid;

    #[test]
    fn test_header_size() {
        assert_eq!(
            core::mem::size_of::<VariableNameAndValue>(),
            VariableNameAndValue::SIZE
        );
    }

    #[test]
    fn test_header_from_bytes() {
        let mut bytes = [0u8; VariableNameAndValue::SIZE];
        bytes[0..4].copy_from_slice(&0x48u32.to_le_bytes());
        bytes[4..8].copy_from_slice(&0x2au32.to_le_bytes());
        bytes[8..12].copy_from_slice(&3u32.to_le_bytes());
        bytes[12..16].copy_from_slice(&7u32.to_le_bytes());
        bytes[16..32].copy_from_slice(&[
            0x61, 0xdf, 0xe4, 0x8b, 0xca, 0x93, 0xd2, 0x11, 0xaa, 0x0d, 0x00, 0xe0, 0x98, 0x03,
            0x2b, 0x8c,
        ]);

        let header = VariableNameAndValue::from_bytes(&bytes);
        assert_eq!(header.next_entry_offset, 0x48);
        assert_eq!(header.value_offset, 0x2a);
        assert_eq!(header.value_length, 3);
        assert_eq!(
            header.attributes(),
            VariableAttributes::NON_VOLATILE
                | VariableAttributes::BOOTSERVICE_ACCESS
                | VariableAttributes::RUNTIME_ACCESS
        );
        assert_eq!(
            header.vendor_guid,
            guid!("8be4df61-93ca-11d2-aa0d-00e098032b8c")
        );
    }
}
