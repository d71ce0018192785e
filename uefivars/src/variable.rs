// SPDX-License-Identifier: MIT OR Apache-2.0

//! The [`UefiVariable`] value object and helpers for interpreting values.

use crate::{Error, MalformedError, Result, VariableAttributes, VariableVendor};
use core::fmt::{self, Display, Formatter};

/// A UEFI variable, identified by its name and vendor GUID.
///
/// A `UefiVariable` is a key, not a copy of the variable's contents. Read
/// the value and attributes through a [`VariableStore`]. Some backends have
/// to read every value just to find out which variables exist; the
/// variables they return carry that data along, see [`cached_value`].
///
/// [`VariableStore`]: crate::VariableStore
/// [`cached_value`]: Self::cached_value
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UefiVariable {
    name: String,
    vendor: VariableVendor,
    snapshot: Option<Snapshot>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Snapshot {
    attributes: VariableAttributes,
    value: Vec<u8>,
}

impl UefiVariable {
    /// Create a key for the variable `name` in the `vendor` namespace.
    #[must_use]
    pub fn new(name: impl Into<String>, vendor: impl Into<VariableVendor>) -> Self {
        Self {
            name: name.into(),
            vendor: vendor.into(),
            snapshot: None,
        }
    }

    pub(crate) fn with_snapshot(
        mut self,
        attributes: VariableAttributes,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        self.snapshot = Some(Snapshot {
            attributes,
            value: value.into(),
        });
        self
    }

    /// Name of the variable.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vendor namespace of the variable.
    #[must_use]
    pub const fn vendor(&self) -> VariableVendor {
        self.vendor
    }

    /// Attributes captured when the variable was discovered, if any.
    #[must_use]
    pub fn cached_attributes(&self) -> Option<VariableAttributes> {
        self.snapshot.as_ref().map(|s| s.attributes)
    }

    /// Value captured when the variable was discovered, if any.
    #[must_use]
    pub fn cached_value(&self) -> Option<&[u8]> {
        self.snapshot.as_ref().map(|s| s.value.as_slice())
    }

    /// Whether `self` and `other` name the same variable, regardless of any
    /// captured data.
    #[must_use]
    pub fn same_key(&self, other: &Self) -> bool {
        self.name == other.name && self.vendor == other.vendor
    }
}

/// Formats as `Name-guid`, the name efivarfs gives the variable's file.
impl Display for UefiVariable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.vendor)
    }
}

/// Interpret a value as a little-endian unsigned integer.
///
/// Values of 1, 2, 3, 4 or 8 bytes are accepted.
pub fn decode_uint(value: &[u8]) -> Result<u64> {
    if !matches!(value.len(), 1..=4 | 8) {
        return Err(Error::UnsupportedLength(value.len()));
    }
    let mut bytes = [0u8; 8];
    bytes[..value.len()].copy_from_slice(value);
    Ok(u64::from_le_bytes(bytes))
}

/// Interpret a value as 8-bit text.
///
/// Invalid UTF-8 is replaced and trailing NULs are dropped.
#[must_use]
pub fn decode_string(value: &[u8]) -> String {
    let end = value.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&value[..end]).into_owned()
}

/// Interpret a value as a UCS-2 (`CHAR16`) string.
///
/// Trailing NULs are dropped and unpaired surrogates are replaced.
pub fn decode_ucs2(value: &[u8]) -> Result<String> {
    if value.len() % 2 != 0 {
        return Err(MalformedError::new(value.len(), "odd length for a CHAR16 string").into());
    }
    Ok(decode_utf16le(value))
}

/// Decode UTF-16LE bytes whose length is known to be even, dropping trailing
/// NULs.
pub(crate) fn decode_utf16le(bytes: &[u8]) -> String {
    let mut units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    while units.last() == Some(&0) {
        units.pop();
    }
    String::from_utf16_lossy(&units)
}
