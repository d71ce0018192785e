// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attribute flags and vendor namespaces of UEFI variables.

use crate::{guid, Guid};
use bitflags::bitflags;
use core::fmt::{self, Display, Formatter};

bitflags! {
    /// Flags describing the attributes of a variable.
    ///
    /// Both efivarfs and the NT enumeration buffer carry these as a
    /// little-endian `u32`. Bits not listed here are kept as-is, so a value
    /// read from firmware can be written back unchanged.
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct VariableAttributes: u32 {
        /// Variable is maintained across a power cycle.
        const NON_VOLATILE = 0x01;

        /// Variable is accessible during the time that boot services are
        /// accessible.
        const BOOTSERVICE_ACCESS = 0x02;

        /// Variable is accessible during the time that runtime services are
        /// accessible.
        const RUNTIME_ACCESS = 0x04;

        /// Variable is stored in the portion of NVR allocated for error
        /// records.
        const HARDWARE_ERROR_RECORD = 0x08;

        /// Deprecated.
        const AUTHENTICATED_WRITE_ACCESS = 0x10;

        /// Variable payload begins with an EFI_VARIABLE_AUTHENTICATION_2
        /// structure.
        const TIME_BASED_AUTHENTICATED_WRITE_ACCESS = 0x20;

        /// Never reported when reading a variable. When writing, the payload
        /// is appended to the current value if the firmware supports it.
        const APPEND_WRITE = 0x40;

        /// Variable payload begins with an EFI_VARIABLE_AUTHENTICATION_3
        /// structure.
        const ENHANCED_AUTHENTICATED_ACCESS = 0x80;
    }
}

impl VariableAttributes {
    /// Decode the attribute word stored in front of a variable's value.
    ///
    /// Unknown bits are retained.
    #[must_use]
    pub const fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Self::from_bits_retain(u32::from_le_bytes(bytes))
    }

    /// Encode the attribute word as it is stored in front of a variable's
    /// value.
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 4] {
        self.bits().to_le_bytes()
    }
}

newtype_enum! {
    /// Variable vendor GUID. This serves as a namespace for variables to
    /// avoid naming conflicts between vendors. The UEFI specification
    /// defines some special values, and vendors will define their own.
    pub enum VariableVendor: Guid => {
        /// Used to access global variables.
        GLOBAL_VARIABLE = guid!("8be4df61-93ca-11d2-aa0d-00e098032b8c"),

        /// Used to access EFI signature database variables.
        IMAGE_SECURITY_DATABASE = guid!("d719b2cb-3d3a-4596-a3bc-dad00e67656f"),

        /// Used by shim for its MOK variables.
        SHIM_LOCK = guid!("605dab50-e046-4300-abb6-3dd810dd8b23"),
    }
}

impl From<Guid> for VariableVendor {
    fn from(guid: Guid) -> Self {
        Self(guid)
    }
}

impl From<VariableVendor> for Guid {
    fn from(vendor: VariableVendor) -> Self {
        vendor.0
    }
}

impl Display for VariableVendor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_le_bytes() {
        let attrs = VariableAttributes::NON_VOLATILE
            | VariableAttributes::BOOTSERVICE_ACCESS
            | VariableAttributes::RUNTIME_ACCESS;
        assert_eq!(attrs.to_le_bytes(), [0x07, 0, 0, 0]);
        assert_eq!(VariableAttributes::from_le_bytes([0x07, 0, 0, 0]), attrs);
    }

    #[test]
    fn test_attributes_keep_unknown_bits() {
        let attrs = VariableAttributes::from_le_bytes([0x07, 0x01, 0, 0x80]);
        assert_eq!(attrs.bits(), 0x8000_0107);
        assert!(attrs.contains(VariableAttributes::RUNTIME_ACCESS));
        assert_eq!(attrs.to_le_bytes(), [0x07, 0x01, 0, 0x80]);
    }

    #[test]
    fn test_vendor_display() {
        extern crate std;
        use std::format;

        assert_eq!(
            format!("{}", VariableVendor::GLOBAL_VARIABLE),
            "8be4df61-93ca-11d2-aa0d-00e098032b8c"
        );
        assert_eq!(
            format!("{:?}", VariableVendor::IMAGE_SECURITY_DATABASE),
            "IMAGE_SECURITY_DATABASE"
        );
    }
}
