// SPDX-License-Identifier: MIT OR Apache-2.0

//! GUID byte-order helpers.
//!
//! [`Guid`] keeps its bytes in the mixed-endian layout used by UEFI and by
//! the Windows `GUID` struct in memory: the first three fields are little
//! endian, the last eight bytes are stored as written. Textual GUIDs and
//! RFC 4122 UUID libraries use big-endian order for all fields. These helpers
//! move between the two.

use crate::{Error, Guid, Result};

/// Build a [`Guid`] from bytes in RFC 4122 (big-endian, textual) order.
///
/// Use this for bytes coming from a UUID library such as `uuid`, or from
/// firmware tables that store GUIDs in network order.
#[must_use]
pub const fn from_rfc4122_bytes(b: [u8; 16]) -> Guid {
    Guid::from_bytes([
        b[3], b[2], b[1], b[0], b[5], b[4], b[7], b[6], b[8], b[9], b[10], b[11], b[12], b[13],
        b[14], b[15],
    ])
}

/// Get the bytes of a [`Guid`] in RFC 4122 (big-endian, textual) order.
///
/// This is the layout UUID libraries such as `uuid` expect from
/// `Uuid::from_bytes`.
#[must_use]
pub const fn to_rfc4122_bytes(guid: &Guid) -> [u8; 16] {
    let b = guid.to_bytes();
    [
        b[3], b[2], b[1], b[0], b[5], b[4], b[7], b[6], b[8], b[9], b[10], b[11], b[12], b[13],
        b[14], b[15],
    ]
}

/// Split a [`Guid`] into the fields of the Windows `GUID` struct.
#[must_use]
pub const fn to_fields(guid: &Guid) -> (u32, u16, u16, [u8; 8]) {
    let b = guid.to_bytes();
    (
        u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
        u16::from_le_bytes([b[4], b[5]]),
        u16::from_le_bytes([b[6], b[7]]),
        [b[8], b[9], b[10], b[11], b[12], b[13], b[14], b[15]],
    )
}

/// Parse a textual GUID such as `8be4df61-93ca-11d2-aa0d-00e098032b8c`.
pub fn parse(s: &str) -> Result<Guid> {
    Guid::try_parse(s).map_err(|_| Error::InvalidGuid(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guid;

    const GLOBAL: Guid = guid!("8be4df61-93ca-11d2-aa0d-00e098032b8c");
    const GLOBAL_RFC4122: [u8; 16] = [
        0x8b, 0xe4, 0xdf, 0x61, 0x93, 0xca, 0x11, 0xd2, 0xaa, 0x0d, 0x00, 0xe0, 0x98, 0x03, 0x2b,
        0x8c,
    ];

    #[test]
    fn test_from_rfc4122_bytes() {
        assert_eq!(from_rfc4122_bytes(GLOBAL_RFC4122), GLOBAL);
        assert_eq!(
            GLOBAL.to_bytes(),
            [
                0x61, 0xdf, 0xe4, 0x8b, 0xca, 0x93, 0xd2, 0x11, 0xaa, 0x0d, 0x00, 0xe0, 0x98, 0x03,
                0x2b, 0x8c,
            ]
        );
    }

    #[test]
    fn test_to_rfc4122_bytes() {
        assert_eq!(to_rfc4122_bytes(&GLOBAL), GLOBAL_RFC4122);
    }

    #[test]
    fn test_to_fields() {
        let (data1, data2, data3, data4) = to_fields(&GLOBAL);
        assert_eq!(data1, 0x8be4df61);
        assert_eq!(data2, 0x93ca);
        assert_eq!(data3, 0x11d2);
        assert_eq!(data4, [0xaa, 0x0d, 0x00, 0xe0, 0x98, 0x03, 0x2b, 0x8c]);
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse("8be4df61-93ca-11d2-aa0d-00e098032b8c").unwrap(), GLOBAL);
        assert!(matches!(
            parse("8be4df61-93ca-11d2-aa0d"),
            Err(Error::InvalidGuid(s)) if s == "8be4df61-93ca-11d2-aa0d"
        ));
    }
}
