// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tooling for C-style enums whose set of values is open.
//!
//! Firmware is free to hand back values this crate has never heard of, so
//! such enums are modelled as newtypes with a set of associated constants
//! rather than as Rust enums.

/// Interface a C-style enum as an integer (or GUID) newtype.
///
/// The generated type is `repr(transparent)` over the base type, gets one
/// associated constant per listed variant, and a `Debug` implementation that
/// prints the variant name when the value is known.
macro_rules! newtype_enum {
    (
        $(#[$type_attrs:meta])*
        $visibility:vis enum $type:ident : $base_type:ty => $(#[$impl_attrs:meta])* {
            $(
                $(#[$variant_attrs:meta])*
                $variant:ident = $value:expr,
            )*
        }
    ) => {
        $(#[$type_attrs])*
        #[repr(transparent)]
        #[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
        $visibility struct $type(pub $base_type);

        $(#[$impl_attrs])*
        #[allow(unused)]
        impl $type {
            $(
                $(#[$variant_attrs])*
                pub const $variant: $type = $type($value);
            )*
        }

        impl core::fmt::Debug for $type {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                match *self {
                    $(
                        $type::$variant => write!(f, stringify!($variant)),
                    )*
                    $type(unknown) => {
                        write!(f, "{}({:?})", stringify!($type), unknown)
                    }
                }
            }
        }
    }
}
