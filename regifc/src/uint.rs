//! Narrow unsigned integers [`U2`] through [`U63`], the natural value types of
//! fields whose width is not a primitive width.
//!
//! A `UN` holds an `N`-bit value in the smallest primitive that fits. It
//! converts losslessly into every primitive that has at least `N` bits and into
//! nothing narrower, so a field read can never be silently truncated:
//!
//! ```
//! use regifc::uint::U10;
//!
//! let value = U10::new(0x145).unwrap();
//! assert_eq!(u16::from(value), 0x145);
//! assert_eq!(u64::from(value), 0x145);
//! assert_eq!(U10::try_from(0x400u16).ok(), None);
//! ```
//!
//! ```compile_fail
//! use regifc::uint::U10;
//!
//! let narrowed = u8::from(U10::new_masked(0x145));
//! ```

use core::fmt::{self, Display, Formatter};

use paste::paste;
use seq_macro::seq;
use snafu::{ensure, Snafu};

use crate::{FromBits, ToBits};

/// The error for value conversions that can fail at run time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConversionError {
    /// A primitive value has bits set above the width of the target type.
    #[snafu(display("value {:#x} does not fit in {} bits", value, bits))]
    OutOfRange {
        /// The rejected value.
        value: u64,
        /// The width of the target type.
        bits: u32,
    },

    /// A field holds a bit pattern that no enum variant has.
    #[snafu(display("bit pattern {:#x} has no matching variant", bits))]
    UnknownVariant {
        /// The rejected bit pattern.
        bits: u64,
    },
}

macro_rules! define_uint_type {
    ($a:literal..$b:literal: $primitive:ident => $($wider:ident),*) => {
        seq!(N in $a..$b { define_uint_type!(N: $primitive => $($wider),*); });
    };
    ($bits:literal: $primitive:ident => $($wider:ident),*) => {
        paste! {
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
            #[doc = define_uint_type!(@doc $bits $primitive)]
            #[repr(transparent)]
            pub struct [<U $bits>]($primitive);

            impl [<U $bits>] {
                /// The number of bits in this type.
                pub const BITS: u32 = $bits;

                /// The bits of the primitive that this type may use.
                pub const MASK: $primitive = (1 << $bits) - 1;

                /// The smallest value of this type.
                pub const MIN: Self = Self(0);

                /// The largest value of this type.
                pub const MAX: Self = Self(Self::MASK);

                /// Creates a value from a primitive if it is in range, as
                /// determined by [`is_in_range`](Self::is_in_range).
                #[inline(always)]
                #[must_use]
                pub const fn new(value: $primitive) -> Option<Self> {
                    if Self::is_in_range(value) {
                        Some(Self(value))
                    } else {
                        None
                    }
                }

                /// Creates a value by masking off the upper bits of a
                /// primitive.
                #[inline(always)]
                #[must_use]
                pub const fn new_masked(value: $primitive) -> Self {
                    Self(value & Self::MASK)
                }

                /// Converts the value to its storage primitive.
                #[inline(always)]
                #[must_use]
                pub const fn to_primitive(self) -> $primitive {
                    self.0
                }

                /// Checks that no bits above [`BITS`](Self::BITS) are set.
                #[inline(always)]
                pub const fn is_in_range(value: $primitive) -> bool {
                    value & !Self::MASK == 0
                }
            }

            impl Display for [<U $bits>] {
                fn fmt(&self, f: &mut Formatter) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl TryFrom<$primitive> for [<U $bits>] {
                type Error = ConversionError;

                fn try_from(value: $primitive) -> Result<Self, ConversionError> {
                    ensure!(
                        Self::is_in_range(value),
                        OutOfRangeSnafu { value, bits: Self::BITS }
                    );
                    Ok(Self(value))
                }
            }

            impl From<[<U $bits>]> for $primitive {
                #[inline(always)]
                fn from(value: [<U $bits>]) -> Self {
                    value.0
                }
            }

            $(
                impl From<[<U $bits>]> for $wider {
                    #[inline(always)]
                    fn from(value: [<U $bits>]) -> Self {
                        $wider::from(value.0)
                    }
                }
            )*

            impl ToBits for [<U $bits>] {
                const BITS: u32 = $bits;

                #[inline(always)]
                fn to_bits(self) -> u64 {
                    self.0 as u64
                }
            }

            impl FromBits for [<U $bits>] {
                #[inline(always)]
                fn from_bits(bits: u64) -> Self {
                    Self::new_masked(bits as $primitive)
                }
            }
        }
    };
    (@doc $bits:literal $primitive:ident) => {
        concat!(
            "The ", stringify!($bits), "-bit unsigned integer type.",
            "\n\n",
            "The value is stored in the least significant bits of a [`",
            stringify!($primitive),
            "`]. The unused upper bits are always clear.",
        )
    };
}

define_uint_type!(2..8: u8 => u16, u32, u64, u128);
define_uint_type!(9..16: u16 => u32, u64, u128);
define_uint_type!(17..32: u32 => u64, u128);
define_uint_type!(33..64: u64 => u128);
