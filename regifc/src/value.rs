//! Register words and the values that can be stored in fields.

use core::fmt::{Debug, LowerHex};

use num_traits::{PrimInt, Unsigned};
use paste::paste;
use seq_macro::seq;

use crate::insert::InsertBits;
use crate::uint::*;

/// An unsigned primitive that can back a register: [`u8`], [`u16`], [`u32`]
/// or [`u64`].
///
/// Masks are computed in a [`u64`] carrier, so every `Word` converts to and
/// from `u64` without loss.
///
/// This trait is sealed and cannot be implemented outside of this crate.
pub trait Word:
    PrimInt + Unsigned + Debug + Default + LowerHex + InsertBits + crate::sealed::Sealed
{
    /// The number of bits in this type.
    const BITS: u32;

    /// Truncates a carrier value to this type.
    fn from_u64(value: u64) -> Self;

    /// Widens this value to the carrier type.
    fn to_u64(self) -> u64;
}

macro_rules! impl_word {
    ($($primitive:ident),*) => {$(
        impl crate::sealed::Sealed for $primitive {}

        impl Word for $primitive {
            const BITS: u32 = $primitive::BITS;

            #[inline(always)]
            fn from_u64(value: u64) -> Self {
                value as $primitive
            }

            #[inline(always)]
            fn to_u64(self) -> u64 {
                self as u64
            }
        }
    )*};
}

impl_word!(u8, u16, u32, u64);

/// A value that can be written into a field.
///
/// Implemented for [`bool`], the primitive [`Word`]s, the narrow integers in
/// [`uint`](crate::uint) and enums deriving [`FieldEnum`](crate::FieldEnum).
pub trait ToBits: Copy {
    /// The number of bits needed to hold any value of this type.
    ///
    /// Writing a value into a field narrower than this is a compile error.
    const BITS: u32;

    /// Returns the value right-aligned, with no bits set at or above
    /// [`BITS`](Self::BITS).
    fn to_bits(self) -> u64;
}

/// A value that every bit pattern of its width maps onto.
pub trait FromBits: ToBits {
    /// Converts a right-aligned bit pattern. Bits at or above
    /// [`BITS`](ToBits::BITS) are ignored.
    fn from_bits(bits: u64) -> Self;
}

/// A value that only some bit patterns map onto, such as an enum with gaps.
pub trait TryFromBits: ToBits + Sized {
    /// Converts a right-aligned bit pattern, returning `None` if no value has
    /// that pattern.
    fn try_from_bits(bits: u64) -> Option<Self>;
}

impl ToBits for bool {
    const BITS: u32 = 1;

    #[inline(always)]
    fn to_bits(self) -> u64 {
        self as u64
    }
}

impl FromBits for bool {
    #[inline(always)]
    fn from_bits(bits: u64) -> Self {
        bits & 1 != 0
    }
}

macro_rules! impl_bits_for_primitive {
    ($($primitive:ident),*) => {$(
        impl ToBits for $primitive {
            const BITS: u32 = $primitive::BITS;

            #[inline(always)]
            fn to_bits(self) -> u64 {
                self as u64
            }
        }

        impl FromBits for $primitive {
            #[inline(always)]
            fn from_bits(bits: u64) -> Self {
                bits as $primitive
            }
        }
    )*};
}

impl_bits_for_primitive!(u8, u16, u32, u64);

/// Maps a field width onto its natural value type through [`Natural`].
///
/// # Example
///
/// ```
/// use regifc::{uint::U10, Natural, Width};
///
/// let value: <Width<10> as Natural>::Value = U10::new_masked(0x145);
/// assert_eq!(u16::from(value), 0x145);
/// ```
pub enum Width<const N: u32> {}

/// The type a field of a given [`Width`] reads as.
///
/// | width | value type |
/// |-------|------------|
/// | 1 | [`bool`] |
/// | 8, 16, 32, 64 | [`u8`], [`u16`], [`u32`], [`u64`] |
/// | any other | the narrow integer `UN`, e.g. [`U10`](crate::uint::U10) |
pub trait Natural {
    /// The value type.
    type Value: FromBits + Debug;
}

impl Natural for Width<1> {
    type Value = bool;
}

macro_rules! impl_natural {
    ($($bits:literal => $value:ty),* $(,)?) => {$(
        impl Natural for Width<$bits> {
            type Value = $value;
        }
    )*};
}

impl_natural!(8 => u8, 16 => u16, 32 => u32, 64 => u64);

seq!(N in 2..8 { paste! { impl_natural!(N => [<U N>]); } });
seq!(N in 9..16 { paste! { impl_natural!(N => [<U N>]); } });
seq!(N in 17..32 { paste! { impl_natural!(N => [<U N>]); } });
seq!(N in 33..64 { paste! { impl_natural!(N => [<U N>]); } });

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_carrier_round_trip() {
        assert_eq!(u8::from_u64(0x1ff), 0xff);
        assert_eq!(u16::from_u64(0x1_2345), 0x2345);
        assert_eq!(0x8000_0000u32.to_u64(), 0x8000_0000);
        assert_eq!(u64::from_u64(u64::MAX), u64::MAX);
        assert_eq!(<u32 as Word>::BITS, 32);
    }

    #[test]
    fn bool_bits() {
        assert_eq!(true.to_bits(), 1);
        assert_eq!(false.to_bits(), 0);
        assert!(bool::from_bits(0b11));
        assert!(!bool::from_bits(0b10));
    }

    #[test]
    fn natural_widths() {
        let _: bool = <Width<1> as Natural>::Value::from_bits(1);
        let _: u8 = <Width<8> as Natural>::Value::from_bits(1);
        let _: U10 = <Width<10> as Natural>::Value::from_bits(1);
        let _: U63 = <Width<63> as Natural>::Value::from_bits(1);
        let _: u64 = <Width<64> as Natural>::Value::from_bits(1);
    }
}
