use core::marker::PhantomData;

use snafu::OptionExt;

use crate::uint::{ConversionError, UnknownVariantSnafu};
use crate::{insert, FromBits, Natural, ToBits, TryFromBits, Width, Word};

/// Returns the mask of `width` bits starting at bit `offset` of a 64-bit
/// carrier.
///
/// The range must satisfy `offset + width <= 64`. A range ending at bit 64
/// sets every bit above `offset`, and an empty range gives zero.
///
/// # Example
///
/// ```
/// assert_eq!(regifc::mask(16, 8), 0x00ff_0000);
/// assert_eq!(regifc::mask(31, 1), 0x8000_0000);
/// assert_eq!(regifc::mask(0, 64), u64::MAX);
/// assert_eq!(regifc::mask(64, 0), 0);
/// ```
#[inline(always)]
pub const fn mask(offset: u32, width: u32) -> u64 {
    below(offset + width) & !below(offset)
}

/// Returns the bits below bit `end`.
#[inline(always)]
const fn below(end: u32) -> u64 {
    if end >= u64::BITS {
        u64::MAX
    } else {
        (1 << end) - 1
    }
}

/// A field descriptor: `WIDTH` contiguous bits starting at bit `OFFSET` of a
/// register whose value type is `T`.
///
/// A descriptor is never instantiated. It carries the field's mask and the
/// pure mask and shift arithmetic that [`VolatileField`](crate::VolatileField)
/// and [`StableField`](crate::StableField) share. Naming an invalid field is a
/// compile error once any of its operations is used:
///
/// ```compile_fail
/// // Zero width.
/// assert_ne!(regifc::Field::<u32, 4, 0>::MASK, 0);
/// ```
///
/// ```compile_fail
/// // Bits 28 through 35 do not fit in a 32-bit register.
/// assert_ne!(regifc::Field::<u32, 28, 8>::MASK, 0);
/// ```
pub struct Field<T, const OFFSET: u32, const WIDTH: u32> {
    _word: PhantomData<T>,
}

impl<T: Word, const OFFSET: u32, const WIDTH: u32> Field<T, OFFSET, WIDTH> {
    /// The bits of the register that belong to this field.
    pub const MASK: u64 = {
        assert!(WIDTH > 0, "a field must be at least one bit wide");
        assert!(
            WIDTH <= T::BITS && OFFSET <= T::BITS - WIDTH,
            "a field must lie within its register"
        );
        mask(OFFSET, WIDTH)
    };

    /// Returns the field's bits of `raw`, right-aligned.
    #[inline(always)]
    pub fn extract(raw: T) -> T {
        T::from_u64((raw.to_u64() & Self::MASK) >> OFFSET)
    }

    /// Returns the field's value in `raw`.
    #[inline(always)]
    pub fn get(raw: T) -> <Width<WIDTH> as Natural>::Value
    where
        Width<WIDTH>: Natural,
    {
        FromBits::from_bits((raw.to_u64() & Self::MASK) >> OFFSET)
    }

    /// Decodes the field's bits of `raw` as a `V`, failing if no `V` has
    /// that bit pattern.
    ///
    /// `V` must be exactly as wide as the field, which is checked at compile
    /// time.
    #[inline(always)]
    pub fn get_as<V: TryFromBits>(raw: T) -> Result<V, ConversionError> {
        let () = Exact::<V, WIDTH>::CHECK;
        let bits = Self::extract(raw).to_u64();
        V::try_from_bits(bits).context(UnknownVariantSnafu { bits })
    }

    /// Returns `raw` with every bit of the field set.
    #[inline(always)]
    pub fn set(raw: T) -> T {
        T::from_u64(raw.to_u64() | Self::MASK)
    }

    /// Returns `raw` with every bit of the field cleared.
    #[inline(always)]
    pub fn clr(raw: T) -> T {
        T::from_u64(raw.to_u64() & !Self::MASK)
    }

    /// Returns `raw` with the field replaced by the low `WIDTH` bits of
    /// `value`. Bits of `value` above the field width are discarded.
    #[inline(always)]
    pub fn insert(raw: T, value: T) -> T {
        insert::insert::<T, OFFSET, WIDTH>(raw, value)
    }

    /// Returns `raw` with the field replaced by `value`.
    ///
    /// The value's type must be no wider than the field, which is checked at
    /// compile time.
    #[inline(always)]
    pub fn insert_value<V: ToBits>(raw: T, value: V) -> T {
        let () = Fits::<V, WIDTH>::CHECK;
        insert::insert::<T, OFFSET, WIDTH>(raw, T::from_u64(value.to_bits()))
    }
}

struct Fits<V, const WIDTH: u32>(PhantomData<V>);

impl<V: ToBits, const WIDTH: u32> Fits<V, WIDTH> {
    const CHECK: () = assert!(V::BITS <= WIDTH, "the value type is wider than the field");
}

struct Exact<V, const WIDTH: u32>(PhantomData<V>);

impl<V: ToBits, const WIDTH: u32> Exact<V, WIDTH> {
    const CHECK: () = assert!(V::BITS == WIDTH, "the value type is not as wide as the field");
}
