//! Bit-field insertion.
//!
//! ARM cores with Thumb-2 have `bfi`, which replaces a bit range of one
//! register with the low bits of another in a single instruction. Everything
//! else gets the portable clear-then-or form, which gives the same result.

use crate::{Field, Word};

/// Returns `raw` with bits `OFFSET..OFFSET + WIDTH` replaced by the low
/// `WIDTH` bits of `value`.
#[inline(always)]
pub(crate) fn insert<T: Word, const OFFSET: u32, const WIDTH: u32>(raw: T, value: T) -> T {
    let mask = Field::<T, OFFSET, WIDTH>::MASK;
    InsertBits::insert_bits::<OFFSET, WIDTH>(raw, value, mask)
}

/// Per-word insertion, so that only 32-bit words can reach `bfi`.
///
/// Callers guarantee that `mask` is the mask of `OFFSET..OFFSET + WIDTH` and
/// that the range lies within the word.
pub trait InsertBits: Sized {
    /// Returns `self` with the masked bits replaced by `value << OFFSET`.
    fn insert_bits<const OFFSET: u32, const WIDTH: u32>(self, value: Self, mask: u64) -> Self;
}

macro_rules! impl_masked {
    ($($primitive:ident),*) => {$(
        impl InsertBits for $primitive {
            #[inline(always)]
            fn insert_bits<const OFFSET: u32, const WIDTH: u32>(
                self,
                value: Self,
                mask: u64,
            ) -> Self {
                masked::<OFFSET>(self as u64, value as u64, mask) as $primitive
            }
        }
    )*};
}

impl_masked!(u8, u16, u64);

#[cfg(not(all(
    target_arch = "arm",
    any(target_feature = "v6t2", target_feature = "thumb2")
)))]
impl_masked!(u32);

#[cfg(all(
    target_arch = "arm",
    any(target_feature = "v6t2", target_feature = "thumb2")
))]
impl InsertBits for u32 {
    #[inline(always)]
    fn insert_bits<const OFFSET: u32, const WIDTH: u32>(self, value: Self, _mask: u64) -> Self {
        let mut result = self;
        // SAFETY: `bfi` only reads `value` and rewrites `result`.
        unsafe {
            core::arch::asm!(
                "bfi {result}, {value}, #{lsb}, #{width}",
                result = inout(reg) result,
                value = in(reg) value,
                lsb = const OFFSET,
                width = const WIDTH,
                options(pure, nomem, nostack, preserves_flags),
            );
        }
        result
    }
}

#[inline(always)]
fn masked<const OFFSET: u32>(raw: u64, value: u64, mask: u64) -> u64 {
    (raw & !mask) | ((value << OFFSET) & mask)
}
