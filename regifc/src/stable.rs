use crate::uint::ConversionError;
use crate::{Field, Natural, ToBits, TryFromBits, Width, Word};

/// A snapshot: an owned copy of a register value that fields can edit before
/// it is written back.
///
/// Implemented by [`Snapshot`](crate::Snapshot) and by the named snapshots
/// that [`register!`](crate::register) generates.
pub trait Cached {
    /// The register's value type.
    type Word: Word;

    /// Returns the cached value.
    fn cached(&self) -> Self::Word;

    /// Returns the cached value for editing.
    fn cached_mut(&mut self) -> &mut Self::Word;
}

/// A handle to bits `OFFSET..OFFSET + WIDTH` of a snapshot's cached value.
///
/// Operations never touch the hardware. Mutators consume the handle and
/// return the snapshot so that edits chain:
///
/// ```
/// use regifc::Register;
///
/// let register = Register::<u32>::new(0x8000_0000);
/// let mut snapshot = register.read();
/// snapshot
///     .field::<0, 10>()
///     .modify(0x145)
///     .field::<16, 8>()
///     .modify(0x12)
///     .field::<10, 1>()
///     .clr();
/// assert_eq!(snapshot.value(), 0x8012_0145);
/// snapshot.write();
/// ```
#[must_use = "a field handle does nothing until one of its methods is called"]
pub struct StableField<'s, S, const OFFSET: u32, const WIDTH: u32> {
    snapshot: &'s mut S,
}

impl<'s, S: Cached, const OFFSET: u32, const WIDTH: u32> StableField<'s, S, OFFSET, WIDTH> {
    /// Creates a handle to bits `OFFSET..OFFSET + WIDTH` of `snapshot`.
    #[inline(always)]
    pub fn new(snapshot: &'s mut S) -> Self {
        let _mask = Field::<S::Word, OFFSET, WIDTH>::MASK;
        Self { snapshot }
    }

    /// Returns the field's value.
    #[inline(always)]
    pub fn get(&self) -> <Width<WIDTH> as Natural>::Value
    where
        Width<WIDTH>: Natural,
    {
        Field::<S::Word, OFFSET, WIDTH>::get(self.snapshot.cached())
    }

    /// Returns the field's value as a `V`, failing if no `V` has the field's
    /// bit pattern. `V` must be exactly as wide as the field.
    #[inline(always)]
    pub fn get_as<V: TryFromBits>(&self) -> Result<V, ConversionError> {
        Field::<S::Word, OFFSET, WIDTH>::get_as(self.snapshot.cached())
    }

    /// Sets every bit of the field.
    #[inline(always)]
    pub fn set(self) -> &'s mut S {
        let value = self.snapshot.cached_mut();
        *value = Field::<S::Word, OFFSET, WIDTH>::set(*value);
        self.snapshot
    }

    /// Clears every bit of the field.
    #[inline(always)]
    pub fn clr(self) -> &'s mut S {
        let value = self.snapshot.cached_mut();
        *value = Field::<S::Word, OFFSET, WIDTH>::clr(*value);
        self.snapshot
    }

    /// Replaces the field with the low `WIDTH` bits of `value`.
    #[inline(always)]
    pub fn modify(self, value: S::Word) -> &'s mut S {
        let cached = self.snapshot.cached_mut();
        *cached = Field::<S::Word, OFFSET, WIDTH>::insert(*cached, value);
        self.snapshot
    }

    /// Replaces the field with `value`, whose type must be no wider than the
    /// field.
    #[inline(always)]
    pub fn modify_value<V: ToBits>(self, value: V) -> &'s mut S {
        let cached = self.snapshot.cached_mut();
        *cached = Field::<S::Word, OFFSET, WIDTH>::insert_value(*cached, value);
        self.snapshot
    }
}

impl<'s, S: Cached, const OFFSET: u32> StableField<'s, S, OFFSET, 1> {
    /// Returns whether the bit is set.
    #[inline(always)]
    pub fn is_set(&self) -> bool {
        Field::<S::Word, OFFSET, 1>::get(self.snapshot.cached())
    }
}
