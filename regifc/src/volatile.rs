use crate::access::{Readable, Writable};
use crate::uint::ConversionError;
use crate::{Cell, Field, Natural, Register, ToBits, TryFromBits, Width, Word};

/// A handle to bits `OFFSET..OFFSET + WIDTH` of a live register.
///
/// Every operation goes to the hardware: a read is one load and each mutator
/// is one load followed by one store. Two mutators in a row are two separate
/// read-modify-write sequences; batch edits through a
/// [`Snapshot`](crate::Snapshot) instead.
///
/// ```
/// use regifc::{uint::U10, Register};
///
/// let cr = Register::<u32>::new(0);
/// cr.field::<31, 1>().set();
/// cr.field::<0, 10>().rmw(0x145);
/// assert_eq!(cr.read_raw(), 0x8000_0145);
/// assert_eq!(cr.field::<0, 10>().get(), U10::new_masked(0x145));
/// assert!(cr.field::<31, 1>().is_set());
/// ```
///
/// A field that is one bit wide reads as `bool`, and only such a field has
/// [`is_set`](Self::is_set):
///
/// ```compile_fail
/// let cr = regifc::Register::<u32>::new(0);
/// let enabled: bool = cr.field::<16, 8>().get();
/// ```
///
/// ```compile_fail
/// let cr = regifc::Register::<u32>::new(0);
/// let enabled = cr.field::<16, 8>().is_set();
/// ```
#[must_use = "a field handle does nothing until one of its methods is called"]
pub struct VolatileField<'r, T, A, C, const OFFSET: u32, const WIDTH: u32> {
    register: &'r Register<T, A, C>,
}

impl<'r, T: Word, A, C: Cell<T>, const OFFSET: u32, const WIDTH: u32>
    VolatileField<'r, T, A, C, OFFSET, WIDTH>
{
    #[inline(always)]
    pub(crate) fn new(register: &'r Register<T, A, C>) -> Self {
        let _mask = Field::<T, OFFSET, WIDTH>::MASK;
        Self { register }
    }

    /// Returns the field's mask within the register.
    #[inline(always)]
    pub fn mask(&self) -> T {
        T::from_u64(Field::<T, OFFSET, WIDTH>::MASK)
    }
}

impl<'r, T: Word, A: Readable, C: Cell<T>, const OFFSET: u32, const WIDTH: u32>
    VolatileField<'r, T, A, C, OFFSET, WIDTH>
{
    /// Loads the register and returns the field's value.
    #[inline(always)]
    pub fn get(&self) -> <Width<WIDTH> as Natural>::Value
    where
        Width<WIDTH>: Natural,
    {
        Field::<T, OFFSET, WIDTH>::get(self.register.load())
    }

    /// Loads the register and returns the field's value as a `V`, failing if
    /// no `V` has the field's bit pattern.
    ///
    /// `V` must be exactly as wide as the field:
    ///
    /// ```compile_fail
    /// use regifc::{FieldEnum, Register};
    ///
    /// #[derive(Clone, Copy, FieldEnum)]
    /// enum Enable {
    ///     On = 1,
    /// }
    ///
    /// let _ = Register::<u32>::new(0).field::<30, 2>().get_as::<Enable>();
    /// ```
    #[inline(always)]
    pub fn get_as<V: TryFromBits>(&self) -> Result<V, ConversionError> {
        Field::<T, OFFSET, WIDTH>::get_as(self.register.load())
    }
}

impl<'r, T: Word, A: Readable + Writable, C: Cell<T>, const OFFSET: u32, const WIDTH: u32>
    VolatileField<'r, T, A, C, OFFSET, WIDTH>
{
    /// Sets every bit of the field.
    #[inline(always)]
    pub fn set(&self) {
        self.register
            .store(Field::<T, OFFSET, WIDTH>::set(self.register.load()))
    }

    /// Clears every bit of the field.
    #[inline(always)]
    pub fn clr(&self) {
        self.register
            .store(Field::<T, OFFSET, WIDTH>::clr(self.register.load()))
    }

    /// Replaces the field with the low `WIDTH` bits of `value`, leaving every
    /// other bit as loaded.
    #[inline(always)]
    pub fn rmw(&self, value: T) {
        self.register.store(Field::<T, OFFSET, WIDTH>::insert(
            self.register.load(),
            value,
        ))
    }

    /// Replaces the field with `value`, whose type must be no wider than the
    /// field.
    ///
    /// ```compile_fail
    /// let cr = regifc::Register::<u32>::new(0);
    /// cr.field::<0, 4>().rmw_value(0xffu8);
    /// ```
    #[inline(always)]
    pub fn rmw_value<V: ToBits>(&self, value: V) {
        self.register
            .store(Field::<T, OFFSET, WIDTH>::insert_value(
                self.register.load(),
                value,
            ))
    }
}

impl<'r, T: Word, A: Readable, C: Cell<T>, const OFFSET: u32> VolatileField<'r, T, A, C, OFFSET, 1> {
    /// Loads the register and returns whether the bit is set.
    #[inline(always)]
    pub fn is_set(&self) -> bool {
        Field::<T, OFFSET, 1>::get(self.register.load())
    }
}
