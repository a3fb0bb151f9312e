use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;

use vcell::VolatileCell;

use crate::access::{ReadWrite, Readable, Writable};
use crate::{Cached, Cell, StableField, VolatileField, Word};

/// A hardware register holding one `T`.
///
/// `A` is the [access mode](crate::access) and `C` is the storage
/// [`Cell`]. The register adds nothing to its cell, so a `Register<u32>` is
/// exactly four bytes and can overlay a device's register block.
///
/// A register is `!Sync`. Sharing one between threads or with an interrupt
/// handler needs the caller's own exclusion, as does any read-modify-write
/// that must be atomic with respect to other contexts.
#[repr(transparent)]
pub struct Register<T, A = ReadWrite, C = VolatileCell<T>> {
    cell: C,
    _marker: PhantomData<(T, A)>,
}

impl<T: Word, A> Register<T, A, VolatileCell<T>> {
    /// Creates a register in ordinary memory holding `value`.
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self::from_cell(VolatileCell::new(value))
    }

    /// Overlays a register on the memory at `address`.
    ///
    /// # Safety
    ///
    /// `address` must be suitably aligned for `T` and remain a valid register
    /// of type `T` for `'a`.
    #[inline(always)]
    pub unsafe fn from_address<'a>(address: usize) -> &'a Self {
        &*(address as *const Self)
    }
}

impl<T: Word, A, C: Cell<T>> Register<T, A, C> {
    /// Wraps a storage cell.
    #[inline(always)]
    pub const fn from_cell(cell: C) -> Self {
        Self {
            cell,
            _marker: PhantomData,
        }
    }

    /// Returns the storage cell.
    #[inline(always)]
    pub fn cell(&self) -> &C {
        &self.cell
    }

    /// Returns a handle to bits `OFFSET..OFFSET + WIDTH` that accesses the
    /// hardware on every operation.
    #[inline(always)]
    pub fn field<const OFFSET: u32, const WIDTH: u32>(
        &self,
    ) -> VolatileField<'_, T, A, C, OFFSET, WIDTH> {
        VolatileField::new(self)
    }

    #[inline(always)]
    pub(crate) fn load(&self) -> T {
        self.cell.load()
    }

    #[inline(always)]
    pub(crate) fn store(&self, value: T) {
        self.cell.store(value)
    }
}

impl<T: Word, A: Readable, C: Cell<T>> Register<T, A, C> {
    /// Loads the register once and returns a snapshot of its value.
    ///
    /// Edits to the snapshot reach the hardware only when it is written back.
    /// Hardware changes between this load and that write are overwritten by
    /// the snapshot's value; keeping the window short is up to the caller.
    #[inline(always)]
    pub fn read(&self) -> Snapshot<'_, T, A, C> {
        Snapshot {
            register: self,
            value: self.load(),
        }
    }

    /// Loads the whole register.
    #[inline(always)]
    pub fn read_raw(&self) -> T {
        self.load()
    }
}

impl<T: Word, A: Writable, C: Cell<T>> Register<T, A, C> {
    /// Returns a snapshot holding `value` without loading the register.
    #[inline(always)]
    pub fn init(&self, value: T) -> Snapshot<'_, T, A, C> {
        Snapshot {
            register: self,
            value,
        }
    }

    /// Stores a snapshot's value with a single store.
    ///
    /// The value is stored even if it equals what the snapshot was read
    /// from. See [`read`](Self::read) about stale snapshots.
    #[inline(always)]
    pub fn write(&self, snapshot: Snapshot<'_, T, A, C>) {
        self.store(snapshot.value)
    }

    /// Stores `value`, bypassing the field layer.
    #[inline(always)]
    pub fn write_raw(&self, value: T) {
        self.store(value)
    }

    /// Stores zero.
    #[inline(always)]
    pub fn clear(&self) {
        self.store(T::zero())
    }
}

/// A register value loaded once and edited in place.
///
/// A snapshot cannot be cloned, so each one is written at most once. Dropping
/// it without calling [`write`](Self::write) leaves the hardware untouched.
#[must_use = "a snapshot has no effect until it is written"]
pub struct Snapshot<'r, T, A = ReadWrite, C = VolatileCell<T>> {
    register: &'r Register<T, A, C>,
    value: T,
}

impl<'r, T: Word, A, C: Cell<T>> Snapshot<'r, T, A, C> {
    /// Returns the cached value.
    #[inline(always)]
    pub fn value(&self) -> T {
        self.value
    }

    /// Returns the register this snapshot belongs to.
    #[inline(always)]
    pub fn register(&self) -> &'r Register<T, A, C> {
        self.register
    }

    /// Returns a handle to bits `OFFSET..OFFSET + WIDTH` of the cached value.
    #[inline(always)]
    pub fn field<const OFFSET: u32, const WIDTH: u32>(
        &mut self,
    ) -> StableField<'_, Self, OFFSET, WIDTH> {
        StableField::new(self)
    }

    /// Replaces bits `OFFSET..OFFSET + WIDTH` of the cached value with the
    /// low bits of `value` and returns the snapshot.
    #[inline(always)]
    pub fn with_field<const OFFSET: u32, const WIDTH: u32>(mut self, value: T) -> Self {
        self.field::<OFFSET, WIDTH>().modify(value);
        self
    }
}

impl<'r, T: Word, A: Writable, C: Cell<T>> Snapshot<'r, T, A, C> {
    /// Stores the cached value with a single store.
    #[inline(always)]
    pub fn write(self) {
        self.register.store(self.value)
    }
}

impl<'r, T: Word, A, C: Cell<T>> Cached for Snapshot<'r, T, A, C> {
    type Word = T;

    #[inline(always)]
    fn cached(&self) -> T {
        self.value
    }

    #[inline(always)]
    fn cached_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<'r, T: Word, A, C> Debug for Snapshot<'r, T, A, C> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("value", &format_args!("{:#x}", self.value))
            .finish()
    }
}
