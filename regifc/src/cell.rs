//! Storage behind a [`Register`](crate::Register).

use vcell::VolatileCell;

/// A storage cell that holds one register value.
///
/// Production registers use [`VolatileCell`], so every `load` and `store` is
/// a single volatile access that the compiler can neither elide nor merge.
/// Other implementations stand in for hardware in tests:
///
/// ```
/// use std::cell::Cell as StdCell;
///
/// use regifc::{access::ReadWrite, Cell, Register};
///
/// #[derive(Default)]
/// struct Counting {
///     value: StdCell<u32>,
///     stores: StdCell<usize>,
/// }
///
/// impl Cell<u32> for Counting {
///     fn load(&self) -> u32 {
///         self.value.get()
///     }
///
///     fn store(&self, value: u32) {
///         self.stores.set(self.stores.get() + 1);
///         self.value.set(value);
///     }
/// }
///
/// let register = Register::<u32, ReadWrite, _>::from_cell(Counting::default());
/// register.read().with_field::<16, 8>(0x12).with_field::<31, 1>(1).write();
/// assert_eq!(register.read_raw(), 0x8012_0000);
/// assert_eq!(register.cell().stores.get(), 1);
/// ```
pub trait Cell<T> {
    /// Loads the current value.
    fn load(&self) -> T;

    /// Stores a new value.
    fn store(&self, value: T);
}

impl<T: Copy> Cell<T> for VolatileCell<T> {
    #[inline(always)]
    fn load(&self) -> T {
        self.get()
    }

    #[inline(always)]
    fn store(&self, value: T) {
        self.set(value)
    }
}
