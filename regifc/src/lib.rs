#![cfg_attr(not(test), no_std)]
#![cfg_attr(feature = "_nightly", feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Zero-cost, compile-time checked access to the bit-fields of memory-mapped
//! registers.
//!
//! A field is a contiguous run of bits in a register, named by its offset and
//! width. Both are const generic parameters, so every mask is a constant and
//! every field operation compiles to the same loads, stores and mask
//! arithmetic as hand-written code. Fields come in two flavors:
//!
//! - A [`VolatileField`] borrows a live [`Register`]. Each operation goes to
//!   the hardware.
//! - A [`StableField`] borrows a [`Snapshot`], a value read from the register
//!   once. Edits stay in the snapshot until it is written back with a single
//!   store.
//!
//! ```
//! use regifc::{uint::U10, Register};
//!
//! let cr = Register::<u32>::new(0);
//!
//! // One load and one store.
//! cr.field::<31, 1>().set();
//! assert_eq!(cr.read_raw(), 0x8000_0000);
//!
//! // One load, three edits, one store.
//! cr.read()
//!     .with_field::<0, 10>(0x145)
//!     .with_field::<16, 8>(0x12)
//!     .with_field::<10, 1>(0)
//!     .write();
//! assert_eq!(cr.read_raw(), 0x8012_0145);
//! assert_eq!(cr.field::<16, 8>().get(), 0x12);
//! assert_eq!(cr.field::<0, 10>().get(), U10::new_masked(0x145));
//! ```
//!
//! Device code names its registers and fields with [`register!`] and lays them
//! out in blocks with [`peripheral!`]. See [`doc::example`] for what these
//! generate.
//!
//! # Compile-time checks
//!
//! Fields must be at least one bit wide and lie within their register. A field
//! reads as its [natural type](Natural), which converts only into types at
//! least as wide, so a read is never silently truncated. Values written with
//! [`rmw_value`](VolatileField::rmw_value) or
//! [`modify_value`](StableField::modify_value) must be no wider than the field.
//! Snapshots cannot be copied. Read-only registers cannot be stored and
//! write-only registers cannot be loaded; see [`access`].

extern crate self as regifc;

pub mod access;
mod cell;
pub mod doc;
mod field;
mod insert;
pub mod prelude;
mod register;
mod stable;
pub mod uint;
mod value;
mod volatile;

pub use cell::Cell;
pub use field::{mask, Field};
pub use register::{Register, Snapshot};
pub use stable::{Cached, StableField};
pub use uint::ConversionError;
pub use value::{FromBits, Natural, ToBits, TryFromBits, Width, Word};
pub use volatile::VolatileField;

/// Implements [`ToBits`] and [`TryFromBits`] for a fieldless enum so that it
/// can be written into and read from fields.
///
/// [`ToBits::BITS`] is the fewest bits that hold the largest discriminant.
/// Discriminants must be non-negative integer literals, or implicit. The enum
/// must also implement [`Copy`].
///
/// ```
/// use regifc::{FieldEnum, Register, ToBits};
///
/// #[derive(Clone, Copy, Debug, PartialEq, FieldEnum)]
/// enum Speed {
///     Standard,
///     Fast,
///     FastPlus = 3,
/// }
///
/// assert_eq!(Speed::BITS, 2);
///
/// let timing = Register::<u32>::new(0);
/// timing.field::<28, 2>().rmw_value(Speed::FastPlus);
/// assert_eq!(timing.read_raw(), 0x3000_0000);
/// assert_eq!(timing.field::<28, 2>().get_as::<Speed>(), Ok(Speed::FastPlus));
/// timing.field::<28, 2>().rmw(2);
/// assert!(timing.field::<28, 2>().get_as::<Speed>().is_err());
/// ```
///
/// An enum does not fit a field narrower than itself:
///
/// ```compile_fail
/// use regifc::{FieldEnum, Register};
///
/// #[derive(Clone, Copy, FieldEnum)]
/// enum Speed {
///     Standard,
///     Fast,
///     FastPlus = 3,
/// }
///
/// Register::<u32>::new(0).field::<28, 1>().rmw_value(Speed::Fast);
/// ```
pub use regifc_macros::FieldEnum;

#[doc(hidden)]
pub mod __private {
    pub use core;
    pub use memoffset;
    pub use regifc_macros::{peripheral, register};
    pub use vcell::VolatileCell;
}

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Defines registers with named fields.
///
/// Each definition names a register type, its value type and its fields. A
/// field is written `OFFSET => VISIBILITY NAME: WIDTH`; a field named `_` is
/// reserved and gets no accessors. Offsets and widths are in bits. Fields must
/// not overlap and must lie within the register.
///
/// ```
/// regifc::register! {
///     /// Control register.
///     #[reset(0x0000_0000)]
///     pub struct Cr: u32 {
///         /// Target address.
///         0 => pub sadd: 10,
///         /// Transfer direction.
///         10 => pub rd_wrn: 1,
///         /// Byte count.
///         16 => pub nbytes: 8,
///         24 => _: 7,
///         /// Peripheral enable.
///         31 => pub pe: 1,
///     }
/// }
///
/// let cr = Cr::new(0);
/// cr.pe().set();
/// cr.read().with_sadd(0x145).with_nbytes(0x12).write();
/// assert_eq!(cr.read_raw(), 0x8012_0145);
/// ```
///
/// `#[access(ro)]` and `#[access(wo)]` declare read-only and write-only
/// registers; the default is `#[access(rw)]`. `#[reset(VALUE)]` adds a
/// `RESET` constant and a `reset` method that starts a snapshot from it.
///
/// The definition generates:
///
/// - the register type, a `#[repr(transparent)]` wrapper that dereferences to
///   [`Register`] and has a method per field returning a [`VolatileField`];
/// - a snapshot type named after it with a `Snapshot` suffix, which has a
///   method per field returning a [`StableField`] and a `with_` method per
///   field that edits the snapshot and returns it.
///
/// See [`doc::example`] for a complete expansion.
///
/// ```compile_fail
/// regifc::register! {
///     struct Overlap: u32 {
///         0 => a: 10,
///         8 => b: 4,
///     }
/// }
/// ```
#[macro_export]
macro_rules! register {
    ($($tt:tt)*) => {
        $crate::__private::register! { ($crate, $($tt)*) }
    };
}

/// Defines a register block: a `#[repr(C)]` struct of registers at fixed byte
/// offsets.
///
/// Each entry is written `OFFSET => VISIBILITY NAME: TYPE`, in increasing
/// offset order. The gaps between entries are filled with reserved bytes. The
/// declared block size, every offset and every register size are checked at
/// compile time.
///
/// ```
/// regifc::register! {
///     /// Control register.
///     pub struct Cr: u32 {
///         31 => pub pe: 1,
///     }
///
///     /// Status register.
///     #[access(ro)]
///     pub struct Isr: u32 {
///         0 => pub txe: 1,
///     }
/// }
///
/// regifc::peripheral! {
///     /// A register block.
///     pub struct Block: 0x10 {
///         0x0 => pub cr: Cr,
///         0x8 => pub isr: Isr,
///     }
/// }
///
/// assert_eq!(core::mem::size_of::<Block>(), 0x10);
/// ```
///
/// ```compile_fail
/// regifc::register! {
///     pub struct Cr: u32 {
///         31 => pub pe: 1,
///     }
/// }
///
/// regifc::peripheral! {
///     pub struct TooSmall: 0x4 {
///         0x0 => pub cr: Cr,
///         0x4 => pub other: Cr,
///     }
/// }
/// ```
#[macro_export]
macro_rules! peripheral {
    ($($tt:tt)*) => {
        $crate::__private::peripheral! { ($crate, $($tt)*) }
    };
}

/// ```compile_fail
/// let cr = regifc::Register::<u32>::new(0);
/// let sadd: u8 = cr.field::<0, 10>().get().into();
/// ```
///
/// ```compile_fail
/// let cr = regifc::Register::<u32>::new(0);
/// let snapshot = cr.read();
/// let copy = snapshot.clone();
/// ```
///
/// ```compile_fail
/// let cr = regifc::Register::<u32>::new(0);
/// let snapshot = cr.read();
/// snapshot.write();
/// snapshot.write();
/// ```
///
/// ```compile_fail
/// let cr = regifc::Register::<u32>::new(0);
/// cr.field::<0, 0>().set();
/// ```
///
/// ```compile_fail
/// let cr = regifc::Register::<u32>::new(0);
/// cr.read().with_field::<30, 4>(1).write();
/// ```
///
/// ```compile_fail
/// use regifc::{access::WriteOnly, Register};
///
/// let command = Register::<u32, WriteOnly>::new(0);
/// let _ = command.read();
/// ```
///
/// ```compile_fail
/// regifc::register! {
///     pub struct Ctl: u32 {
///         0 => pub en: 1,
///         4 => pub clear: 4,
///     }
/// }
/// ```
///
/// ```compile_fail
/// use regifc::{FieldEnum, Register};
///
/// #[derive(Clone, Copy, FieldEnum)]
/// enum Speed {
///     Standard,
///     Fast,
///     FastPlus = 3,
/// }
///
/// let cr = Register::<u32>::new(0);
/// let mut snapshot = cr.read();
/// let _ = snapshot.field::<28, 1>().get_as::<Speed>();
/// ```
#[allow(dead_code)]
mod compile_tests {}

#[test]
fn trybuild_tests() {
    let t = trybuild::TestCases::new();
    t.pass("tests_pass/*.rs");
}
