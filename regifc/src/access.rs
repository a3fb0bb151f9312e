//! Access modes, after the `read-write`, `read-only` and `write-only` access
//! types of a device's register description.
//!
//! The mode is a type parameter of [`Register`](crate::Register). Operations
//! that load require [`Readable`] and operations that store require
//! [`Writable`], so a read-modify-write needs both:
//!
//! ```compile_fail
//! use regifc::{access::ReadOnly, Register};
//!
//! let status = Register::<u32, ReadOnly>::new(0);
//! status.write_raw(1);
//! ```
//!
//! ```compile_fail
//! use regifc::{access::WriteOnly, Register};
//!
//! let command = Register::<u32, WriteOnly>::new(0);
//! command.field::<0, 1>().set();
//! ```

/// A register access mode.
///
/// This trait is sealed and cannot be implemented outside of this crate.
pub trait Access: crate::sealed::Sealed {}

/// An access mode that permits loads.
pub trait Readable: Access {}

/// An access mode that permits stores.
pub trait Writable: Access {}

/// The register may be loaded and stored.
pub enum ReadWrite {}

/// The register may only be loaded.
pub enum ReadOnly {}

/// The register may only be stored.
pub enum WriteOnly {}

impl crate::sealed::Sealed for ReadWrite {}
impl crate::sealed::Sealed for ReadOnly {}
impl crate::sealed::Sealed for WriteOnly {}

impl Access for ReadWrite {}
impl Access for ReadOnly {}
impl Access for WriteOnly {}

impl Readable for ReadWrite {}
impl Readable for ReadOnly {}

impl Writable for ReadWrite {}
impl Writable for WriteOnly {}
