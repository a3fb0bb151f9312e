//! Convenience re-exports.
//!
//! ```
//! use regifc::prelude::*;
//!
//! register! {
//!     /// Prescaler.
//!     pub struct Presc: u16 {
//!         0 => pub div: 12,
//!     }
//! }
//!
//! let presc = Presc::new(0);
//! presc.div().rmw(0x123);
//! assert_eq!(u16::from(presc.div().get()), 0x123);
//! assert_eq!(presc.div().get(), U12::new_masked(0x123));
//! ```

#[doc(no_inline)]
pub use crate::{
    peripheral, register, Cached, FieldEnum, FromBits, Register, Snapshot, ToBits, TryFromBits,
};

#[doc(no_inline)]
pub use crate::uint::*;
