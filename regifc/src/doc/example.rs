//! Example register definitions for a small I2C controller, and the items
//! they generate.
//!
//! ```
//! # use regifc::doc::example::*;
//! fn start_write(i2c: &I2c, address: u16, length: u8) {
//!     i2c.cr.pe().set();
//!
//!     let mut cr = i2c.cr.read();
//!     cr.sadd().modify(address.into());
//!     cr.nbytes().modify(length.into());
//!     cr.rd_wrn().clr();
//!     cr.write();
//! }
//!
//! let i2c = I2c::new();
//! start_write(&i2c, 0x145, 0x12);
//! assert_eq!(i2c.cr.read_raw(), 0x8012_0145);
//! assert_eq!(i2c.cr.nbytes().get(), 0x12);
//! ```

use crate::{peripheral, register};

register! {
    /// Control register.
    ///
    /// # Declaration
    ///
    /// ```
    /// regifc::register! {
    ///     /// Control register.
    ///     #[reset(0x0000_0000)]
    ///     pub struct Cr: u32 {
    ///         /// Target address.
    ///         0 => pub sadd: 10,
    ///         /// Transfer direction: set to read, clear to write.
    ///         10 => pub rd_wrn: 1,
    ///         11 => _: 5,
    ///         /// Number of bytes to transfer.
    ///         16 => pub nbytes: 8,
    ///         24 => _: 7,
    ///         /// Peripheral enable.
    ///         31 => pub pe: 1,
    ///     }
    /// }
    /// ```
    #[reset(0x0000_0000)]
    pub struct Cr: u32 {
        /// Target address.
        0 => pub sadd: 10,
        /// Transfer direction: set to read, clear to write.
        10 => pub rd_wrn: 1,
        11 => _: 5,
        /// Number of bytes to transfer.
        16 => pub nbytes: 8,
        24 => _: 7,
        /// Peripheral enable.
        31 => pub pe: 1,
    }

    /// Interrupt and status register.
    #[access(ro)]
    #[reset(0x0000_0001)]
    pub struct Isr: u32 {
        /// Transmit data register empty.
        0 => pub txe: 1,
        /// Receive data register not empty.
        2 => pub rxne: 1,
        /// Bus busy.
        15 => pub busy: 1,
        /// Address match code.
        17 => pub addcode: 7,
    }

    /// Transmit data register.
    #[access(wo)]
    pub struct Txdr: u32 {
        /// Byte to transmit.
        0 => pub txdata: 8,
    }
}

peripheral! {
    /// An I2C controller's register block.
    pub struct I2c: 0x2c {
        /// Control.
        0x00 => pub cr: Cr,
        /// Interrupt and status.
        0x18 => pub isr: Isr,
        /// Transmit data.
        0x28 => pub txdr: Txdr,
    }
}

impl I2c {
    /// Creates a block in ordinary memory with every register at its reset
    /// value.
    pub const fn new() -> Self {
        Self {
            cr: Cr::new(Cr::RESET),
            _reserved0: [0; 0x14],
            isr: Isr::new(Isr::RESET),
            _reserved1: [0; 0xc],
            txdr: Txdr::new(0),
            _reserved2: [],
        }
    }
}
