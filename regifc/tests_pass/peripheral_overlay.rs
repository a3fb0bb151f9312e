use regifc::prelude::*;

register! {
    /// Data register.
    pub struct Dr: u8 {
        0 => pub data: 8,
    }

    /// Status register.
    #[access(ro)]
    pub struct Sr: u32 {
        0 => pub ready: 1,
        4 => pub level: 12,
    }
}

peripheral! {
    /// A small block with a leading gap.
    pub struct Uart: 0x10 {
        0x4 => pub dr: Dr,
        0x8 => pub sr: Sr,
    }
}

fn main() {
    let mut memory = [0u32; 4];
    memory[2] = 0x0000_0401;

    // SAFETY: `memory` is aligned, large enough and outlives `uart`.
    let uart = unsafe { Uart::from_address(memory.as_mut_ptr() as usize) };
    assert!(uart.sr.ready().is_set());
    assert_eq!(uart.sr.level().get(), U12::new_masked(0x40));
    uart.dr.data().rmw(0x7f);
    assert_eq!(uart.dr.read_raw(), 0x7f);
    assert_eq!(core::mem::size_of::<Uart>(), 0x10);
}
