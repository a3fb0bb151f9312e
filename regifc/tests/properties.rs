#[macro_use]
extern crate quickcheck_macros;

use std::cell::Cell as StdCell;

use regifc::access::ReadWrite;
use regifc::uint::{U10, U27, U40};
use regifc::{mask, Cell, Field, Register};

#[derive(Default)]
struct Counting {
    value: StdCell<u32>,
    stores: StdCell<usize>,
}

impl Cell<u32> for Counting {
    fn load(&self) -> u32 {
        self.value.get()
    }

    fn store(&self, value: u32) {
        self.stores.set(self.stores.get() + 1);
        self.value.set(value);
    }
}

/// Picks a valid `(offset, width)` pair for a 64-bit register.
fn range(offset: u8, width: u8) -> (u32, u32) {
    let offset = u32::from(offset % 64);
    let width = 1 + u32::from(width) % (64 - offset);
    (offset, width)
}

#[quickcheck]
fn mask_is_contiguous(offset: u8, width: u8) -> bool {
    let (offset, width) = range(offset, width);
    let m = mask(offset, width);
    m.count_ones() == width
        && m.trailing_zeros() == offset
        && (m >> offset).count_ones() == (m >> offset).trailing_ones()
}

#[test]
fn mask_matches_descriptors() {
    assert_eq!(Field::<u32, 0, 10>::MASK, mask(0, 10));
    assert_eq!(Field::<u32, 31, 1>::MASK, mask(31, 1));
    assert_eq!(Field::<u64, 0, 64>::MASK, mask(0, 64));
    assert_eq!(Field::<u8, 3, 5>::MASK, mask(3, 5));
}

#[quickcheck]
fn rmw_then_get(initial: u32, value: u32) -> bool {
    let register = Register::<u32>::new(initial);
    register.field::<5, 27>().rmw(value);
    register.field::<5, 27>().get() == U27::new_masked(value)
        && register.read_raw() & 0x1f == initial & 0x1f
}

#[quickcheck]
fn rmw_preserves_other_bits(initial: u64, value: u64) -> bool {
    let register = Register::<u64>::new(initial);
    register.field::<13, 40>().rmw(value);
    let m = Field::<u64, 13, 40>::MASK;
    register.read_raw() & !m == initial & !m
        && register.field::<13, 40>().get() == U40::new_masked(value)
}

#[quickcheck]
fn set_and_clr(initial: u32) -> bool {
    let register = Register::<u32>::new(initial);
    register.field::<16, 8>().set();
    let set = register.read_raw() == initial | 0x00ff_0000;
    register.field::<16, 8>().clr();
    let clr = register.read_raw() == initial & !0x00ff_0000;
    set && clr
}

#[quickcheck]
fn snapshot_matches_volatile(initial: u32, sadd: u16, nbytes: u8, rd_wrn: bool) -> bool {
    let volatile = Register::<u32>::new(initial);
    volatile.field::<0, 10>().rmw(sadd.into());
    volatile.field::<16, 8>().rmw(nbytes.into());
    volatile.field::<10, 1>().rmw_value(rd_wrn);

    let stable = Register::<u32>::new(initial);
    let mut snapshot = stable.read();
    snapshot
        .field::<0, 10>()
        .modify(sadd.into())
        .field::<16, 8>()
        .modify_value(nbytes)
        .field::<10, 1>()
        .modify_value(rd_wrn);
    snapshot.write();

    volatile.read_raw() == stable.read_raw()
        && stable.field::<0, 10>().get() == U10::new_masked(sadd)
        && stable.field::<16, 8>().get() == nbytes
        && stable.field::<10, 1>().get() == rd_wrn
}

#[quickcheck]
fn snapshot_is_one_store(initial: u32, edits: Vec<u32>) -> bool {
    let register = Register::<u32, ReadWrite, _>::from_cell(Counting::default());
    register.write_raw(initial);
    register.cell().stores.set(0);

    let mut snapshot = register.read();
    for edit in &edits {
        snapshot.field::<8, 12>().modify(*edit);
    }
    let expected = snapshot.value();
    let unwritten = register.cell().stores.get() == 0 && register.read_raw() == initial;
    snapshot.write();

    unwritten && register.cell().stores.get() == 1 && register.read_raw() == expected
}

#[quickcheck]
fn dropped_snapshot_is_no_store(initial: u32, value: u32) -> bool {
    let register = Register::<u32, ReadWrite, _>::from_cell(Counting::default());
    register.write_raw(initial);
    register.cell().stores.set(0);

    drop(register.read().with_field::<0, 32>(value));

    register.cell().stores.get() == 0 && register.read_raw() == initial
}
