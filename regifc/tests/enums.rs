use regifc::prelude::*;
use regifc::ConversionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, FieldEnum)]
enum Speed {
    Standard,
    Fast,
    FastPlus = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, FieldEnum)]
#[repr(u8)]
enum Filter {
    Off = 0,
    Short = 0x4,
    Long = 0xf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, FieldEnum)]
enum Enable {
    On = 1,
}

register! {
    /// Timing register.
    pub struct Timingr: u32 {
        0 => pub filter: 4,
        4 => pub enable: 1,
        28 => pub speed: 2,
        30 => pub wide: 2,
    }
}

#[test]
fn widths() {
    assert_eq!(Speed::BITS, 2);
    assert_eq!(Filter::BITS, 4);
    assert_eq!(Enable::BITS, 1);
}

#[test]
fn bit_patterns() {
    assert_eq!(Speed::Fast.to_bits(), 1);
    assert_eq!(Speed::FastPlus.to_bits(), 3);
    assert_eq!(Filter::Short.to_bits(), 4);
    assert_eq!(Speed::try_from_bits(0), Some(Speed::Standard));
    assert_eq!(Speed::try_from_bits(2), None);
    assert_eq!(Filter::try_from_bits(0xf), Some(Filter::Long));
    assert_eq!(Enable::try_from_bits(0), None);
}

#[test]
fn volatile_round_trip() {
    let timingr = Timingr::new(0);
    timingr.speed().rmw_value(Speed::FastPlus);
    timingr.filter().rmw_value(Filter::Short);
    timingr.enable().rmw_value(Enable::On);

    assert_eq!(timingr.read_raw(), 0x3000_0014);
    assert_eq!(timingr.speed().get_as::<Speed>(), Ok(Speed::FastPlus));
    assert_eq!(timingr.filter().get_as::<Filter>(), Ok(Filter::Short));
    assert_eq!(timingr.enable().get_as::<Enable>(), Ok(Enable::On));
}

#[test]
fn stable_round_trip() {
    let timingr = Timingr::new(0xffff_ffff);
    let mut snapshot = timingr.read();
    snapshot
        .speed()
        .modify_value(Speed::Standard)
        .filter()
        .modify_value(Filter::Off);
    assert_eq!(snapshot.speed().get_as::<Speed>(), Ok(Speed::Standard));
    snapshot.write();

    assert_eq!(timingr.read_raw(), 0xcfff_fff0);
}

#[test]
fn narrower_enum_in_wider_field() {
    let timingr = Timingr::new(0);
    timingr.wide().rmw_value(Enable::On);

    assert_eq!(timingr.read_raw(), 0x4000_0000);
    assert_eq!(timingr.wide().get(), U2::new_masked(1));
}

#[test]
fn unknown_variant() {
    let timingr = Timingr::new(0x2000_0000);

    assert_eq!(
        timingr.speed().get_as::<Speed>(),
        Err(ConversionError::UnknownVariant { bits: 2 }),
    );
    assert_eq!(
        timingr.speed().get_as::<Speed>().unwrap_err().to_string(),
        "bit pattern 0x2 has no matching variant",
    );
}

#[test]
fn enum_builder_chain_is_one_store() {
    let timingr = Timingr::new(0x0000_0100);
    timingr
        .read()
        .with_speed_value(Speed::Fast)
        .with_filter_value(Filter::Long)
        .with_enable_value(Enable::On)
        .with_wide_value(U2::new_masked(0b10))
        .write();

    assert_eq!(timingr.read_raw(), 0x9000_011f);
    assert_eq!(timingr.speed().get_as::<Speed>(), Ok(Speed::Fast));
    assert_eq!(timingr.read().filter().get_as::<Filter>(), Ok(Filter::Long));
}
