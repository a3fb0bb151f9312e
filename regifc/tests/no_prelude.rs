#![no_implicit_prelude]

::regifc::register! {
    /// Control register.
    #[reset(0x0)]
    pub struct Cr: u16 {
        /// Enable.
        0 => pub en: 1,
        /// Mode.
        1 => pub mode: 3,
    }

    /// Status register.
    #[access(ro)]
    pub struct Sr: u16 {
        0 => pub ready: 1,
    }
}

#[derive(::core::clone::Clone, ::core::marker::Copy, ::regifc::FieldEnum)]
enum Mode {
    Idle,
    Run = 5,
}

#[::core::prelude::v1::test]
fn generated_code_resolves_without_prelude() {
    let cr = Cr::new(Cr::RESET);
    cr.en().set();
    cr.reset().with_mode(5).with_en(1).write();
    cr.mode().rmw_value(Mode::Run);
    ::core::assert_eq!(cr.read_raw(), 0b1011);
    ::core::assert!(::core::matches!(cr.mode().get_as::<Mode>(), ::core::result::Result::Ok(Mode::Run)));
    ::core::assert!(::core::matches!(
        <Mode as ::regifc::TryFromBits>::try_from_bits(0),
        ::core::option::Option::Some(Mode::Idle)
    ));

    let sr = Sr::new(1);
    ::core::assert!(sr.read().ready().is_set());
}
