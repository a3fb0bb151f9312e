use syn::parse_macro_input;

use crate::block::peripheral_impl;
use crate::derive::field_enum_impl;
use crate::gen::register_impl;

mod ast;
mod block;
mod derive;
mod gen;
mod layout;

#[proc_macro]
pub fn register(tokens: proc_macro::TokenStream) -> proc_macro::TokenStream {
    register_impl(parse_macro_input!(tokens)).into()
}

#[proc_macro]
pub fn peripheral(tokens: proc_macro::TokenStream) -> proc_macro::TokenStream {
    peripheral_impl(parse_macro_input!(tokens)).into()
}

#[proc_macro_derive(FieldEnum)]
pub fn field_enum(tokens: proc_macro::TokenStream) -> proc_macro::TokenStream {
    field_enum_impl(parse_macro_input!(tokens)).into()
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::{peripheral_impl, register_impl};

    #[test]
    fn success_zero_registers() {
        let tokens = quote! { (some::path,) };

        let _ = register_impl(syn::parse2(tokens).unwrap());
    }

    #[test]
    fn success_multiple_registers() {
        let tokens = quote! {(
            ::regifc,

            /// Control.
            #[reset(0x0)]
            pub struct Cr: u32 {
                0 => pub sadd: 10,
                31 => pub pe: 1,
            }

            #[access(ro)]
            struct Status: u8 {
                0 => ready: 1,
                1 => _: 7,
            }
        )};

        let _ = register_impl(syn::parse2(tokens).unwrap());
    }

    #[test]
    fn success_zero_peripherals() {
        let tokens = quote! { (some::path,) };

        let _ = peripheral_impl(syn::parse2(tokens).unwrap());
    }
}
