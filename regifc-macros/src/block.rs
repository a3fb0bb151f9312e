use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::{Path, Result};

use crate::ast::{self, Input};
use crate::layout::block_offsets;

pub fn peripheral_impl(input: Input<ast::Peripheral>) -> TokenStream {
    let crate_path = input.crate_path;
    let results: Vec<_> = input
        .items
        .into_iter()
        .map(|peripheral| generate_peripheral(&crate_path, peripheral))
        .collect();
    quote! { #(#results)* }
}

fn generate_peripheral(crate_path: &Path, input: ast::Peripheral) -> TokenStream {
    let cloned_name = input.name.clone();
    match generate_peripheral_impl(crate_path, input) {
        Ok(result) => result,
        Err(e) => {
            let compile_error = e.into_compile_error();
            quote! {
                #compile_error
                struct #cloned_name {}
            }
        }
    }
}

fn generate_peripheral_impl(crate_path: &Path, input: ast::Peripheral) -> Result<TokenStream> {
    let k = crate_path;
    let core = quote! { #k::__private::core };
    let name = input.name;
    let visibility = input.visibility;
    let attrs = input.attrs;
    let size: usize = input.size.base10_parse()?;
    let size_lit = Literal::usize_unsuffixed(size);
    let offsets = block_offsets(size, input.size.span(), input.entries.iter().map(|e| &e.offset))?;

    let mut fields = Vec::new();
    let mut asserts = Vec::new();
    let mut padding = 0usize;
    // Byte offset just past the previous entry.
    let mut end = quote! { 0 };

    for (entry, offset) in input.entries.into_iter().zip(offsets) {
        let offset_lit = Literal::usize_unsuffixed(offset);
        if offset != 0 {
            let reserved = format_ident!("_reserved{}", padding);
            padding += 1;
            fields.push(quote! {
                #reserved: [u8; #offset_lit - (#end)],
            });
        }

        let entry_attrs = entry.attrs;
        let entry_visibility = entry.visibility;
        let entry_name = entry.name;
        let type_ = entry.type_;
        let message = format!("`{name}::{entry_name}` must be at offset {offset:#x}");
        asserts.push(quote! {
            const _: () = #core::assert!(
                #k::__private::memoffset::offset_of!(#name, #entry_name) == #offset_lit,
                #message,
            );
        });
        fields.push(quote! {
            #(#entry_attrs)*
            #entry_visibility #entry_name: #type_,
        });
        end = quote! { #offset_lit + #core::mem::size_of::<#type_>() };
    }

    let reserved = format_ident!("_reserved{}", padding);
    fields.push(quote! {
        #reserved: [u8; #size_lit - (#end)],
    });

    let size_message = format!("`{name}` must be {size:#x} bytes");

    Ok(quote! {
        #(#attrs)*
        #[repr(C)]
        #visibility struct #name {
            #(#fields)*
        }

        const _: () = #core::assert!(
            #core::mem::size_of::<#name>() == #size_lit,
            #size_message,
        );

        #(#asserts)*

        impl #name {
            /// Overlays the block on the memory at `address`.
            ///
            /// # Safety
            ///
            /// `address` must be the suitably aligned base of this block, and
            /// the block's registers must stay valid for `'a`.
            #[inline(always)]
            pub unsafe fn from_address<'a>(address: usize) -> &'a Self {
                &*(address as *const Self)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    fn expand(tokens: TokenStream) -> String {
        peripheral_impl(syn::parse2(tokens).unwrap()).to_string()
    }

    #[test]
    fn pads_gaps() {
        let output = expand(quote! {(
            ::regifc,
            pub struct I2c: 0x2c {
                0x00 => pub cr: Cr,
                0x18 => pub isr: Isr,
                0x28 => pub txdr: Txdr,
            }
        )});

        assert!(!output.contains("compile_error"));
        assert!(output.contains("_reserved0"));
        assert!(output.contains("_reserved1"));
        assert!(output.contains("_reserved2"));
        assert!(!output.contains("_reserved3"));
        assert!(output.contains("fn from_address"));
    }

    #[test]
    fn leading_gap() {
        let output = expand(quote! {(
            ::regifc,
            struct Late: 0x10 {
                0x8 => pub data: Data,
            }
        )});

        assert!(output.contains("_reserved0"));
        assert!(output.contains("_reserved1"));
        assert!(!output.contains("_reserved2"));
    }

    #[test]
    fn rejects_unordered_offsets() {
        let output = expand(quote! {(
            ::regifc,
            struct Block: 0x10 {
                0x8 => pub a: A,
                0x4 => pub b: B,
            }
        )});

        assert!(output.contains("compile_error"));
        assert!(output.contains("must be greater than the previous offset"));
    }
}
