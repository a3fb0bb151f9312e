use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Error, Expr, ExprLit, Fields, Lit, Result};

pub fn field_enum_impl(input: DeriveInput) -> TokenStream {
    match field_enum_impl_inner(input) {
        Ok(result) => result,
        Err(e) => e.into_compile_error(),
    }
}

fn field_enum_impl_inner(input: DeriveInput) -> Result<TokenStream> {
    let Data::Enum(data) = &input.data else {
        return Err(Error::new(
            input.ident.span(),
            "`FieldEnum` can only be derived for enums",
        ));
    };
    if data.variants.is_empty() {
        return Err(Error::new(
            input.ident.span(),
            "`FieldEnum` cannot be derived for an enum without variants",
        ));
    }

    let mut discriminants = Vec::new();
    let mut next: u64 = 0;
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new(
                variant.fields.span(),
                "`FieldEnum` variants must not have fields",
            ));
        }
        let discriminant = match &variant.discriminant {
            Some((
                _,
                Expr::Lit(ExprLit {
                    lit: Lit::Int(lit), ..
                }),
            )) => lit.base10_parse()?,
            Some((_, expr)) => {
                return Err(Error::new(
                    expr.span(),
                    "`FieldEnum` discriminants must be non-negative integer literals",
                ))
            }
            None => next,
        };
        next = discriminant.wrapping_add(1);
        discriminants.push((&variant.ident, discriminant));
    }

    let max = discriminants.iter().map(|&(_, d)| d).max().unwrap_or(0);
    let bits = (u64::BITS - max.leading_zeros()).max(1);

    let name = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();
    let arms = discriminants.iter().map(|(ident, discriminant)| {
        let value = Literal::u64_unsuffixed(*discriminant);
        quote! { #value => ::core::option::Option::Some(Self::#ident), }
    });

    Ok(quote! {
        impl #impl_generics ::regifc::ToBits for #name #type_generics #where_clause {
            const BITS: u32 = #bits;

            #[inline(always)]
            fn to_bits(self) -> u64 {
                self as u64
            }
        }

        impl #impl_generics ::regifc::TryFromBits for #name #type_generics #where_clause {
            fn try_from_bits(bits: u64) -> ::core::option::Option<Self> {
                match bits {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    fn expand(tokens: TokenStream) -> String {
        field_enum_impl(syn::parse2(tokens).unwrap()).to_string()
    }

    #[test]
    fn implicit_discriminants() {
        let output = expand(quote! {
            enum Mode { Idle, Transmit, Receive }
        });

        assert!(output.contains("const BITS : u32 = 2u32"));
        assert!(output.contains("2 => :: core :: option :: Option :: Some (Self :: Receive)"));
    }

    #[test]
    fn explicit_discriminants() {
        let output = expand(quote! {
            enum Speed { Standard = 0, Fast = 1, FastPlus = 0x9, Next }
        });

        assert!(output.contains("const BITS : u32 = 4u32"));
        assert!(output.contains("10 => :: core :: option :: Option :: Some (Self :: Next)"));
    }

    #[test]
    fn single_variant() {
        let output = expand(quote! {
            enum Only { Zero }
        });

        assert!(output.contains("const BITS : u32 = 1u32"));
    }

    #[test]
    fn rejects_structs() {
        let output = expand(quote! {
            struct Speed(u8);
        });

        assert!(output.contains("can only be derived for enums"));
    }

    #[test]
    fn rejects_negative_discriminants() {
        let output = expand(quote! {
            enum Signed { Low = -1, High = 1 }
        });

        assert!(output.contains("non-negative integer literals"));
    }

    #[test]
    fn rejects_variant_fields() {
        let output = expand(quote! {
            enum Payload { Empty, Byte(u8) }
        });

        assert!(output.contains("must not have fields"));
    }
}
