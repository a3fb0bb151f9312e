use proc_macro2::Span;
use syn::{Error, Result};

use crate::ast::{Field, FieldName};

pub struct PlacedField {
    pub field: Field,
    pub offset: u32,
    pub width: u32,
}

impl PlacedField {
    fn mask(&self) -> u128 {
        ((1u128 << self.width) - 1) << self.offset
    }

    fn name(&self) -> String {
        match &self.field.name {
            FieldName::Ident(ident) => ident.to_string(),
            FieldName::Reserved(_) => "_".to_string(),
        }
    }
}

/// Resolves each field's offset and width and checks that the fields fit in a
/// `word_bits`-bit register without overlapping.
pub fn place(
    word_bits: u32,
    fields: impl IntoIterator<Item = Field>,
) -> Result<Vec<PlacedField>> {
    let mut placed: Vec<PlacedField> = Vec::new();
    for field in fields {
        let offset: u32 = field.offset.base10_parse()?;
        let width: u32 = field.width.base10_parse()?;

        if width == 0 {
            return Err(Error::new(
                field.width.span(),
                "a field must be at least one bit wide",
            ));
        }
        if offset.saturating_add(width) > word_bits {
            return Err(Error::new(
                field.width.span(),
                format!(
                    "bits {offset}..{} do not fit in a {word_bits}-bit register",
                    offset.saturating_add(width),
                ),
            ));
        }

        let field = PlacedField {
            field,
            offset,
            width,
        };
        if let Some(other) = placed.iter().find(|other| other.mask() & field.mask() != 0) {
            return Err(Error::new(
                field.field.name_span(),
                format!(
                    "bits {}..{} overlap `{}` at bits {}..{}",
                    field.offset,
                    field.offset + field.width,
                    other.name(),
                    other.offset,
                    other.offset + other.width,
                ),
            ));
        }
        placed.push(field);
    }
    Ok(placed)
}

/// Returns the width in bits of a register value type.
pub fn word_bits(word: &syn::Ident) -> Result<u32> {
    match word.to_string().as_str() {
        "u8" => Ok(8),
        "u16" => Ok(16),
        "u32" => Ok(32),
        "u64" => Ok(64),
        _ => Err(Error::new(
            word.span(),
            "a register must be `u8`, `u16`, `u32` or `u64`",
        )),
    }
}

/// Checks that block entries are in increasing offset order and returns their
/// byte offsets.
pub fn block_offsets<'a>(
    size: usize,
    size_span: Span,
    offsets: impl IntoIterator<Item = &'a syn::LitInt>,
) -> Result<Vec<usize>> {
    let mut result: Vec<usize> = Vec::new();
    for lit in offsets {
        let offset: usize = lit.base10_parse()?;
        if let Some(&previous) = result.last() {
            if offset <= previous {
                return Err(Error::new(
                    lit.span(),
                    format!("offset {offset:#x} must be greater than the previous offset {previous:#x}"),
                ));
            }
        }
        if offset >= size {
            return Err(Error::new(
                lit.span(),
                format!("offset {offset:#x} is outside the block"),
            ));
        }
        result.push(offset);
    }
    if size == 0 {
        return Err(Error::new(size_span, "a block must not be empty"));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::punctuated::Punctuated;
    use syn::Token;

    use super::*;

    fn fields(tokens: proc_macro2::TokenStream) -> Vec<Field> {
        let parsed: Punctuated<Field, Token![,]> =
            syn::parse::Parser::parse2(Punctuated::parse_terminated, tokens).unwrap();
        parsed.into_iter().collect()
    }

    #[test]
    fn places_disjoint_fields() {
        let placed = place(
            32,
            fields(quote! {
                0 => pub sadd: 10,
                10 => pub rd_wrn: 1,
                16 => pub nbytes: 8,
                24 => _: 7,
                31 => pub pe: 1,
            }),
        )
        .unwrap();

        let layout: Vec<_> = placed.iter().map(|f| (f.offset, f.width)).collect();
        assert_eq!(layout, [(0, 10), (10, 1), (16, 8), (24, 7), (31, 1)]);
    }

    #[test]
    fn full_width_fields() {
        assert!(place(64, fields(quote! { 0 => a: 64 })).is_ok());
        assert!(place(8, fields(quote! { 0 => a: 4, 4 => b: 4 })).is_ok());
    }

    #[test]
    fn rejects_zero_width() {
        let error = place(32, fields(quote! { 4 => a: 0 })).err().unwrap();
        assert_eq!(error.to_string(), "a field must be at least one bit wide");
    }

    #[test]
    fn rejects_overflow() {
        let error = place(32, fields(quote! { 28 => a: 8 })).err().unwrap();
        assert_eq!(
            error.to_string(),
            "bits 28..36 do not fit in a 32-bit register",
        );
    }

    #[test]
    fn rejects_overlap() {
        let error = place(
            32,
            fields(quote! {
                0 => sadd: 10,
                16 => nbytes: 8,
                8 => b: 4,
            }),
        )
        .err()
        .unwrap();
        assert_eq!(error.to_string(), "bits 8..12 overlap `sadd` at bits 0..10");
    }

    #[test]
    fn word_types() {
        let u16_ident = syn::Ident::new("u16", Span::call_site());
        assert_eq!(word_bits(&u16_ident).unwrap(), 16);
        let usize_ident = syn::Ident::new("usize", Span::call_site());
        assert!(word_bits(&usize_ident).is_err());
    }

    #[test]
    fn block_order() {
        let lits: Vec<syn::LitInt> = vec![syn::parse_quote!(0x0), syn::parse_quote!(0x18)];
        assert_eq!(block_offsets(0x2c, Span::call_site(), &lits).unwrap(), [0x0, 0x18]);

        let lits: Vec<syn::LitInt> = vec![syn::parse_quote!(0x18), syn::parse_quote!(0x0)];
        assert!(block_offsets(0x2c, Span::call_site(), &lits).is_err());

        let lits: Vec<syn::LitInt> = vec![syn::parse_quote!(0x2c)];
        assert!(block_offsets(0x2c, Span::call_site(), &lits).is_err());
    }
}
