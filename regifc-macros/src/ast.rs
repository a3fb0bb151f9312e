use proc_macro2::Span;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{braced, parenthesized, token, Attribute, Ident, LitInt, Path, Result, Token, Type, Visibility};

/// The input to `register!` and `peripheral!`: the caller's path to the
/// `regifc` crate, followed by zero or more definitions.
pub struct Input<T> {
    _paren_token: token::Paren,
    pub crate_path: Path,
    _comma_token: Token![,],
    pub items: Vec<T>,
}

impl<T: Parse> Parse for Input<T> {
    fn parse(input: ParseStream) -> Result<Self> {
        let content;
        Ok(Input {
            _paren_token: parenthesized!(content in input),
            crate_path: content.parse()?,
            _comma_token: content.parse()?,
            items: {
                let mut items = Vec::new();
                while !content.is_empty() {
                    items.push(content.parse()?);
                }
                items
            },
        })
    }
}

pub struct Register {
    pub attrs: Vec<Attribute>,
    pub visibility: Visibility,
    _struct_token: Token![struct],
    pub name: Ident,
    _colon_token: Token![:],
    pub word: Ident,
    _brace_token: token::Brace,
    pub fields: Punctuated<Field, Token![,]>,
}

impl Parse for Register {
    fn parse(input: ParseStream) -> Result<Self> {
        let body;
        Ok(Self {
            attrs: input.call(Attribute::parse_outer)?,
            visibility: input.parse()?,
            _struct_token: input.parse()?,
            name: input.parse()?,
            _colon_token: input.parse()?,
            word: input.parse()?,
            _brace_token: braced!(body in input),
            fields: body.parse_terminated(Field::parse, Token![,])?,
        })
    }
}

pub struct Field {
    pub attrs: Vec<Attribute>,
    pub offset: LitInt,
    _arrow_token: Token![=>],
    pub visibility: Visibility,
    pub name: FieldName,
    _colon_token: Token![:],
    pub width: LitInt,
}

impl Field {
    pub fn name_span(&self) -> Span {
        match &self.name {
            FieldName::Ident(ident) => ident.span(),
            FieldName::Reserved(underscore) => underscore.span(),
        }
    }
}

impl Parse for Field {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(Self {
            attrs: input.call(Attribute::parse_outer)?,
            offset: input.parse()?,
            _arrow_token: input.parse()?,
            visibility: input.parse()?,
            name: input.parse()?,
            _colon_token: input.parse()?,
            width: input.parse()?,
        })
    }
}

pub enum FieldName {
    Ident(Ident),
    Reserved(Token![_]),
}

impl Parse for FieldName {
    fn parse(input: ParseStream) -> Result<Self> {
        let lookahead = input.lookahead1();
        if lookahead.peek(Ident) {
            input.parse().map(Self::Ident)
        } else if lookahead.peek(Token![_]) {
            input.parse().map(Self::Reserved)
        } else {
            Err(lookahead.error())
        }
    }
}

pub struct Peripheral {
    pub attrs: Vec<Attribute>,
    pub visibility: Visibility,
    _struct_token: Token![struct],
    pub name: Ident,
    _colon_token: Token![:],
    pub size: LitInt,
    _brace_token: token::Brace,
    pub entries: Punctuated<Entry, Token![,]>,
}

impl Parse for Peripheral {
    fn parse(input: ParseStream) -> Result<Self> {
        let body;
        Ok(Self {
            attrs: input.call(Attribute::parse_outer)?,
            visibility: input.parse()?,
            _struct_token: input.parse()?,
            name: input.parse()?,
            _colon_token: input.parse()?,
            size: input.parse()?,
            _brace_token: braced!(body in input),
            entries: body.parse_terminated(Entry::parse, Token![,])?,
        })
    }
}

pub struct Entry {
    pub attrs: Vec<Attribute>,
    pub offset: LitInt,
    _arrow_token: Token![=>],
    pub visibility: Visibility,
    pub name: Ident,
    _colon_token: Token![:],
    pub type_: Type,
}

impl Parse for Entry {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(Self {
            attrs: input.call(Attribute::parse_outer)?,
            offset: input.parse()?,
            _arrow_token: input.parse()?,
            visibility: input.parse()?,
            name: input.parse()?,
            _colon_token: input.parse()?,
            type_: input.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    #[test]
    fn register() {
        let input: Input<Register> = syn::parse2(quote! {(
            ::regifc,

            /// Control register.
            #[reset(0x0)]
            pub struct Cr: u32 {
                /// Target address.
                0 => pub sadd: 10,
                10 => pub(crate) rd_wrn: 1,
                24 => _: 7,
            }
        )})
        .unwrap();

        assert_eq!(input.items.len(), 1);
        let cr = &input.items[0];
        assert_eq!(cr.attrs.len(), 2);
        assert_eq!(cr.name, "Cr");
        assert_eq!(cr.word, "u32");

        let fields: Vec<_> = cr.fields.iter().collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].attrs.len(), 1);
        assert_eq!(fields[0].offset.base10_parse::<u32>().unwrap(), 0);
        assert_eq!(fields[1].width.base10_parse::<u32>().unwrap(), 1);
        assert!(matches!(fields[1].visibility, Visibility::Restricted(_)));
        assert!(matches!(fields[2].name, FieldName::Reserved(_)));
        assert!(matches!(fields[2].visibility, Visibility::Inherited));
    }

    #[test]
    fn register_without_fields() {
        let input: Input<Register> = syn::parse2(quote! {(
            crate,
            struct Empty: u8 {}
        )})
        .unwrap();

        assert_eq!(input.items[0].fields.len(), 0);
    }

    #[test]
    fn register_missing_width() {
        let result: Result<Input<Register>> = syn::parse2(quote! {(
            crate,
            struct Cr: u32 {
                0 => pub sadd,
            }
        )});

        assert!(result.is_err());
    }

    #[test]
    fn peripheral() {
        let input: Input<Peripheral> = syn::parse2(quote! {(
            ::regifc,

            /// Block.
            pub struct I2c: 0x2c {
                0x00 => pub cr: Cr,
                0x18 => pub isr: regs::Isr,
                0x1c => pub data: [Data; 4],
            }
        )})
        .unwrap();

        let i2c = &input.items[0];
        assert_eq!(i2c.size.base10_parse::<usize>().unwrap(), 0x2c);
        let entries: Vec<_> = i2c.entries.iter().collect();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].offset.base10_parse::<usize>().unwrap(), 0x18);
        assert!(matches!(entries[2].type_, Type::Array(_)));
    }
}
