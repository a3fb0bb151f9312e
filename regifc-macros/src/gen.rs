use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::{Attribute, Error, Ident, LitInt, Path, Result};

use crate::ast::{self, FieldName, Input};
use crate::layout::{place, word_bits, PlacedField};

/// Method names that the generated types define themselves or reach through
/// `Deref` to the register.
const RESERVED_NAMES: &[&str] = &[
    "cell",
    "clear",
    "field",
    "from_address",
    "from_cell",
    "init",
    "new",
    "read",
    "read_raw",
    "reset",
    "value",
    "write",
    "write_raw",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Access {
    ReadWrite,
    ReadOnly,
    WriteOnly,
}

impl Access {
    fn readable(self) -> bool {
        self != Access::WriteOnly
    }

    fn writable(self) -> bool {
        self != Access::ReadOnly
    }

    fn marker(self, crate_path: &Path) -> TokenStream {
        match self {
            Access::ReadWrite => quote! { #crate_path::access::ReadWrite },
            Access::ReadOnly => quote! { #crate_path::access::ReadOnly },
            Access::WriteOnly => quote! { #crate_path::access::WriteOnly },
        }
    }
}

struct Options {
    access: Access,
    reset: Option<LitInt>,
    other_attrs: Vec<Attribute>,
}

fn parse_options(attrs: Vec<Attribute>) -> Result<Options> {
    let mut access = None;
    let mut reset = None;
    let mut other_attrs = Vec::new();

    for attr in attrs {
        match attr.path() {
            path if path.is_ident("access") => {
                if access.is_some() {
                    return Err(Error::new(
                        attr.span(),
                        "multiple access attributes are not allowed",
                    ));
                }
                let mode: Ident = attr.parse_args()?;
                access = Some(match mode.to_string().as_str() {
                    "rw" => Access::ReadWrite,
                    "ro" => Access::ReadOnly,
                    "wo" => Access::WriteOnly,
                    _ => {
                        return Err(Error::new(
                            mode.span(),
                            "expected `rw`, `ro` or `wo`",
                        ))
                    }
                });
            }
            path if path.is_ident("reset") => {
                if reset.is_some() {
                    return Err(Error::new(
                        attr.span(),
                        "multiple reset attributes are not allowed",
                    ));
                }
                reset = Some(attr.parse_args()?);
            }
            _ => other_attrs.push(attr),
        }
    }

    Ok(Options {
        access: access.unwrap_or(Access::ReadWrite),
        reset,
        other_attrs,
    })
}

pub fn register_impl(input: Input<ast::Register>) -> TokenStream {
    let crate_path = input.crate_path;
    let results: Vec<_> = input
        .items
        .into_iter()
        .map(|register| generate_register(&crate_path, register))
        .collect();
    quote! { #(#results)* }
}

fn generate_register(crate_path: &Path, input: ast::Register) -> TokenStream {
    let cloned_name = input.name.clone();
    match generate_register_impl(crate_path, input) {
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

/// Tokens shared by everything generated for one register.
struct Context<'a> {
    crate_path: &'a Path,
    word: &'a Ident,
    access: TokenStream,
}

fn generate_register_impl(crate_path: &Path, input: ast::Register) -> Result<TokenStream> {
    let Options {
        access,
        reset,
        other_attrs,
    } = parse_options(input.attrs)?;
    let bits = word_bits(&input.word)?;
    let fields = place(bits, input.fields)?;

    let names: Vec<String> = fields
        .iter()
        .filter_map(|field| match &field.field.name {
            FieldName::Ident(ident) => Some(ident.to_string()),
            FieldName::Reserved(_) => None,
        })
        .collect();
    for field in &fields {
        if let FieldName::Ident(ident) = &field.field.name {
            let name = ident.to_string();
            if RESERVED_NAMES.contains(&name.as_str()) {
                return Err(Error::new(
                    ident.span(),
                    format!("`{ident}` is reserved for a generated method"),
                ));
            }
            if let Some(base) = name.strip_suffix("_value") {
                if names.iter().any(|other| other == base) {
                    return Err(Error::new(
                        ident.span(),
                        format!("`with_{ident}` would also be generated for `{base}`"),
                    ));
                }
            }
        }
    }

    let cx = Context {
        crate_path,
        word: &input.word,
        access: access.marker(crate_path),
    };
    let k = crate_path;
    let word = cx.word;
    let access_type = &cx.access;
    let visibility = input.visibility;
    let name = input.name;
    let snapshot_name = format_ident!("{}Snapshot", name);
    let cell_bound = quote! { #k::Cell<#word> };
    let default_cell = quote! { #k::__private::VolatileCell<#word> };

    let volatile_accessors = fields.iter().filter_map(|field| volatile_accessor(&cx, field));
    let stable_accessors = fields.iter().filter_map(|field| stable_accessor(&cx, field));

    let reset_const = reset.as_ref().map(|reset| {
        quote! {
            /// The value the register holds after reset.
            pub const RESET: #word = #reset;
        }
    });

    let read_methods = access.readable().then(|| {
        quote! {
            /// Loads the register once and returns a snapshot of its value.
            ///
            /// Hardware changes between this load and the snapshot's write
            /// are overwritten by the snapshot's value.
            #[inline(always)]
            pub fn read(&self) -> #snapshot_name<'_, C> {
                #snapshot_name {
                    snapshot: self.register.read(),
                }
            }
        }
    });

    let write_methods = access.writable().then(|| {
        let reset_method = reset.as_ref().map(|reset| {
            quote! {
                /// Returns a snapshot holding the reset value without loading
                /// the register.
                #[inline(always)]
                pub fn reset(&self) -> #snapshot_name<'_, C> {
                    self.init(#reset)
                }
            }
        });
        quote! {
            /// Returns a snapshot holding `value` without loading the
            /// register.
            #[inline(always)]
            pub fn init(&self, value: #word) -> #snapshot_name<'_, C> {
                #snapshot_name {
                    snapshot: self.register.init(value),
                }
            }

            /// Stores a snapshot's value with a single store.
            #[inline(always)]
            pub fn write(&self, snapshot: #snapshot_name<'_, C>) {
                self.register.write(snapshot.snapshot)
            }

            #reset_method
        }
    });

    let snapshot_write = access.writable().then(|| {
        quote! {
            /// Stores the cached value with a single store.
            #[inline(always)]
            pub fn write(self) {
                self.snapshot.write()
            }
        }
    });

    let debug_fields = fields.iter().filter_map(|field| match &field.field.name {
        FieldName::Ident(ident) => {
            let label = ident.to_string();
            let offset = Literal::u32_unsuffixed(field.offset);
            let width = Literal::u32_unsuffixed(field.width);
            Some(quote! {
                .field(#label, &#k::Field::<#word, #offset, #width>::get(value))
            })
        }
        FieldName::Reserved(_) => None,
    });

    let size_message = format!("`{name}` must be the size of `{word}`");
    let snapshot_doc = format!(
        "A value loaded from [`{name}`] whose fields are edited before it is written back.",
    );
    let snapshot_name_string = snapshot_name.to_string();

    Ok(quote! {
        #(#other_attrs)*
        #[repr(transparent)]
        #visibility struct #name<C: #cell_bound = #default_cell> {
            register: #k::Register<#word, #access_type, C>,
        }

        const _: () = #k::__private::core::assert!(
            #k::__private::core::mem::size_of::<#name>()
                == #k::__private::core::mem::size_of::<#word>(),
            #size_message,
        );

        impl #name {
            /// Creates a register in ordinary memory holding `value`.
            #[inline(always)]
            pub const fn new(value: #word) -> Self {
                Self {
                    register: #k::Register::new(value),
                }
            }

            /// Overlays the register on the memory at `address`.
            ///
            /// # Safety
            ///
            /// `address` must be suitably aligned and remain a valid register
            /// for `'a`.
            #[inline(always)]
            pub unsafe fn from_address<'a>(address: usize) -> &'a Self {
                &*(address as *const Self)
            }

            #reset_const
        }

        impl<C: #cell_bound> #name<C> {
            /// Wraps a storage cell.
            #[inline(always)]
            pub const fn from_cell(cell: C) -> Self {
                Self {
                    register: #k::Register::from_cell(cell),
                }
            }

            #read_methods
            #write_methods
            #(#volatile_accessors)*
        }

        impl<C: #cell_bound> #k::__private::core::ops::Deref for #name<C> {
            type Target = #k::Register<#word, #access_type, C>;

            #[inline(always)]
            fn deref(&self) -> &Self::Target {
                &self.register
            }
        }

        #[doc = #snapshot_doc]
        #[must_use = "a snapshot has no effect until it is written"]
        #visibility struct #snapshot_name<'r, C: #cell_bound = #default_cell> {
            snapshot: #k::Snapshot<'r, #word, #access_type, C>,
        }

        impl<'r, C: #cell_bound> #snapshot_name<'r, C> {
            /// Returns the cached value.
            #[inline(always)]
            pub fn value(&self) -> #word {
                self.snapshot.value()
            }

            #snapshot_write
            #(#stable_accessors)*
        }

        impl<'r, C: #cell_bound> #k::Cached for #snapshot_name<'r, C> {
            type Word = #word;

            #[inline(always)]
            fn cached(&self) -> #word {
                #k::Cached::cached(&self.snapshot)
            }

            #[inline(always)]
            fn cached_mut(&mut self) -> &mut #word {
                #k::Cached::cached_mut(&mut self.snapshot)
            }
        }

        impl<'r, C: #cell_bound> #k::__private::core::fmt::Debug for #snapshot_name<'r, C> {
            fn fmt(
                &self,
                f: &mut #k::__private::core::fmt::Formatter<'_>,
            ) -> #k::__private::core::fmt::Result {
                let value = self.value();
                f.debug_struct(#snapshot_name_string)
                    .field("value", &#k::__private::core::format_args!("{:#x}", value))
                    #(#debug_fields)*
                    .finish()
            }
        }
    })
}

fn field_docs(field: &PlacedField, fallback: String) -> TokenStream {
    let attrs = &field.field.attrs;
    if attrs.iter().any(|attr| attr.path().is_ident("doc")) {
        quote! { #(#attrs)* }
    } else {
        quote! {
            #(#attrs)*
            #[doc = #fallback]
        }
    }
}

fn volatile_accessor(cx: &Context, field: &PlacedField) -> Option<TokenStream> {
    let FieldName::Ident(name) = &field.field.name else {
        return None;
    };
    let k = cx.crate_path;
    let word = cx.word;
    let access_type = &cx.access;
    let visibility = &field.field.visibility;
    let offset = Literal::u32_unsuffixed(field.offset);
    let width = Literal::u32_unsuffixed(field.width);
    let docs = field_docs(
        field,
        format!(
            "Returns a handle to bits {}..{} that accesses the hardware.",
            field.offset,
            field.offset + field.width,
        ),
    );

    Some(quote! {
        #docs
        #[inline(always)]
        #visibility fn #name(&self) -> #k::VolatileField<'_, #word, #access_type, C, #offset, #width> {
            self.register.field()
        }
    })
}

fn stable_accessor(cx: &Context, field: &PlacedField) -> Option<TokenStream> {
    let FieldName::Ident(name) = &field.field.name else {
        return None;
    };
    let k = cx.crate_path;
    let word = cx.word;
    let visibility = &field.field.visibility;
    let attrs = field
        .field
        .attrs
        .iter()
        .filter(|attr| !attr.path().is_ident("doc"));
    let offset = Literal::u32_unsuffixed(field.offset);
    let width = Literal::u32_unsuffixed(field.width);
    let with_name = format_ident!("with_{}", name);
    let with_value_name = format_ident!("with_{}_value", name);
    let docs = field_docs(
        field,
        format!(
            "Returns a handle to bits {}..{} of the cached value.",
            field.offset,
            field.offset + field.width,
        ),
    );
    let with_doc = format!(
        "Replaces [`{name}`](Self::{name}) with the low {} bits of `value` and returns the \
         snapshot.",
        field.width,
    );

    let with_value_doc = format!(
        "Replaces [`{name}`](Self::{name}) with `value`, whose type must be no wider than \
         {} bits, and returns the snapshot.",
        field.width,
    );
    let value_attrs = attrs.clone();

    Some(quote! {
        #docs
        #[inline(always)]
        #visibility fn #name(&mut self) -> #k::StableField<'_, Self, #offset, #width> {
            #k::StableField::new(self)
        }

        #(#attrs)*
        #[doc = #with_doc]
        #[inline(always)]
        #visibility fn #with_name(mut self, value: #word) -> Self {
            self.#name().modify(value);
            self
        }

        #(#value_attrs)*
        #[doc = #with_value_doc]
        #[inline(always)]
        #visibility fn #with_value_name<V: #k::ToBits>(mut self, value: V) -> Self {
            self.#name().modify_value(value);
            self
        }
    })
}
