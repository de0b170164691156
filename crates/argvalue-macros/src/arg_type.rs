//! `#[derive(ArgEnum)]` and `#[derive(ArgType)]` implementation.
//!
//! # Container attributes `#[arg(...)]`
//!
//! | Key | Example | Applies to | Description |
//! |-----|---------|------------|-------------|
//! | `display` | `"log level"` | `ArgEnum` | Name used in error messages (default: the type name) |
//! | `crate` | `"::argvalue::core"` | both | Path of the core crate (default: `::argvalue_core`) |
//!
//! # Variant attributes `#[arg(...)]`
//!
//! | Key | Example | Description |
//! |-----|---------|-------------|
//! | `name` | `"sky-blue"` | Member name matched against input (default: the variant name) |

use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{
    Attribute, Data, DeriveInput, Fields, Ident, LitStr, Meta, Path, Token, parse_quote,
    spanned::Spanned,
};

/// Container-level `#[arg(...)]` options.
struct ContainerAttrs {
    display: Option<String>,
    krate: Path,
}

fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut display = None;
    let mut krate: Path = parse_quote!(::argvalue_core);

    for attr in attrs {
        if !attr.path().is_ident("arg") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("display") {
                display = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("crate") {
                krate = meta.value()?.parse::<LitStr>()?.parse()?;
            } else {
                return Err(meta.error("unsupported `arg` option, expected `display` or `crate`"));
            }
            Ok(())
        })?;
    }

    Ok(ContainerAttrs { display, krate })
}

fn parse_variant_name(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut name = None;

    for attr in attrs {
        if !attr.path().is_ident("arg") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else {
                Err(meta.error("unsupported `arg` option on a variant, expected `name`"))
            }
        })?;
    }

    Ok(name)
}

/// Integer `repr` whose values may not fit in `i64`.
fn wide_repr(attrs: &[Attribute]) -> syn::Result<Option<Ident>> {
    for attr in attrs {
        if !attr.path().is_ident("repr") {
            continue;
        }
        let metas = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
        let wide = metas.iter().find_map(|meta| match meta {
            Meta::Path(path) => path
                .get_ident()
                .filter(|ident| ["u64", "u128", "i128", "usize"].iter().any(|wide| ident == wide)),
            _ => None,
        });
        if let Some(ident) = wide {
            return Ok(Some(ident.clone()));
        }
    }
    Ok(None)
}

pub fn derive_arg_enum(input: &DeriveInput) -> syn::Result<TokenStream> {
    let container = parse_container_attrs(&input.attrs)?;

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new(
            input.span(),
            "ArgEnum can only be derived for enums",
        ));
    };

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            input.generics.span(),
            "ArgEnum cannot be derived for generic enums",
        ));
    }

    let ident = &input.ident;
    let krate = &container.krate;
    let display = container.display.unwrap_or_else(|| ident.to_string());

    let wide = wide_repr(&input.attrs)?;

    let mut members = Vec::with_capacity(data.variants.len());
    let mut arms = Vec::with_capacity(data.variants.len());
    let mut range_checks = Vec::new();

    for (index, variant) in data.variants.iter().enumerate() {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(
                variant.span(),
                "ArgEnum variants must not carry fields",
            ));
        }

        let variant_ident = &variant.ident;
        let name = parse_variant_name(&variant.attrs)?.unwrap_or_else(|| variant_ident.to_string());
        let index = Literal::usize_unsuffixed(index);

        members.push(quote! {
            #krate::EnumMember::new(#name, #ident::#variant_ident as i64)
        });
        arms.push(quote! {
            #index => ::std::option::Option::Some(#ident::#variant_ident)
        });

        // Member values are i64, so wide reprs get a compile-time range check.
        if let Some(repr) = &wide {
            let message = format!("discriminant of `{ident}::{variant_ident}` does not fit in i64");
            range_checks.push(quote! {
                ::std::assert!(
                    (#ident::#variant_ident as #repr) <= (i64::MAX as #repr)
                        && (#ident::#variant_ident as i128) >= (i64::MIN as i128),
                    #message
                );
            });
        }
    }

    let range_check = (!range_checks.is_empty()).then(|| {
        quote! {
            const _: () = {
                #(#range_checks)*
            };
        }
    });

    Ok(quote! {
        #range_check

        impl #krate::ArgEnum for #ident {
            const NAME: &'static str = #display;
            const MEMBERS: &'static [#krate::EnumMember] = &[#(#members),*];

            fn from_index(index: usize) -> ::std::option::Option<Self> {
                match index {
                    #(#arms,)*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl #krate::ArgType for #ident {
            fn type_key() -> #krate::TypeKey {
                #krate::TypeKey::enumeration::<Self>()
            }
        }
    })
}

pub fn derive_arg_type(input: &DeriveInput) -> syn::Result<TokenStream> {
    let container = parse_container_attrs(&input.attrs)?;
    if container.display.is_some() {
        return Err(syn::Error::new(
            input.span(),
            "`display` only applies to ArgEnum",
        ));
    }

    let ident = &input.ident;
    let krate = &container.krate;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::ArgType for #ident #ty_generics #where_clause {
            fn type_key() -> #krate::TypeKey {
                #krate::TypeKey::of::<Self>()
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_repr_gets_range_check() {
        let input: DeriveInput = parse_quote! {
            #[repr(u64)]
            enum Flags {
                Low = 1,
                High = 18_446_744_073_709_551_615,
            }
        };

        let tokens = derive_arg_enum(&input).unwrap().to_string();
        assert!(tokens.contains("does not fit in i64"));
        assert!(tokens.contains("Flags :: High as u64"));
    }

    #[test]
    fn test_narrow_repr_has_no_range_check() {
        let input: DeriveInput = parse_quote! {
            #[repr(C, u8)]
            enum Level {
                Low,
                High,
            }
        };

        let tokens = derive_arg_enum(&input).unwrap().to_string();
        assert!(!tokens.contains("does not fit in i64"));
        assert!(tokens.contains("Level :: High as i64"));
    }

    #[test]
    fn test_fields_rejected() {
        let input: DeriveInput = parse_quote! {
            enum Shape {
                Circle(f64),
            }
        };

        let err = derive_arg_enum(&input).unwrap_err();
        assert!(err.to_string().contains("must not carry fields"));
    }
}
