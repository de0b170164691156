use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Ident, ItemFn, LitStr, Path, ReturnType, parse_macro_input, parse_quote};

/// Implementation of the `#[register_parser]` attribute macro.
///
/// Leaves the decorated function unchanged and appends a
/// `#[linkme::distributed_slice]` static that wires it into
/// `PARSER_REGISTRATIONS` in the core crate.
pub fn register_parser(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut krate: Path = parse_quote!(::argvalue_core);
    let attr_parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("crate") {
            krate = meta.value()?.parse::<LitStr>()?.parse()?;
            Ok(())
        } else {
            Err(meta.error("unsupported `register_parser` option, expected `crate`"))
        }
    });
    parse_macro_input!(attr with attr_parser);

    let func = parse_macro_input!(item as ItemFn);
    let sig = &func.sig;

    if sig.asyncness.is_some() || !sig.inputs.is_empty() || !sig.generics.params.is_empty() {
        return syn::Error::new_spanned(
            sig,
            "#[register_parser] expects a plain `fn() -> impl ValueParser` without arguments",
        )
        .into_compile_error()
        .into();
    }
    if matches!(sig.output, ReturnType::Default) {
        return syn::Error::new_spanned(sig, "#[register_parser] function must return a parser")
            .into_compile_error()
            .into();
    }

    let fn_name = &sig.ident;
    let fn_name_upper = fn_name.to_string().to_uppercase();
    let static_name = Ident::new(
        &format!("_ARGVALUE_REGISTER_{fn_name_upper}"),
        Span::call_site(),
    );

    quote! {
        #func

        #[#krate::linkme::distributed_slice(#krate::PARSER_REGISTRATIONS)]
        #[linkme(crate = #krate::linkme)]
        static #static_name: #krate::RegistrationFn =
            || #krate::ParserRegistration::new(#fn_name());
    }
    .into()
}
