//! Registration attribute macro for the quipu test runtime.
//!
//! A single attribute is exported:
//! - `#[test]` (used as `#[quipu::test]`): declares a test function and
//!   places its registry record in the dedicated linker section
//!
//! The macro never generates a registration call. The record it emits is a
//! `static` carried by the section itself, so registration has no runtime
//! cost and survives dead-code elimination.

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Error, ItemFn, ReturnType};

/// Declares a test function and registers it with the quipu runtime.
///
/// The annotated function must be a free function with no parameters, no
/// generics, and no return value. The function body stays exactly as
/// written; alongside it, one `TestEntry` record is emitted into the
/// registry section under the function's own name.
///
/// # Example
/// ```ignore
/// #[quipu::test]
/// fn parses_empty_input() {
///     quipu::check_eq!(parse(""), Ast::default());
/// }
///
/// // Expands to the function above plus:
/// #[distributed_slice(TESTS)]
/// static __quipu_entry_parses_empty_input: TestEntry =
///     TestEntry { id: "parses_empty_input", run: parses_empty_input };
/// ```
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return Error::new_spanned(
            proc_macro2::TokenStream::from(attr),
            "#[quipu::test] takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    let func = parse_macro_input!(item as ItemFn);

    if let Err(err) = validate_signature(&func) {
        return err.to_compile_error().into();
    }

    let ident = &func.sig.ident;
    let id = ident.to_string();
    let entry_ident = format_ident!("__quipu_entry_{}", ident);

    let expanded = quote! {
        #func

        #[::quipu::__private::distributed_slice(::quipu::registry::TESTS)]
        #[linkme(crate = ::quipu::__private::linkme)]
        #[allow(non_upper_case_globals)]
        #[doc(hidden)]
        static #entry_ident: ::quipu::registry::TestEntry =
            ::quipu::registry::TestEntry { id: #id, run: #ident };
    };

    TokenStream::from(expanded)
}

/// Checks that the annotated item can be stored as a plain `fn()` record.
///
/// The registry stores a function pointer with no closure state, so
/// anything that changes the function's type (parameters, generics,
/// `async`, `unsafe`, an ABI, a return value) is rejected up front with a
/// targeted error instead of a confusing type mismatch in the expansion.
fn validate_signature(func: &ItemFn) -> Result<(), Error> {
    let sig = &func.sig;

    if let Some(first) = sig.inputs.first() {
        return Err(Error::new_spanned(
            first,
            "test functions cannot take parameters",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &sig.generics,
            "test functions cannot be generic",
        ));
    }
    if let Some(asyncness) = &sig.asyncness {
        return Err(Error::new_spanned(
            asyncness,
            "test functions cannot be async; the runner executes tests synchronously",
        ));
    }
    if let Some(unsafety) = &sig.unsafety {
        return Err(Error::new_spanned(
            unsafety,
            "test functions cannot be unsafe",
        ));
    }
    if let Some(abi) = &sig.abi {
        return Err(Error::new_spanned(
            abi,
            "test functions cannot declare an ABI",
        ));
    }
    if let ReturnType::Type(arrow, ty) = &sig.output {
        return Err(Error::new_spanned(
            quote!(#arrow #ty),
            "test functions cannot return a value; report failures with the check! macros",
        ));
    }

    Ok(())
}
