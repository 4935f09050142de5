//! Procedural macros for the chainfetch interceptor pipeline.
//!
//! This crate provides the `#[interceptor]` attribute macro for declaring
//! interceptors as plain async functions.
//!
//! # Example
//!
//! ```ignore
//! use chainfetch::prelude::*;
//!
//! #[interceptor(name = "debug-header")]
//! async fn debug_header(request: FetchRequest, next: Next) -> Result<FetchResponse, FetchError> {
//!     next.run(request.with_header("X-DEBUG", "TESTING")).await
//! }
//!
//! let pipeline = Pipeline::builder()
//!     .interceptor(DebugHeaderInterceptor::new())
//!     .build(HyperTransport::new());
//! ```

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, punctuated::Punctuated, Expr, ExprLit, FnArg, ItemFn, Lit, Meta, Token,
};

/// Attributes for the `#[interceptor]` macro.
#[derive(Default, Debug)]
struct InterceptorAttrs {
    /// Name reported by `Interceptor::name`.
    name: Option<String>,
}

impl InterceptorAttrs {
    fn parse_meta_list(metas: Punctuated<Meta, Token![,]>) -> syn::Result<Self> {
        let mut attrs = InterceptorAttrs::default();

        for meta in metas {
            match meta {
                Meta::NameValue(nv) => {
                    let ident = nv.path.get_ident()
                        .ok_or_else(|| syn::Error::new_spanned(&nv.path, "expected identifier"))?
                        .to_string();

                    let lit = match &nv.value {
                        Expr::Lit(ExprLit { lit, .. }) => lit.clone(),
                        _ => return Err(syn::Error::new_spanned(&nv.value, "expected literal")),
                    };

                    match ident.as_str() {
                        "name" => match lit {
                            Lit::Str(lit_str) => attrs.name = Some(lit_str.value()),
                            other => {
                                return Err(syn::Error::new_spanned(
                                    other,
                                    "name must be a string literal",
                                ))
                            }
                        },
                        _ => {
                            return Err(syn::Error::new_spanned(
                                nv.path,
                                format!("unknown attribute: {}", ident),
                            ));
                        }
                    }
                }
                _ => {
                    return Err(syn::Error::new_spanned(
                        meta,
                        "expected name = value",
                    ));
                }
            }
        }

        Ok(attrs)
    }
}

/// The `#[interceptor]` attribute macro.
///
/// Applied to an `async fn(FetchRequest, Next) -> Result<FetchResponse, FetchError>`,
/// it keeps the function and generates a unit struct named after it
/// (`debug_header` becomes `DebugHeaderInterceptor`) that implements
/// `Interceptor` by calling the function.
///
/// # Attributes
///
/// - `name` (optional): name reported by the interceptor (default: the function name)
#[proc_macro_attribute]
pub fn interceptor(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args with Punctuated::<Meta, Token![,]>::parse_terminated);
    let input_fn = parse_macro_input!(input as ItemFn);

    match generate_interceptor(args, input_fn) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn generate_interceptor(
    args: Punctuated<Meta, Token![,]>,
    input_fn: ItemFn,
) -> syn::Result<proc_macro2::TokenStream> {
    let attrs = InterceptorAttrs::parse_meta_list(args)?;

    if input_fn.sig.asyncness.is_none() {
        return Err(syn::Error::new_spanned(
            &input_fn.sig,
            "interceptor must be async",
        ));
    }

    let typed_args = input_fn
        .sig
        .inputs
        .iter()
        .filter(|arg| matches!(arg, FnArg::Typed(_)))
        .count();
    if typed_args != 2 || input_fn.sig.inputs.len() != 2 {
        return Err(syn::Error::new_spanned(
            &input_fn.sig.inputs,
            "interceptor takes exactly (FetchRequest, Next)",
        ));
    }

    let fn_name = &input_fn.sig.ident;
    let fn_vis = &input_fn.vis;
    let interceptor_name = attrs.name.unwrap_or_else(|| fn_name.to_string());
    let struct_name = format_ident!("{}Interceptor", to_pascal_case(&fn_name.to_string()));

    let expanded = quote! {
        /// Generated interceptor struct.
        #[derive(Debug, Default, Clone, Copy)]
        #fn_vis struct #struct_name;

        impl #struct_name {
            /// Create a new instance of the interceptor.
            pub fn new() -> Self {
                Self
            }
        }

        #[chainfetch::prelude::async_trait]
        impl chainfetch::prelude::Interceptor for #struct_name {
            async fn intercept(
                &self,
                request: chainfetch::prelude::FetchRequest,
                next: chainfetch::prelude::Next,
            ) -> Result<chainfetch::prelude::FetchResponse, chainfetch::prelude::FetchError> {
                #fn_name(request, next).await
            }

            fn name(&self) -> &str {
                #interceptor_name
            }
        }

        #input_fn
    };

    Ok(expanded)
}

/// Convert a snake_case string to PascalCase.
fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}
