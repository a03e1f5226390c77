use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse::Parser;
use syn::spanned::Spanned;
use syn::{DeriveInput, Expr, Fields, Ident, Lit};

struct VariantSpec {
    ident: Ident,
    fields: Fields,
    http_code: TokenStream2,
    http_message: Option<String>,
    errcode: Option<u32>,
}

pub(crate) fn http_error_derive_impl(input: DeriveInput) -> TokenStream {
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let data_enum = match input.data {
        syn::Data::Enum(data_enum) => data_enum,
        _ => {
            return Err(syn::Error::new(
                name.span(),
                "HttpError can only be derived for enums",
            ))
        }
    };

    let total = data_enum.variants.len();
    let mut variants = Vec::new();
    for variant in data_enum.variants {
        if let Some(spec) = parse_variant(variant)? {
            variants.push(spec);
        }
    }

    let code_arms = variants.iter().map(|v| {
        let pattern = wildcard_pattern(&v.ident, &v.fields);
        let http_code = &v.http_code;
        quote! { #pattern => #http_code, }
    });

    let errcode_arms = variants.iter().map(|v| {
        let pattern = wildcard_pattern(&v.ident, &v.fields);
        match v.errcode {
            Some(code) => quote! { #pattern => #code, },
            None => quote! { #pattern => u32::from(self.http_code().as_u16()), },
        }
    });

    let message_arms = variants.iter().map(message_arm);

    // Variants without `#[http_error]` are internal failures.
    let (code_fallback, message_fallback, errcode_fallback) = if variants.len() < total {
        (
            quote! { _ => http::StatusCode::INTERNAL_SERVER_ERROR, },
            quote! { _ => self.to_string(), },
            quote! { _ => u32::from(self.http_code().as_u16()), },
        )
    } else {
        (quote! {}, quote! {}, quote! {})
    };

    Ok(quote! {
        impl #name {
            pub fn http_code(&self) -> http::StatusCode {
                match self {
                    #(#code_arms)*
                    #code_fallback
                }
            }

            pub fn http_message(&self) -> String {
                match self {
                    #(#message_arms)*
                    #message_fallback
                }
            }

            pub fn err_code(&self) -> u32 {
                match self {
                    #(#errcode_arms)*
                    #errcode_fallback
                }
            }
        }
    })
}

fn parse_variant(variant: syn::Variant) -> syn::Result<Option<VariantSpec>> {
    let mut http_code = None;
    let mut http_message = None;
    let mut errcode = None;

    for attr in &variant.attrs {
        if !attr.path().is_ident("http_error") {
            continue;
        }
        let meta_list = attr.meta.require_list()?;
        let args = syn::punctuated::Punctuated::<Expr, syn::Token![,]>::parse_terminated
            .parse2(meta_list.tokens.clone())?;

        for (i, expr) in args.into_iter().enumerate() {
            match expr {
                Expr::Path(path) if i == 0 => {
                    let code = &path.path;
                    http_code = Some(quote! { http::StatusCode::#code });
                }
                Expr::Lit(lit) if i == 0 => match &lit.lit {
                    Lit::Int(int_lit) => {
                        let code = int_lit.base10_parse::<u16>()?;
                        if !(100..1000).contains(&code) {
                            return Err(syn::Error::new(int_lit.span(), "invalid HTTP status"));
                        }
                        http_code = Some(quote! { http::StatusCode::from_u16(#code).unwrap() });
                    }
                    other => return Err(syn::Error::new(other.span(), "expected HTTP status")),
                },
                Expr::Lit(lit) => match &lit.lit {
                    Lit::Str(str_lit) => http_message = Some(str_lit.value()),
                    other => {
                        return Err(syn::Error::new(other.span(), "expected message string"))
                    }
                },
                Expr::Assign(assign) => {
                    let is_errcode = matches!(&*assign.left, Expr::Path(p) if p.path.is_ident("errcode"));
                    if !is_errcode {
                        return Err(syn::Error::new(assign.left.span(), "unknown argument"));
                    }
                    match &*assign.right {
                        Expr::Lit(syn::ExprLit {
                            lit: Lit::Int(int_lit),
                            ..
                        }) => errcode = Some(int_lit.base10_parse::<u32>()?),
                        other => {
                            return Err(syn::Error::new(other.span(), "errcode must be an integer"))
                        }
                    }
                }
                other => return Err(syn::Error::new(other.span(), "unexpected http_error argument")),
            }
        }
    }

    Ok(http_code.map(|http_code| VariantSpec {
        ident: variant.ident,
        fields: variant.fields,
        http_code,
        http_message,
        errcode,
    }))
}

fn wildcard_pattern(ident: &Ident, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Unit => quote! { Self::#ident },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Named(_) => quote! { Self::#ident { .. } },
    }
}

fn message_arm(v: &VariantSpec) -> TokenStream2 {
    let ident = &v.ident;
    match &v.fields {
        Fields::Unit => {
            let message_expr = match &v.http_message {
                Some(msg) => quote! { #msg.to_string() },
                None => quote! { self.to_string() },
            };
            quote! { Self::#ident => #message_expr, }
        }
        Fields::Unnamed(fields) => {
            let field_names: Vec<Ident> = (0..fields.unnamed.len())
                .map(|i| Ident::new(&format!("__self_{}", i), proc_macro2::Span::call_site()))
                .collect();

            let message_expr = match &v.http_message {
                Some(msg) => {
                    let msg = prefix_numbers_in_braces(msg);
                    quote! { format!(#msg) }
                }
                None => quote! { self.to_string() },
            };

            quote! {
                #[allow(unused_variables)]
                Self::#ident(#(#field_names),*) => #message_expr,
            }
        }
        Fields::Named(fields) => {
            let field_names: Vec<&Ident> = fields
                .named
                .iter()
                .filter_map(|f| f.ident.as_ref())
                .collect();

            let message_expr = match &v.http_message {
                Some(msg) => quote! { format!(#msg, #(#field_names = #field_names),*) },
                None => quote! { self.to_string() },
            };

            quote! {
                #[allow(unused_variables)]
                Self::#ident { #(#field_names),* } => #message_expr,
            }
        }
    }
}

/// Rewrites positional `{0}` placeholders to the `__self_0` bindings used in tuple arms.
fn prefix_numbers_in_braces(input: &str) -> String {
    let mut result = String::new();
    let mut inside_braces = false;

    for c in input.chars() {
        if c == '{' {
            inside_braces = true;
            result.push(c);
        } else if c == '}' {
            inside_braces = false;
            result.push(c);
        } else if inside_braces && c.is_ascii_digit() {
            result.push_str("__self_");
            result.push(c);
        } else {
            result.push(c);
        }
    }

    result
}
