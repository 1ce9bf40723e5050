use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Expr, Fields, Lit, LitFloat, Variant, parse_macro_input, spanned::Spanned};

/// Variant attribute: #[coefficient(<expr>)]
#[proc_macro_derive(WeightedEnum, attributes(coefficient))]
pub fn derive_weighted_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let enum_ident = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new(
            input.ident.span(),
            "WeightedEnum can only be derived for enums",
        ));
    };

    let entries = data_enum
        .variants
        .iter()
        .map(|variant| {
            let ident = &variant.ident;
            // Upgrade integer literals to floats so 1/7 => 1.0/7.0
            let expr = to_f64_expr(coefficient_of(variant)?);
            Ok(quote! { (Self::#ident, (#expr)) })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        impl ::aliastables::WeightedEnum for #enum_ident {
            const ENTRIES: &'static [(Self, f64)] = &[
                #(#entries),*
            ];
        }

        impl #enum_ident {
            /// Build a `WeightedTable` from the annotated coefficients.
            pub fn weighted_table(
                precision: ::aliastables::Precision,
            ) -> ::core::result::Result<::aliastables::WeightedTable<Self>, ::aliastables::AliasError>
            where
                Self: Copy
            {
                <Self as ::aliastables::WeightedEnum>::weighted_table(precision)
            }
        }
    })
}

/// Find the single `#[coefficient(...)]` on a unit variant.
fn coefficient_of(variant: &Variant) -> syn::Result<Expr> {
    if !matches!(variant.fields, Fields::Unit) {
        return Err(syn::Error::new(
            variant.span(),
            "WeightedEnum only supports fieldless variants",
        ));
    }

    let mut found = None;
    for attr in &variant.attrs {
        if !attr.path().is_ident("coefficient") {
            continue;
        }
        let list = attr
            .meta
            .require_list()
            .map_err(|_| syn::Error::new(attr.span(), "use #[coefficient(<expr>)]"))?;
        let expr = syn::parse2::<Expr>(list.tokens.clone()).map_err(|e| {
            syn::Error::new(list.span(), format!("invalid coefficient expr: {e}"))
        })?;
        if found.replace(expr).is_some() {
            return Err(syn::Error::new(attr.span(), "duplicate #[coefficient(...)]"));
        }
    }
    found.ok_or_else(|| syn::Error::new(variant.span(), "missing #[coefficient(...)] on variant"))
}

/// Recursively rewrite integer literals to floating-point (e.g., 1 -> 1.0),
/// so that expressions like `1/7` use FP division.
fn to_f64_expr(mut e: Expr) -> Expr {
    match e {
        Expr::Lit(ref mut el) => {
            if let Lit::Int(int) = &el.lit {
                let s = format!("{}.0", int.base10_digits());
                el.lit = Lit::Float(LitFloat::new(&s, int.span()));
            }
            e
        }
        Expr::Binary(mut b) => {
            b.left = Box::new(to_f64_expr(*b.left));
            b.right = Box::new(to_f64_expr(*b.right));
            Expr::Binary(b)
        }
        Expr::Paren(mut p) => {
            p.expr = Box::new(to_f64_expr(*p.expr));
            Expr::Paren(p)
        }
        Expr::Unary(mut u) => {
            u.expr = Box::new(to_f64_expr(*u.expr));
            Expr::Unary(u)
        }
        Expr::Group(mut g) => {
            g.expr = Box::new(to_f64_expr(*g.expr));
            Expr::Group(g)
        }
        _ => e,
    }
}
