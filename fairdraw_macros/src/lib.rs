use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Expr, Fields, Lit, LitFloat, Meta, Variant, parse_macro_input,
    spanned::Spanned,
};

/// Derive `fairdraw::TicketEnum` for a fieldless enum.
///
/// Every variant needs `#[chance(<expr>)]`, its chance in percentage
/// points (`#[chance(1)]` is 1% of the ticket space, 1,000 tickets).
#[proc_macro_derive(TicketEnum, attributes(chance))]
pub fn derive_ticket_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let enum_ident = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new(
            input.ident.span(),
            "TicketEnum can only be derived for enums",
        ));
    };

    let mut entries = Vec::with_capacity(data_enum.variants.len());
    for variant in &data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(
                variant.span(),
                "TicketEnum only supports fieldless variants",
            ));
        }
        let ident = &variant.ident;
        let name = ident.to_string();
        let chance = to_f64_expr(chance_expr(variant)?);
        entries.push(quote! { (Self::#ident, #name, (#chance)) });
    }

    Ok(quote! {
        impl fairdraw::TicketEnum for #enum_ident {
            const ENTRIES: &'static [(Self, &'static str, f64)] = &[
                #(#entries),*
            ];
        }

        impl #enum_ident {
            /// Allocate a `TicketTable` from the annotated chances.
            pub fn ticket_table() -> ::core::result::Result<fairdraw::TicketTable, fairdraw::DrawError> {
                <Self as fairdraw::TicketEnum>::ticket_table()
            }
        }
    })
}

/// The expression inside the variant's `#[chance(...)]`.
fn chance_expr(variant: &Variant) -> syn::Result<Expr> {
    let mut found = None;
    for attr in &variant.attrs {
        if !attr.path().is_ident("chance") {
            continue;
        }
        let Meta::List(list) = &attr.meta else {
            return Err(syn::Error::new(attr.span(), "use #[chance(<expr>)]"));
        };
        if found.is_some() {
            return Err(syn::Error::new(attr.span(), "duplicate #[chance(...)]"));
        }
        let expr = syn::parse2::<Expr>(list.tokens.clone()).map_err(|e| {
            syn::Error::new(list.span(), format!("invalid chance expr: {e}"))
        })?;
        found = Some(expr);
    }
    found.ok_or_else(|| syn::Error::new(variant.span(), "missing #[chance(...)] on variant"))
}

/// Rewrite integer literals as floats, so `#[chance(1/2)]` is 0.5 rather
/// than integer division.
fn to_f64_expr(expr: Expr) -> Expr {
    match expr {
        Expr::Lit(mut el) => {
            if let Lit::Int(int) = &el.lit {
                let digits = format!("{}.0", int.base10_digits());
                el.lit = Lit::Float(LitFloat::new(&digits, int.span()));
            }
            Expr::Lit(el)
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
        other => other,
    }
}
