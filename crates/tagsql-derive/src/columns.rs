//! Columns derive macro implementation

mod attrs;

use proc_macro2::TokenStream;
use quote::quote;
use std::collections::HashSet;
use syn::{Data, DeriveInput, Fields, GenericParam, Generics, Result, parse_quote};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let generics = with_static_bounds(&input.generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let shape = shape_type(&input);

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    format!("Columns can only be derived for structs with named fields, `{name}` is not"),
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                format!("Columns can only be derived for structs, `{name}` is not"),
            ));
        }
    };

    let rename_all = attrs::get_rename_all(&input.attrs)?;

    let mut seen = HashSet::<String>::new();
    let mut entries = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let attr = attrs::get_field_attr(&field.attrs)?;
        if attr.skip {
            continue;
        }

        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = ident.to_string();
        let field_name = field_name.strip_prefix("r#").unwrap_or(&field_name).to_string();
        let column = match &attr.column {
            Some(lit) => lit.value(),
            None => rename_all.apply(&field_name),
        };

        if !seen.insert(column.clone()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("duplicate column '{column}' in `{name}`"),
            ));
        }

        let entry = quote! {
            tagsql::FieldInfo::new(#index, #field_name, #column)
        };
        entries.push(match &attr.modifier {
            Some(key) => quote! { #entry.with_modifier(#key) },
            None => entry,
        });
    }

    if entries.is_empty() {
        return Err(syn::Error::new_spanned(
            &input,
            format!("`{name}` has no mapped columns"),
        ));
    }

    Ok(quote! {
        impl #impl_generics tagsql::HasColumnMapping for #name #ty_generics #where_clause {
            type Shape = #shape;

            fn column_mapping() -> tagsql::OrmResult<::std::vec::Vec<tagsql::FieldInfo>> {
                const FIELDS: &[tagsql::FieldInfo] = &[#(#entries),*];
                ::std::result::Result::Ok(FIELDS.to_vec())
            }
        }
    })
}

/// Type parameters must be `'static` for the shape to have a `TypeId`.
fn with_static_bounds(generics: &Generics) -> Generics {
    let mut generics = generics.clone();
    let idents: Vec<_> = generics.type_params().map(|p| p.ident.clone()).collect();
    let where_clause = generics.make_where_clause();
    for ident in idents {
        where_clause.predicates.push(parse_quote!(#ident: 'static));
    }
    generics
}

/// The cache identity: `Self` with every lifetime replaced by `'static`.
fn shape_type(input: &DeriveInput) -> TokenStream {
    let name = &input.ident;
    if input.generics.params.is_empty() {
        return quote!(Self);
    }
    let args = input.generics.params.iter().map(|param| match param {
        GenericParam::Lifetime(_) => quote!('static),
        GenericParam::Type(p) => {
            let ident = &p.ident;
            quote!(#ident)
        }
        GenericParam::Const(p) => {
            let ident = &p.ident;
            quote!(#ident)
        }
    });
    quote!(#name<#(#args),*>)
}
