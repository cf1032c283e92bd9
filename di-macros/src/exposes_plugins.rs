//! Implementation of #[derive(ExposesPlugins)] proc-macro.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, Field};

use crate::fields::named_fields;

/// How a field participates in plugin discovery.
enum Member {
    /// A single plugin, listed under the given name.
    Plugin(String),
    /// A nested flavor whose plugins are listed in place.
    Flavor,
}

pub fn derive_exposes_plugins_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match named_fields(&input, "ExposesPlugins") {
        Ok(fields) => fields,
        Err(err) => return err.to_compile_error().into(),
    };

    let mut pushes = Vec::new();
    for field in fields {
        let member = match parse_member(field) {
            Ok(Some(member)) => member,
            Ok(None) => continue,
            Err(err) => return err.to_compile_error().into(),
        };
        let field_name = field.ident.as_ref().unwrap();

        pushes.push(match member {
            Member::Plugin(plugin_name) => quote! {
                plugins.push(crate::NamedPlugin::new(#plugin_name, &mut self.#field_name));
            },
            Member::Flavor => quote! {
                plugins.extend(crate::ExposesPlugins::exposes_plugins(&mut self.#field_name));
            },
        });
    }

    let expanded = quote! {
        impl #impl_generics crate::ExposesPlugins for #name #ty_generics #where_clause {
            fn exposes_plugins(&mut self) -> ::std::vec::Vec<crate::NamedPlugin<'_>> {
                let mut plugins = ::std::vec::Vec::new();
                #(#pushes)*
                plugins
            }
        }
    };

    TokenStream::from(expanded)
}

fn parse_member(field: &Field) -> syn::Result<Option<Member>> {
    let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("expose")) else {
        return Ok(None);
    };

    // Bare #[expose] names the entry after the field
    let mut plugin_name = field.ident.as_ref().map(|i| i.to_string()).unwrap_or_default();
    let mut flavor = false;

    if let syn::Meta::List(_) = &attr.meta {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("flavor") {
                flavor = true;
                Ok(())
            } else if meta.path.is_ident("name") {
                let value: syn::LitStr = meta.value()?.parse()?;
                plugin_name = value.value();
                Ok(())
            } else {
                Err(meta.error("unsupported expose attribute, expected `name` or `flavor`"))
            }
        })?;
    }

    Ok(Some(if flavor {
        Member::Flavor
    } else {
        Member::Plugin(plugin_name)
    }))
}
