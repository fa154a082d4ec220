use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, Meta};

/// Derive macro that generates a companion structure-of-arrays container for
/// a record whose fields are all `f64`.
///
/// The generated container has the same fields as `Vec<f64>` columns, kept at
/// equal length by every generated method: `new`, `with_capacity`, `push`,
/// `append`, `get`, `set`, `iter`, `len` and `is_empty`, plus `FromIterator`
/// and `Extend` impls. A `field_names()` associated function is added to the
/// record struct.
///
/// Use `#[columns(store_name = "CustomName")]` to override the default
/// container name (`{StructName}Columns`).
#[proc_macro_derive(Columns, attributes(columns))]
pub fn derive_columns(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let store_name =
        extract_store_name(&input).unwrap_or_else(|| format_ident!("{}Columns", name));

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return syn::Error::new_spanned(
                    name,
                    "Columns can only be derived for structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "Columns can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    if fields.is_empty() {
        return syn::Error::new_spanned(name, "Columns struct must have at least one field")
            .to_compile_error()
            .into();
    }

    let mut field_names = Vec::new();
    let mut field_idents = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        if !is_f64_type(&field.ty) {
            return syn::Error::new_spanned(&field.ty, "Columns derive: all fields must be f64")
                .to_compile_error()
                .into();
        }
        field_names.push(ident.to_string());
        field_idents.push(ident);
    }

    let first_field = &field_idents[0];

    let field_name_strs: Vec<&str> = field_names.iter().map(|s| s.as_str()).collect();

    let store_fields = field_idents.iter().map(|f| {
        quote! { pub #f: Vec<f64> }
    });

    let new_fields = field_idents.iter().map(|f| {
        quote! { #f: Vec::new() }
    });

    let with_cap_fields = field_idents.iter().map(|f| {
        quote! { #f: Vec::with_capacity(n) }
    });

    let push_fields = field_idents.iter().map(|f| {
        quote! { self.#f.push(r.#f); }
    });

    let append_fields = field_idents.iter().map(|f| {
        quote! { self.#f.append(&mut other.#f); }
    });

    let get_fields = field_idents.iter().map(|f| {
        quote! { #f: self.#f[i] }
    });

    let set_fields = field_idents.iter().map(|f| {
        quote! { self.#f[i] = r.#f; }
    });

    let expanded = quote! {
        /// Auto-generated column store holding one `Vec<f64>` per record field.
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct #store_name {
            #(#store_fields,)*
        }

        impl #store_name {
            /// Empty store.
            pub fn new() -> Self {
                Self {
                    #(#new_fields,)*
                }
            }

            /// Pre-allocate every column for `n` records.
            pub fn with_capacity(n: usize) -> Self {
                Self {
                    #(#with_cap_fields,)*
                }
            }

            /// Push a single record onto every column.
            pub fn push(&mut self, r: &#name) {
                #(#push_fields)*
            }

            /// Move all records of `other` to the end of this store, leaving `other` empty.
            pub fn append(&mut self, other: &mut Self) {
                #(#append_fields)*
            }

            /// Gather record `i` from the columns.
            ///
            /// Panics if `i` is out of bounds.
            pub fn get(&self, i: usize) -> #name {
                #name {
                    #(#get_fields,)*
                }
            }

            /// Scatter a record back into row `i` of the columns.
            ///
            /// Panics if `i` is out of bounds.
            pub fn set(&mut self, i: usize, r: &#name) {
                #(#set_fields)*
            }

            /// Iterate over the stored records by value.
            pub fn iter(&self) -> impl Iterator<Item = #name> + '_ {
                (0..self.len()).map(move |i| self.get(i))
            }

            /// Number of records stored.
            pub fn len(&self) -> usize {
                self.#first_field.len()
            }

            /// Returns `true` if no records have been stored.
            pub fn is_empty(&self) -> bool {
                self.#first_field.is_empty()
            }
        }

        impl ::std::iter::Extend<#name> for #store_name {
            fn extend<I: IntoIterator<Item = #name>>(&mut self, iter: I) {
                for r in iter {
                    self.push(&r);
                }
            }
        }

        impl ::std::iter::FromIterator<#name> for #store_name {
            fn from_iter<I: IntoIterator<Item = #name>>(iter: I) -> Self {
                let iter = iter.into_iter();
                let mut store = Self::with_capacity(iter.size_hint().0);
                store.extend(iter);
                store
            }
        }

        impl #name {
            /// Returns the field names of this record, in column order.
            pub fn field_names() -> &'static [&'static str] {
                &[#(#field_name_strs),*]
            }
        }
    };

    expanded.into()
}

fn extract_store_name(input: &DeriveInput) -> Option<proc_macro2::Ident> {
    for attr in &input.attrs {
        if attr.path().is_ident("columns") {
            let nested = attr
                .parse_args_with(
                    syn::punctuated::Punctuated::<syn::Meta, syn::Token![,]>::parse_terminated,
                )
                .ok()?;
            for meta in nested {
                if let Meta::NameValue(nv) = meta {
                    if nv.path.is_ident("store_name") {
                        if let syn::Expr::Lit(expr_lit) = &nv.value {
                            if let Lit::Str(lit_str) = &expr_lit.lit {
                                return Some(format_ident!("{}", lit_str.value()));
                            }
                        }
                    }
                }
            }
        }
    }
    None
}

fn is_f64_type(ty: &syn::Type) -> bool {
    if let syn::Type::Path(type_path) = ty {
        type_path.path.is_ident("f64")
    } else {
        false
    }
}
