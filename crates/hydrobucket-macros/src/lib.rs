use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, Meta};

/// Derive macro that generates a companion `*Timeseries` struct for collecting
/// per-step output records. All fields in the source struct must be `f64`.
///
/// The generated timeseries struct is column-oriented: the same fields as
/// `Vec<f64>`, with `with_capacity`, `push`, `get`, `last`, `column`, `len`
/// and `is_empty` methods. The record struct itself gains `FIELD_COUNT`,
/// `field_names()` and `values()` so writers can emit rows without naming
/// every field.
///
/// Use `#[fluxes(timeseries_name = "CustomName")]` to override the default
/// timeseries struct name (`{StructName}Timeseries`).
#[proc_macro_derive(Fluxes, attributes(fluxes))]
pub fn derive_fluxes(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let ts_name = extract_timeseries_name(&input)
        .unwrap_or_else(|| format_ident!("{}Timeseries", name));

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return syn::Error::new_spanned(
                    name,
                    "Fluxes can only be derived for structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "Fluxes can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    if fields.is_empty() {
        return syn::Error::new_spanned(name, "Fluxes struct must have at least one field")
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
            return syn::Error::new_spanned(&field.ty, "Fluxes derive: all fields must be f64")
                .to_compile_error()
                .into();
        }
        field_names.push(ident.to_string());
        field_idents.push(ident);
    }

    let first_field = &field_idents[0];
    let field_count = field_idents.len();

    let field_name_strs: Vec<&str> = field_names.iter().map(|s| s.as_str()).collect();

    let ts_fields = field_idents.iter().map(|f| {
        quote! { pub #f: Vec<f64> }
    });

    let with_cap_fields = field_idents.iter().map(|f| {
        quote! { #f: Vec::with_capacity(n) }
    });

    let push_fields = field_idents.iter().map(|f| {
        quote! { self.#f.push(f.#f); }
    });

    let get_fields = field_idents.iter().map(|f| {
        quote! { #f: self.#f[t] }
    });

    let column_arms = field_idents.iter().zip(&field_name_strs).map(|(f, s)| {
        quote! { #s => Some(self.#f.as_slice()), }
    });

    let value_fields = field_idents.iter().map(|f| {
        quote! { self.#f }
    });

    let expanded = quote! {
        /// Auto-generated column-oriented timeseries of per-step records.
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct #ts_name {
            #(#ts_fields,)*
        }

        impl #ts_name {
            /// Pre-allocate all vectors for `n` steps.
            pub fn with_capacity(n: usize) -> Self {
                Self {
                    #(#with_cap_fields,)*
                }
            }

            /// Append a single step's record.
            pub fn push(&mut self, f: &#name) {
                #(#push_fields)*
            }

            /// Reassemble the record stored at step `t`.
            pub fn get(&self, t: usize) -> Option<#name> {
                if t >= self.len() {
                    return None;
                }
                Some(#name {
                    #(#get_fields,)*
                })
            }

            /// The most recently pushed record.
            pub fn last(&self) -> Option<#name> {
                self.len().checked_sub(1).and_then(|t| self.get(t))
            }

            /// Look up a column by field name.
            pub fn column(&self, name: &str) -> Option<&[f64]> {
                match name {
                    #(#column_arms)*
                    _ => None,
                }
            }

            /// Number of steps stored.
            pub fn len(&self) -> usize {
                self.#first_field.len()
            }

            /// Returns `true` if no steps have been stored.
            pub fn is_empty(&self) -> bool {
                self.#first_field.is_empty()
            }
        }

        impl #name {
            /// Number of fields in the record.
            pub const FIELD_COUNT: usize = #field_count;

            /// Returns the field names of this record, in declaration order.
            pub fn field_names() -> &'static [&'static str] {
                &[#(#field_name_strs),*]
            }

            /// Field values in the same order as `field_names()`.
            pub fn values(&self) -> [f64; #field_count] {
                [#(#value_fields),*]
            }
        }
    };

    expanded.into()
}

fn extract_timeseries_name(input: &DeriveInput) -> Option<proc_macro2::Ident> {
    for attr in &input.attrs {
        if attr.path().is_ident("fluxes") {
            let nested = attr
                .parse_args_with(
                    syn::punctuated::Punctuated::<syn::Meta, syn::Token![,]>::parse_terminated,
                )
                .ok()?;
            for meta in nested {
                if let Meta::NameValue(nv) = meta {
                    if nv.path.is_ident("timeseries_name") {
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
