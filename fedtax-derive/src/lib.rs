use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, Meta, Type};

/// Derive macro describing the CSV columns of a record struct.
///
/// For each named field:
/// - column name (honours `#[serde(rename = "...")]`)
/// - required unless the field is `Option<T>` or carries `#[serde(default)]`
/// - description taken from the field's doc comment
///
/// Generates `csv_schema() -> &'static [CsvField]` and `csv_header() -> Vec<&'static str>`.
/// `CsvField` must be in scope at the derive site.
#[proc_macro_derive(CsvSchema, attributes(serde))]
pub fn derive_csv_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(name, "CsvSchema requires named fields")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "CsvSchema only supports structs")
                .to_compile_error()
                .into()
        }
    };

    let columns: Vec<_> = fields
        .iter()
        .filter_map(|field| {
            let ident = field.ident.as_ref()?;
            let serde = SerdeAttrs::parse(&field.attrs);
            let column = serde.rename.unwrap_or_else(|| ident.to_string());
            let required = !serde.default && !is_option_type(&field.ty);
            Some((column, required, get_doc_comment(&field.attrs)))
        })
        .collect();

    let field_entries = columns.iter().map(|(column, required, desc)| {
        quote! {
            CsvField {
                name: #column,
                required: #required,
                description: #desc,
            }
        }
    });
    let header = columns.iter().map(|(column, _, _)| quote! { #column });

    let expanded = quote! {
        impl #name {
            pub fn csv_schema() -> &'static [CsvField] {
                static SCHEMA: &[CsvField] = &[
                    #(#field_entries),*
                ];
                SCHEMA
            }

            pub fn csv_header() -> ::std::vec::Vec<&'static str> {
                ::std::vec![#(#header),*]
            }
        }
    };

    TokenStream::from(expanded)
}

#[derive(Default)]
struct SerdeAttrs {
    rename: Option<String>,
    default: bool,
}

impl SerdeAttrs {
    fn parse(attrs: &[syn::Attribute]) -> Self {
        let mut parsed = SerdeAttrs::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
            // Unknown serde keys are skipped, serde itself reports them.
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value = meta.value()?;
                    let lit: syn::LitStr = value.parse()?;
                    parsed.rename = Some(lit.value());
                } else if meta.path.is_ident("default") {
                    parsed.default = true;
                    if meta.input.peek(syn::Token![=]) {
                        let _: syn::Expr = meta.value()?.parse()?;
                    }
                } else if meta.input.peek(syn::Token![=]) {
                    let _: syn::Expr = meta.value()?.parse()?;
                }
                Ok(())
            });
        }
        parsed
    }
}

fn get_doc_comment(attrs: &[syn::Attribute]) -> String {
    attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            if let Meta::NameValue(meta) = &attr.meta {
                if let syn::Expr::Lit(expr_lit) = &meta.value {
                    if let Lit::Str(lit_str) = &expr_lit.lit {
                        return Some(lit_str.value().trim().to_string());
                    }
                }
            }
            None
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_option_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            return segment.ident == "Option";
        }
    }
    false
}
