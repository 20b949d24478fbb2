//! Derive macro implementation for envbind

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields, GenericArgument, PathArguments, Type};

mod attrs;

use attrs::FieldAttrs;

/// Types with an entry in the runtime conversion table
const LEAF_TYPES: &[&str] = &[
    "String", "bool", "f32", "f64", "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64",
    "usize",
];

/// Scalars that look like records syntactically but have no conversion
const UNSUPPORTED_SCALARS: &[&str] = &["char", "i128", "u128", "str"];

/// How a field is bound
#[derive(Debug, PartialEq, Eq)]
enum FieldKind {
    Leaf,
    Nested,
    Optional,
    Unsupported,
}

/// Extract inner type from Option<T>
fn option_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let seg = type_path.path.segments.last()?;
    if seg.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

/// Classify a field type from its syntax.
///
/// Plain paths that are not primitives are assumed to be records; the
/// generated code then requires them to implement `Bind`.
fn classify(ty: &Type, nested: bool) -> FieldKind {
    if let Some(inner) = option_inner_type(ty) {
        return match classify(inner, nested) {
            FieldKind::Nested | FieldKind::Optional => FieldKind::Optional,
            _ => FieldKind::Unsupported,
        };
    }

    if nested {
        return FieldKind::Nested;
    }

    match ty {
        Type::Paren(paren) => classify(&paren.elem, nested),
        Type::Group(group) => classify(&group.elem, nested),
        Type::Path(type_path) if type_path.qself.is_none() => {
            let Some(seg) = type_path.path.segments.last() else {
                return FieldKind::Unsupported;
            };
            let ident = seg.ident.to_string();
            match &seg.arguments {
                PathArguments::None if LEAF_TYPES.contains(&ident.as_str()) => FieldKind::Leaf,
                PathArguments::None if UNSUPPORTED_SCALARS.contains(&ident.as_str()) => {
                    FieldKind::Unsupported
                }
                PathArguments::None => FieldKind::Nested,
                PathArguments::AngleBracketed(_) if ident == "Box" => FieldKind::Nested,
                _ => FieldKind::Unsupported,
            }
        }
        _ => FieldKind::Unsupported,
    }
}

/// `Bind` derive macro
///
/// Implements `envbind::Bind` by visiting every field in declaration order.
///
/// # Field Types
///
/// - Primitives (`String`, integers, floats, `bool`): read and converted
/// - Other structs, `Box<T>` and `Option<T>` of them: bound as nested records
/// - Anything else: reported as unsupported when its variable is set
///
/// # Supported Attributes
///
/// **Field-level**:
/// - `#[env(env_key = "NAME")]`: Explicit environment variable name
/// - `#[env(nested)]`: Bind a generic field type as a nested record
///
/// # Example
///
/// See the `envbind` crate documentation for usage examples.
#[proc_macro_derive(Bind, attributes(env))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    // Struct name
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "Bind only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "Bind only supports structs")
                .to_compile_error()
                .into();
        }
    };

    // Generate one binding statement per field
    let mut statements = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let field_type = &field.ty;

        let attrs = match FieldAttrs::from_field(field) {
            Ok(attrs) => attrs,
            Err(e) => return e.to_compile_error().into(),
        };

        let ident = field_name.unraw().to_string();
        let env_key = match &attrs.env_key {
            Some(key) => quote! { ::core::option::Option::Some(#key) },
            None => quote! { ::core::option::Option::None },
        };
        let descriptor = quote! { &::envbind::Field::new(#ident, #env_key) };

        let statement = match classify(field_type, attrs.nested) {
            FieldKind::Leaf => quote! {
                __binder.leaf(&mut self.#field_name, #descriptor)?;
            },
            FieldKind::Nested => quote! {
                __binder.nested(&mut self.#field_name, #descriptor)?;
            },
            FieldKind::Optional => quote! {
                __binder.optional(&mut self.#field_name, #descriptor)?;
            },
            FieldKind::Unsupported => quote! {
                __binder.unsupported(#descriptor, ::core::any::type_name::<#field_type>())?;
            },
        };
        statements.push(statement);
    }

    let expanded = quote! {
        impl #impl_generics ::envbind::Bind for #struct_name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn bind_fields(
                &mut self,
                __binder: &mut ::envbind::Binder,
            ) -> ::core::result::Result<(), ::envbind::BindError> {
                #(#statements)*
                ::core::result::Result::Ok(())
            }
        }
    };

    TokenStream::from(expanded)
}
