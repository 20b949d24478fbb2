//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates binding attributes from struct fields
//! during macro expansion.

use syn::{Field, LitStr};

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Explicit environment variable name.
    ///
    /// Absolute for leaf fields; replaces the prefix segment of nested records.
    pub env_key: Option<String>,

    /// Force the field to be bound as a nested record.
    pub nested: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    ///
    /// Attributes with other paths are left for other macros.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // env_key = "..."
                if meta.path.is_ident("env_key") {
                    let value: LitStr = meta.value()?.parse()?;
                    attrs.env_key = Some(value.value());
                    return Ok(());
                }

                // nested
                if meta.path.is_ident("nested") {
                    attrs.nested = true;
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute, expected `env_key = \"...\"` or `nested`"))
            })?;
        }

        Ok(attrs)
    }
}
