//! Error types for binding environment variables

use crate::convert::Kind;
use std::num::{ParseFloatError, ParseIntError};

/// Errors that can occur while binding environment variables into a struct.
///
/// Binding stops at the first error. Fields bound before the failing one keep
/// their new values.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// The field's type has no entry in the conversion table and is not a
    /// nested record.
    ///
    /// Only reported when the field's environment variable is set and non-empty.
    #[error("Field '{field}' has unsupported type {type_name} (environment variable '{key}' is set)")]
    UnsupportedFieldType {
        /// Identifier of the offending field
        field: String,
        /// Resolved environment variable name
        key: String,
        /// Declared type of the field, as written in the struct
        type_name: String,
    },

    /// The environment variable is set but its value could not be converted
    /// into the field's type.
    #[error("Failed to convert environment variable '{key}' for field '{field}': {source}")]
    Conversion {
        /// Identifier of the field being bound
        field: String,
        /// Resolved environment variable name
        key: String,
        /// Underlying parse failure
        #[source]
        source: ParseError,
    },
}

/// Failure of a single string-to-value conversion.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Int(#[from] ParseIntError),

    #[error(transparent)]
    Float(#[from] ParseFloatError),

    #[error("invalid boolean '{0}'")]
    Bool(String),

    /// Parsed successfully but does not fit the declared width.
    #[error("{value} is out of range for {kind}")]
    OutOfRange { value: String, kind: Kind },

    /// Unsigned values are plain digits, without a `+` sign.
    #[error("unsigned value '{0}' must not carry a sign")]
    Signed(String),

    /// A parsed value handed to a leaf of a different kind.
    #[error("{value} cannot be stored as {kind}")]
    Mismatch { value: String, kind: Kind },

    #[error("value is not valid unicode")]
    NotUnicode,
}

impl BindError {
    /// Create a conversion error (used by the binder)
    pub(crate) fn conversion(
        field: impl Into<String>,
        key: impl Into<String>,
        source: ParseError,
    ) -> Self {
        Self::Conversion {
            field: field.into(),
            key: key.into(),
            source,
        }
    }

    /// Create an unsupported field type error (used by the binder)
    pub(crate) fn unsupported(
        field: impl Into<String>,
        key: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self::UnsupportedFieldType {
            field: field.into(),
            key: key.into(),
            type_name: type_name.into(),
        }
    }
}
