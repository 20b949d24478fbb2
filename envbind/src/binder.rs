//! Field walk that binds environment variables into records

use crate::convert::Leaf;
use crate::error::{BindError, ParseError};
use crate::key::{env_key, join};
use crate::snapshot::Snapshot;
use tracing::trace;

/// A record whose fields can be bound from environment variables.
///
/// Usually implemented with `#[derive(Bind)]`. A manual implementation visits
/// each field in declaration order through the [`Binder`]:
///
/// ```rust
/// use envbind::{Bind, BindError, Binder, Field, Snapshot};
///
/// #[derive(Default)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// impl Bind for Server {
///     fn bind_fields(&mut self, binder: &mut Binder) -> Result<(), BindError> {
///         binder.leaf(&mut self.host, &Field::new("host", None))?;
///         binder.leaf(&mut self.port, &Field::new("port", Some("SERVER_PORT")))?;
///         Ok(())
///     }
/// }
///
/// # fn main() -> anyhow::Result<()> {
/// let snapshot: Snapshot = [("HOST", "localhost"), ("SERVER_PORT", "8080")]
///     .into_iter()
///     .collect();
/// let mut server = Server::default();
/// Binder::from_snapshot(snapshot).bind(&mut server)?;
/// assert_eq!(server.host, "localhost");
/// assert_eq!(server.port, 8080);
/// # Ok(())
/// # }
/// ```
pub trait Bind {
    /// Bind every field of `self`, stopping at the first error.
    fn bind_fields(&mut self, binder: &mut Binder) -> Result<(), BindError>;

    /// Build a default value and bind it from the process environment.
    fn from_env() -> Result<Self, BindError>
    where
        Self: Sized + Default,
    {
        let mut value = Self::default();
        crate::bind(&mut value)?;
        Ok(value)
    }
}

impl<T: Bind + ?Sized> Bind for Box<T> {
    fn bind_fields(&mut self, binder: &mut Binder) -> Result<(), BindError> {
        (**self).bind_fields(binder)
    }
}

/// Static description of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    ident: &'static str,
    env_key: Option<&'static str>,
}

impl Field {
    /// `env_key` is the explicit key override; an empty override is ignored.
    pub const fn new(ident: &'static str, env_key: Option<&'static str>) -> Self {
        Self { ident, env_key }
    }

    fn override_key(&self) -> Option<&'static str> {
        self.env_key.filter(|key| !key.is_empty())
    }

    /// Prefix segment contributed by a nested record field
    fn segment(&self) -> String {
        match self.override_key() {
            Some(key) => key.to_string(),
            None => env_key(self.ident),
        }
    }
}

/// Binds environment variables into [`Bind`] records.
///
/// Holds the environment [`Snapshot`] and the key prefix chain accumulated
/// while descending into nested records.
#[derive(Debug)]
pub struct Binder {
    snapshot: Snapshot,
    prefix: Vec<String>,
}

impl Binder {
    /// Binder reading from a fresh snapshot of the process environment
    pub fn new() -> Self {
        Self::from_snapshot(Snapshot::capture())
    }

    /// Binder reading from an explicit set of variables
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            prefix: Vec::new(),
        }
    }

    /// Add a root prefix segment. `prefix("MYAPP")` makes field `port` read
    /// `MYAPP_PORT`. Explicit `env_key` overrides are not affected.
    pub fn prefix(mut self, segment: impl Into<String>) -> Self {
        self.prefix.push(segment.into());
        self
    }

    /// Bind `target` in place.
    ///
    /// # Errors
    ///
    /// - A field of unsupported type has its variable set
    /// - A variable cannot be converted into its field's type
    pub fn bind<T: Bind + ?Sized>(mut self, target: &mut T) -> Result<(), BindError> {
        target.bind_fields(&mut self)
    }

    /// Resolve the environment variable name of a leaf field.
    ///
    /// An explicit override is absolute and ignores the prefix chain.
    pub fn resolve_key(&self, field: &Field) -> String {
        match field.override_key() {
            Some(key) => key.to_string(),
            None => join(&self.prefix, &env_key(field.ident)),
        }
    }

    /// Bind a leaf field. An unset or empty variable leaves `slot` untouched.
    pub fn leaf<T: Leaf>(&mut self, slot: &mut T, field: &Field) -> Result<(), BindError> {
        let key = self.resolve_key(field);
        let Some(raw) = self.lookup(&key, field)? else {
            trace!(field = field.ident, key = %key, "environment variable not set, keeping value");
            return Ok(());
        };

        *slot = T::convert(raw).map_err(|e| BindError::conversion(field.ident, &key, e))?;
        trace!(field = field.ident, key = %key, kind = %T::KIND, "bound field");
        Ok(())
    }

    /// Descend into a nested record, extending the prefix chain by the
    /// field's segment for the duration of the call.
    pub fn nested<T: Bind + ?Sized>(&mut self, slot: &mut T, field: &Field) -> Result<(), BindError> {
        let segment = field.segment();
        trace!(field = field.ident, segment = %segment, "entering nested record");

        self.prefix.push(segment);
        let result = slot.bind_fields(self);
        self.prefix.pop();
        result
    }

    /// Descend into an optional nested record, allocating a default value
    /// first when it is `None`.
    pub fn optional<T: Bind + Default>(
        &mut self,
        slot: &mut Option<T>,
        field: &Field,
    ) -> Result<(), BindError> {
        let inner = slot.get_or_insert_with(T::default);
        self.nested(inner, field)
    }

    /// Field whose type has no conversion. Fails only when its variable is set.
    pub fn unsupported(&mut self, field: &Field, type_name: &str) -> Result<(), BindError> {
        let key = self.resolve_key(field);
        match self.snapshot.get(&key) {
            Some(raw) if !raw.is_empty() => Err(BindError::unsupported(field.ident, key, type_name)),
            _ => Ok(()),
        }
    }

    fn lookup(&self, key: &str, field: &Field) -> Result<Option<&str>, BindError> {
        match self.snapshot.get(key) {
            Some(raw) if !raw.is_empty() => raw
                .to_str()
                .map(Some)
                .ok_or_else(|| BindError::conversion(field.ident, key, ParseError::NotUnicode)),
            _ => Ok(None),
        }
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Inner {
        value: String,
        deep: Deep,
    }

    #[derive(Debug, Default, PartialEq)]
    struct Deep {
        count: u32,
    }

    impl Bind for Deep {
        fn bind_fields(&mut self, binder: &mut Binder) -> Result<(), BindError> {
            binder.leaf(&mut self.count, &Field::new("count", None))
        }
    }

    impl Bind for Inner {
        fn bind_fields(&mut self, binder: &mut Binder) -> Result<(), BindError> {
            binder.leaf(&mut self.value, &Field::new("value", None))?;
            binder.nested(&mut self.deep, &Field::new("deep", None))?;
            Ok(())
        }
    }

    fn binder(vars: &[(&str, &str)]) -> Binder {
        Binder::from_snapshot(vars.iter().copied().collect())
    }

    #[test]
    fn test_resolve_key_uses_prefix_chain() {
        let binder = binder(&[]).prefix("APP").prefix("DB");
        assert_eq!(binder.resolve_key(&Field::new("max_conns", None)), "APP_DB_MAX_CONNS");
    }

    #[test]
    fn test_resolve_key_override_is_absolute() {
        let binder = binder(&[]).prefix("APP");
        assert_eq!(binder.resolve_key(&Field::new("url", Some("DATABASE_URL"))), "DATABASE_URL");
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let binder = binder(&[]);
        assert_eq!(binder.resolve_key(&Field::new("url", Some(""))), "URL");
    }

    #[test]
    fn test_leaf_keeps_value_when_unset_or_empty() {
        let mut b = binder(&[("EMPTY", "")]);
        let mut value = 7u8;
        b.leaf(&mut value, &Field::new("missing", None)).unwrap();
        b.leaf(&mut value, &Field::new("empty", None)).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_nested_prefix_is_popped() {
        let mut inner = Inner::default();
        binder(&[("INNER_VALUE", "v"), ("INNER_DEEP_COUNT", "3")])
            .bind(&mut Outer(&mut inner))
            .unwrap();
        assert_eq!(inner.value, "v");
        assert_eq!(inner.deep.count, 3);
    }

    struct Outer<'a>(&'a mut Inner);

    impl Bind for Outer<'_> {
        fn bind_fields(&mut self, binder: &mut Binder) -> Result<(), BindError> {
            binder.nested(&mut *self.0, &Field::new("inner", None))?;
            assert!(binder.prefix.is_empty());
            Ok(())
        }
    }

    #[test]
    fn test_nested_override_replaces_segment() {
        let mut b = binder(&[("X_VALUE", "v")]);
        let mut inner = Inner::default();
        b.nested(&mut inner, &Field::new("inner", Some("X"))).unwrap();
        assert_eq!(inner.value, "v");
    }

    #[test]
    fn test_optional_allocates() {
        let mut b = binder(&[]);
        let mut slot: Option<Deep> = None;
        b.optional(&mut slot, &Field::new("deep", None)).unwrap();
        assert_eq!(slot, Some(Deep::default()));
    }

    #[test]
    fn test_unsupported_only_fails_when_set() {
        let mut b = binder(&[("LIST", "a,b")]);
        b.unsupported(&Field::new("other", None), "Vec<String>").unwrap();

        let err = b.unsupported(&Field::new("list", None), "Vec<String>").unwrap_err();
        assert!(matches!(
            err,
            BindError::UnsupportedFieldType { ref key, ref type_name, .. }
                if key == "LIST" && type_name == "Vec<String>"
        ));
    }

    #[test]
    fn test_conversion_error_names_key() {
        let mut b = binder(&[("PORT", "http")]);
        let mut port = 0u16;
        let err = b.leaf(&mut port, &Field::new("port", None)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to convert environment variable 'PORT' for field 'port': invalid digit found in string"
        );
        assert_eq!(port, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_value() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let snapshot: Snapshot = [("NAME", OsString::from_vec(vec![0x66, 0x80]))]
            .into_iter()
            .collect();
        let mut name = String::new();
        let err = Binder::from_snapshot(snapshot)
            .leaf(&mut name, &Field::new("name", None))
            .unwrap_err();
        assert!(matches!(
            err,
            BindError::Conversion { source: ParseError::NotUnicode, .. }
        ));
    }
}
