//! Bind environment variables into typed configuration structs
//!
//! `envbind` fills the fields of an existing struct from environment variables.
//! Keys are derived from field names, nested structs add their own name as a
//! prefix, and any field can point at an explicit variable instead.
//!
//! # Features
//!
//! - **Declarative**: Field walk generated with `#[derive(Bind)]`
//! - **In place**: Existing field values are kept when a variable is unset or empty
//! - **Nested records**: `LEVEL1_LEVEL2_STRING` binds `level1.level2_string`
//! - **Explicit keys**: `#[env(env_key = "NAME")]` bypasses key derivation
//! - **Type-safe**: Values are range-checked against the declared width
//!
//! # Value Parsing
//!
//! - Strings: taken verbatim
//! - Integers (`i8`..`i64`, `isize`, `u8`..`u64`, `usize`): base 10, range-checked
//! - Floats (`f32`, `f64`): decimal
//! - Booleans: `1 t T TRUE true True` or `0 f F FALSE false False`
//!
//! # Example
//!
//! ```rust
//! use envbind::Bind;
//!
//! #[derive(Debug, Default, Bind)]
//! struct Config {
//!     pub database_url: String,
//!     pub max_connections: u32,
//!     pub cache: Cache,
//! }
//!
//! #[derive(Debug, Default, Bind)]
//! struct Cache {
//!     pub ttl_secs: u64,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("DATABASE_URL", "postgres://localhost/db");
//! #     std::env::set_var("CACHE_TTL_SECS", "60");
//! let mut config = Config {
//!     max_connections: 10,
//!     ..Default::default()
//! };
//! envbind::bind(&mut config)?;
//! assert_eq!(config.database_url, "postgres://localhost/db");
//! assert_eq!(config.cache.ttl_secs, 60);
//! #     Ok(())
//! # }
//! ```
//!
//! # Key Derivation
//!
//! Each field name is uppercased, with `_` inserted before every character that
//! was already uppercase (see [`env_key`]). Nested records prepend the keys of
//! their ancestors: field `port` of field `database` reads `DATABASE_PORT`.
//!
//! # Attributes
//!
//! ## `#[env(env_key = "NAME")]`
//!
//! Read the field from `NAME` verbatim. The key is absolute: ancestor prefixes
//! are ignored for leaf fields. On a nested record field it replaces that
//! record's prefix segment.
//!
//! ```rust
//! # use envbind::Bind;
//! #[derive(Default, Bind)]
//! pub struct Config {
//!     // Load from REDIS_URL environment variable
//!     #[env(env_key = "REDIS_URL")]
//!     pub cache_connection_string: String,
//! }
//! ```
//!
//! ## `#[env(nested)]`
//!
//! Treat a generic field type as a nested record. Plain struct types and
//! `Option<T>` of them are recognized without it.
//!
//! Field types are classified by how they are written, not by what they
//! resolve to. A type alias such as `type Port = u16;` is taken for a nested
//! record and fails to compile for lack of a `Bind` impl; spell out the
//! primitive type on such fields instead.
//!
//! # Contract
//!
//! Only mutable references to records can be bound. Primitives, references to
//! primitives and records passed by value are rejected at compile time:
//!
//! ```rust,compile_fail
//! let mut port: u16 = 8080;
//! envbind::bind(&mut port).unwrap();
//! ```
//!
//! ```rust,compile_fail
//! use envbind::Bind;
//!
//! #[derive(Default, Bind)]
//! struct Config {
//!     port: u16,
//! }
//!
//! envbind::bind(Config::default()).unwrap();
//! ```
//!
//! ```rust,compile_fail
//! use envbind::Bind;
//!
//! #[derive(Bind)]
//! enum Mode {
//!     Fast,
//!     Slow,
//! }
//! ```

mod binder;
mod convert;
mod error;
mod key;
mod snapshot;

pub use binder::{Bind, Binder, Field};
pub use convert::{FloatWidth, IntWidth, Kind, Leaf, Value};
pub use envbind_derive::Bind;
pub use error::{BindError, ParseError};
pub use key::env_key;
pub use snapshot::Snapshot;

/// Bind `target` from the current process environment.
///
/// Fields are visited in declaration order, depth first. Binding stops at the
/// first error; fields already bound keep their new values.
///
/// # Errors
///
/// - A field of unsupported type has its environment variable set
/// - An environment variable cannot be converted into its field's type
pub fn bind<T: Bind + ?Sized>(target: &mut T) -> Result<(), BindError> {
    Binder::new().bind(target)
}
