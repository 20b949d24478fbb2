//! Point-in-time copy of the process environment

use std::collections::HashMap;
use std::env;
use std::ffi::{OsStr, OsString};

/// Immutable set of environment variables read by a [`Binder`](crate::Binder).
///
/// A bind call reads every key from one snapshot, so concurrent changes to
/// the process environment cannot be observed halfway through a struct.
/// Variables whose names are not valid Unicode are not captured.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    vars: HashMap<String, OsString>,
}

impl Snapshot {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        env::vars_os()
            .filter_map(|(name, value)| name.into_string().ok().map(|name| (name, value)))
            .collect()
    }

    /// Raw value of `key`, if set
    pub fn get(&self, key: &str) -> Option<&OsStr> {
        self.vars.get(key).map(OsString::as_os_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Snapshot
where
    K: Into<String>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
