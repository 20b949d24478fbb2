//! Environment variable key derivation

/// Convert a field identifier into its environment variable name.
///
/// Every character is uppercased, and a `_` is inserted before each character
/// that was uppercase in the identifier, except the first one. Digits,
/// lowercase letters and existing underscores never add a separator.
///
/// ```rust
/// assert_eq!(envbind::env_key("AbCdE"), "AB_CD_E");
/// assert_eq!(envbind::env_key("Ab1Cde"), "AB1_CDE");
/// assert_eq!(envbind::env_key("database_url"), "DATABASE_URL");
/// ```
pub fn env_key(ident: &str) -> String {
    let ident = ident.strip_prefix("r#").unwrap_or(ident);
    let mut key = String::with_capacity(ident.len() + ident.len() / 2);

    for (i, c) in ident.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            key.push('_');
        }
        key.extend(c.to_uppercase());
    }

    key
}

/// Join prefix segments and a name with `_`, segments first.
pub(crate) fn join(prefix: &[String], name: &str) -> String {
    if prefix.is_empty() {
        return name.to_string();
    }

    let mut key = prefix.join("_");
    key.push('_');
    key.push_str(name);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_uppercase() {
        assert_eq!(env_key("A"), "A");
    }

    #[test]
    fn test_consecutive_uppercase_are_split() {
        assert_eq!(env_key("AB"), "A_B");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(env_key("Ab"), "AB");
        assert_eq!(env_key("AbC"), "AB_C");
        assert_eq!(env_key("AbCdE"), "AB_CD_E");
    }

    #[test]
    fn test_digits_do_not_split() {
        assert_eq!(env_key("Ab1Cde"), "AB1_CDE");
        assert_eq!(env_key("Level2String"), "LEVEL2_STRING");
    }

    #[test]
    fn test_snake_case_identifier() {
        assert_eq!(env_key("level2_string"), "LEVEL2_STRING");
        assert_eq!(env_key("max_connections"), "MAX_CONNECTIONS");
    }

    #[test]
    fn test_hyphen_is_kept() {
        assert_eq!(env_key("a-b"), "A-B");
    }

    #[test]
    fn test_raw_identifier() {
        assert_eq!(env_key("r#type"), "TYPE");
    }

    #[test]
    fn test_join() {
        assert_eq!(join(&[], "PORT"), "PORT");
        assert_eq!(
            join(&["APP".to_string(), "DB".to_string()], "PORT"),
            "APP_DB_PORT"
        );
    }
}
