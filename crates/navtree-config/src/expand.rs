//! `${VAR}` and `${VAR:-default}` expansion for navigation file values.

use crate::ConfigError;

/// Variable that was referenced without a default but is not set.
struct UnsetVar(String);

/// Expand braced environment variable references in `value`.
///
/// Strings without `${` are returned as is, so bare `$` in URLs survives.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| match std::env::var(var) {
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(UnsetVar(var.to_owned())),
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_var_inside_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NAVTREE_TEST_HOST", "docs.example.com");
        }
        let result = expand_env("https://${NAVTREE_TEST_HOST}/guide", "items.guide.url").unwrap();
        assert_eq!(result, "https://docs.example.com/guide");
        unsafe {
            std::env::remove_var("NAVTREE_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("NAVTREE_TEST_UNSET");
        }
        let result = expand_env("${NAVTREE_TEST_UNSET:-}/docs", "items.docs.url").unwrap();
        assert_eq!(result, "/docs");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("NAVTREE_TEST_MISSING");
        }
        let err = expand_env("${NAVTREE_TEST_MISSING}/docs", "items.docs.url").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("NAVTREE_TEST_MISSING"));
        assert!(err.to_string().contains("items.docs.url"));
    }

    #[test]
    fn test_bare_dollar_kept() {
        assert_eq!(expand_env("/price/$5", "items.price.url").unwrap(), "/price/$5");
    }
}
