//! Environment variable helpers

use std::env;

/// Environment variable utilities
#[derive(Debug)]
pub struct EnvUtils;

impl EnvUtils {
    /// Get a non-empty environment variable
    pub fn get_var(key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.is_empty())
    }

    /// Get an environment variable with a default value
    pub fn get_var_or_default(key: &str, default: &str) -> String {
        Self::get_var(key).unwrap_or_else(|| default.to_string())
    }

    /// Set environment variable
    #[cfg(test)]
    pub fn set_var<K, V>(key: K, value: V)
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        unsafe { env::set_var(key.as_ref(), value.as_ref()) }
    }

    /// Remove environment variable
    #[cfg(test)]
    pub fn remove_var<K: AsRef<str>>(key: K) {
        unsafe { env::remove_var(key.as_ref()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_utils() {
        // Test default value
        let value = EnvUtils::get_var_or_default("J2_ENV_TEST_NONEXISTENT", "default");
        assert_eq!(value, "default");

        // Test set and get
        EnvUtils::set_var("J2_ENV_TEST_VAR", "test_value");
        assert_eq!(
            EnvUtils::get_var("J2_ENV_TEST_VAR"),
            Some("test_value".to_string())
        );

        // Empty values count as unset
        EnvUtils::set_var("J2_ENV_TEST_EMPTY", "");
        assert_eq!(EnvUtils::get_var("J2_ENV_TEST_EMPTY"), None);
        assert_eq!(
            EnvUtils::get_var_or_default("J2_ENV_TEST_EMPTY", "fallback"),
            "fallback"
        );

        // Clean up
        EnvUtils::remove_var("J2_ENV_TEST_VAR");
        EnvUtils::remove_var("J2_ENV_TEST_EMPTY");
        assert_eq!(EnvUtils::get_var("J2_ENV_TEST_VAR"), None);
    }
}
