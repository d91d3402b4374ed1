//! Context - Configuration values handed to the stack builder
//!
//! Context keys come from the project config file and `-c key=value`
//! CLI overrides. The builder reads them before declaring any resource.

use std::collections::HashMap;

/// Error for missing configuration
#[derive(Debug, Clone, thiserror::Error)]
pub enum ContextError {
    #[error("Missing required context key '{key}'. Set it in cirrus.json or pass -c {key}=...")]
    MissingKey { key: String },
}

/// String-keyed configuration map
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: HashMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Get a key or fail with a descriptive error
    pub fn require(&self, key: &str) -> Result<&str, ContextError> {
        self.get(key).ok_or_else(|| ContextError::MissingKey {
            key: key.to_string(),
        })
    }

    /// Get a key, falling back to a default
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }
}

impl FromIterator<(String, String)> for Context {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_present_key() {
        let ctx = Context::new().with("email", "ops@example.com");
        assert_eq!(ctx.require("email").unwrap(), "ops@example.com");
    }

    #[test]
    fn require_missing_key_fails() {
        let ctx = Context::new();
        let err = ctx.require("email").unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn get_or_falls_back() {
        let ctx = Context::new();
        assert_eq!(ctx.get_or("region", "us-east-1"), "us-east-1");
    }
}
