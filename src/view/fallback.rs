//! Policies deciding when `content()` falls back to its default

use serde_json::Value;

/// Decides whether a stored content value is usable or the default applies
pub trait ContentFallback: Send + Sync {
    /// True if `value` should be returned instead of the default
    fn is_usable(&self, value: &Value) -> bool;

    /// Pick between a stored value (if any) and the caller's default
    fn resolve<'a>(&self, value: Option<&'a Value>, default: &'a Value) -> &'a Value {
        match value {
            Some(value) if self.is_usable(value) => value,
            _ => default,
        }
    }
}

/// Falls back only for null or missing values
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFallback;

impl ContentFallback for NullFallback {
    fn is_usable(&self, value: &Value) -> bool {
        !value.is_null()
    }
}

/// Also falls back for empty strings, arrays and objects
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyFallback;

impl ContentFallback for EmptyFallback {
    fn is_usable(&self, value: &Value) -> bool {
        match value {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            Value::Bool(_) | Value::Number(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_fallback() {
        let default = json!("fallback");
        let stored = json!("");
        assert_eq!(NullFallback.resolve(None, &default), &default);
        assert_eq!(NullFallback.resolve(Some(&Value::Null), &default), &default);
        assert_eq!(NullFallback.resolve(Some(&stored), &default), &stored);
    }

    #[test]
    fn test_empty_fallback() {
        let default = json!("fallback");
        assert_eq!(EmptyFallback.resolve(Some(&json!("")), &default), &default);
        assert_eq!(EmptyFallback.resolve(Some(&json!([])), &default), &default);
        assert_eq!(EmptyFallback.resolve(Some(&json!(0)), &default), &json!(0));
    }
}
