//! Small accessor helpers over `serde_json::Value` with default-falling-
//! back lookups (`str_or`, `f64_or`, `bool_or`, `u32_or`...). A typed
//! `serde` struct would force every optional scenario field to be
//! `Option<T>` with manual `unwrap_or` chains at every call site; these
//! helpers keep the scenario parser terse.

use serde_json::Value;

/// Looks up `field`, returning `default` if absent, null, or the wrong
/// JSON type, rather than surfacing a type error.
pub trait JsonExt {
    fn field(&self, name: &str) -> &Value;
    fn str_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str;
    fn owned_str_or(&self, name: &str, default: &str) -> String;
    fn f64_or(&self, name: &str, default: f64) -> f64;
    fn bool_or(&self, name: &str, default: bool) -> bool;
    fn u32_or(&self, name: &str, default: u32) -> u32;
    fn has_key(&self, name: &str) -> bool;
}

impl JsonExt for Value {
    fn field(&self, name: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.get(name).unwrap_or(&NULL)
    }

    fn str_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).and_then(Value::as_str).unwrap_or(default)
    }

    fn owned_str_or(&self, name: &str, default: &str) -> String {
        self.str_or(name, default).to_string()
    }

    fn f64_or(&self, name: &str, default: f64) -> f64 {
        self.get(name).and_then(Value::as_f64).unwrap_or(default)
    }

    fn bool_or(&self, name: &str, default: bool) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(default)
    }

    fn u32_or(&self, name: &str, default: u32) -> u32 {
        self.get(name).and_then(Value::as_u64).map(|v| v as u32).unwrap_or(default)
    }

    fn has_key(&self, name: &str) -> bool {
        self.get(name).map(|v| !v.is_null()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_field_falls_back_to_default() {
        let v = json!({"a": 1});
        assert_eq!(v.f64_or("missing", 42.0), 42.0);
        assert_eq!(v.str_or("missing", "fallback"), "fallback");
    }

    #[test]
    fn present_field_overrides_default() {
        let v = json!({"sma": 7000000.0, "name": "sat-1"});
        assert_eq!(v.f64_or("sma", 0.0), 7000000.0);
        assert_eq!(v.str_or("name", ""), "sat-1");
    }

    #[test]
    fn null_field_counts_as_absent() {
        let v = json!({"assignedHvaId": null});
        assert!(!v.has_key("assignedHvaId"));
    }
}
