//! Action return values to text.

use serde_json::Value;

/// Converts whatever an action returned into menu text.
pub trait ValueNormalizer: Send + Sync {
    fn to_text(&self, value: Value) -> String;
}

/// The default normalizer.
///
/// Strings pass through untouched. Arrays flatten to one line per leaf.
/// `null` is empty. Other scalars print as themselves and objects as YAML.
///
/// ```rust
/// use serde_json::json;
/// use treeline_dispatch::{OutlineNormalizer, ValueNormalizer};
///
/// assert_eq!(OutlineNormalizer.to_text(json!("hi")), "hi");
/// assert_eq!(OutlineNormalizer.to_text(json!(["a", ["b", 3]])), "a\nb\n3\n");
/// assert_eq!(OutlineNormalizer.to_text(json!(null)), "");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineNormalizer;

impl ValueNormalizer for OutlineNormalizer {
    fn to_text(&self, value: Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s,
            Value::Array(items) => {
                let mut out = String::new();
                flatten_into(items, &mut out);
                out
            }
            Value::Object(_) => {
                serde_yaml::to_string(&value).unwrap_or_else(|_| value.to_string())
            }
            other => other.to_string(),
        }
    }
}

fn flatten_into(items: Vec<Value>, out: &mut String) {
    for item in items {
        match item {
            Value::Array(inner) => flatten_into(inner, out),
            Value::Null => {}
            Value::String(s) => {
                out.push_str(&s);
                out.push('\n');
            }
            other => {
                out.push_str(&other.to_string());
                out.push('\n');
            }
        }
    }
}
