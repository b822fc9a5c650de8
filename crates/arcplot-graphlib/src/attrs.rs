//! Free-form attribute maps attached to edges.

use indexmap::IndexMap;
use serde_json::Value;

/// Ordered attribute map. Values are arbitrary JSON so callers can attach anything; the
/// renderer only ever reads numeric entries such as `"weight"`.
pub type Attrs = IndexMap<String, Value>;

/// Builds an attribute map holding a single `"weight"` entry.
pub fn weighted(weight: f64) -> Attrs {
    let mut attrs = Attrs::new();
    attrs.insert("weight".to_string(), number(weight));
    attrs
}

/// Stores integral weights as JSON integers so they print as `3` rather than `3.0`.
pub(crate) fn number(v: f64) -> Value {
    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Value::from(v as i64)
    } else {
        serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_keeps_integers_integral() {
        let attrs = weighted(3.0);
        assert_eq!(attrs.get("weight"), Some(&Value::from(3)));
    }

    #[test]
    fn weighted_keeps_fractions() {
        let attrs = weighted(0.25);
        assert_eq!(attrs.get("weight").and_then(Value::as_f64), Some(0.25));
    }
}
