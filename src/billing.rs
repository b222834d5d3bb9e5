use serde_json::Value;

/// Decorates an object payload with a `karma_cost` key before it leaves the
/// dispatch shell: numeric costs pass through, everything else reads null so
/// callers can rely on the key being present. Non-object payloads are
/// returned untouched.
pub fn with_karma_cost(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) => {
            let cost = map
                .get("karma_cost")
                .filter(|value| value.is_number())
                .cloned()
                .unwrap_or(Value::Null);
            map.insert("karma_cost".to_string(), cost);
            Value::Object(map)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_cost_passes_through() {
        let decorated = with_karma_cost(json!({ "ok": true, "karma_cost": 12 }));
        assert_eq!(decorated, json!({ "ok": true, "karma_cost": 12 }));
    }

    #[test]
    fn missing_cost_reads_null() {
        let decorated = with_karma_cost(json!({ "ok": true }));
        assert_eq!(decorated, json!({ "ok": true, "karma_cost": null }));
    }

    #[test]
    fn non_numeric_cost_is_nulled() {
        let decorated = with_karma_cost(json!({ "karma_cost": "free" }));
        assert_eq!(decorated, json!({ "karma_cost": null }));
    }

    #[test]
    fn non_object_payloads_are_untouched() {
        assert_eq!(with_karma_cost(json!([1, 2])), json!([1, 2]));
        assert_eq!(with_karma_cost(json!("text")), json!("text"));
    }
}
