use serde_json::Value;

/// Recursively update `base` with `fragment`. Objects are merged key by key;
/// any other value in the fragment replaces what was there.
pub fn merge(base: &mut Value, fragment: Value) {
    match (base, fragment) {
        (Value::Object(base), Value::Object(fragment)) => {
            for (key, value) in fragment {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, fragment) => *base = fragment,
    }
}

/// Whether a compiled session has the parts every analysis needs.
pub fn is_complete(session: &Value) -> bool {
    ["metadata", "answers", "info"]
        .iter()
        .all(|key| {
            session
                .get(key)
                .is_some()
        })
}
