use serde::Serialize;
use serde_json::Value;

/// Serialize `input` and drop every `null`, recursively.
///
/// Unset command-line options serialize as `null`; removing them keeps them
/// from shadowing values coming from files or the environment.
pub fn without_nulls<T: Serialize>(input: T) -> Value {
    let mut value = serde_json::to_value(input).unwrap_or(Value::Null);
    strip_nulls(&mut value);
    value
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            for v in map.values_mut() {
                strip_nulls(v);
            }
            // Sections left empty would still replace nothing, drop them too
            map.retain(|_, v| !matches!(v, Value::Object(inner) if inner.is_empty()));
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}
