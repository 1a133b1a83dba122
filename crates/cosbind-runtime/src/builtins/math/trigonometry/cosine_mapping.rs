//! Mapping cosine entry point: same keys, cosine-transformed values.

use cosbind_macros::runtime_builtin;
use cosbind_values::{BindError, MapValue, Value};

use crate::BuiltinResult;

#[runtime_builtin(
    name = "cosine_mapping",
    category = "math/trigonometry",
    summary = "Cosine of every value of a string-keyed numeric mapping.",
    keywords = "cos,cosine,mapping,dictionary",
    examples = "y = cosine_mapping(m)"
)]
fn cosine_mapping_builtin(value: Value) -> BuiltinResult {
    let input = match value {
        Value::Map(m) => m,
        other => {
            return Err(BindError::type_mismatch(format!(
                "cosine_mapping: expected a string-keyed mapping, got {other:?}"
            )))
        }
    };
    let mut out = MapValue::new();
    out.try_reserve(input.len()).map_err(|_| {
        BindError::alloc(format!(
            "cosine_mapping: cannot allocate output mapping of {} entries",
            input.len()
        ))
    })?;
    log::trace!("cosine_mapping: {} entries", input.len());
    for (key, value) in input.iter() {
        let name = match key {
            Value::String(s) => s,
            other => {
                return Err(BindError::key_type(format!(
                    "cosine_mapping: all keys in the mapping must be strings, got {other:?}"
                )))
            }
        };
        // Strict value check: doubles and integers only, no logical promotion.
        let x = match value {
            Value::Num(n) => *n,
            Value::Int(i) => f64::from(*i),
            other => {
                return Err(BindError::value_type(format!(
                    "cosine_mapping: all values in the mapping must be numeric, got {other:?} for key '{name}'"
                )))
            }
        };
        out.insert(Value::String(name.clone()), Value::Num(x.cos()));
    }
    Ok(Value::Map(out))
}
