use cosbind_values::{BindError, Value};

/// Coerce a host value into a double while customising the builtin name in
/// error messages.
///
/// Integers and logicals promote to double the way the host's numeric
/// argument parse does; everything else is a type mismatch.
pub fn value_into_scalar_for(name: &str, value: &Value) -> Result<f64, BindError> {
    match value {
        Value::Num(n) => Ok(*n),
        Value::Int(i) => Ok(*i as f64),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        other => Err(BindError::type_mismatch(format!(
            "{name}: expected a numeric scalar, got {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotes_int_and_bool() {
        assert_eq!(value_into_scalar_for("t", &Value::Int(3)).unwrap(), 3.0);
        assert_eq!(value_into_scalar_for("t", &Value::Bool(true)).unwrap(), 1.0);
        assert_eq!(
            value_into_scalar_for("t", &Value::Bool(false)).unwrap(),
            0.0
        );
    }

    #[test]
    fn rejects_non_numeric_with_builtin_name() {
        let err = value_into_scalar_for("cosine_scalar", &Value::from("x"))
            .expect_err("expected error");
        assert!(matches!(err, BindError::TypeMismatch(_)));
        assert!(err.message().starts_with("cosine_scalar:"));
    }
}
