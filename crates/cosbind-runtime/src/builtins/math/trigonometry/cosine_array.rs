//! Array cosine entry point: a fresh same-shape buffer of elementwise cosines.

use cosbind_macros::runtime_builtin;
use cosbind_values::{BindError, Tensor, Value};

use crate::BuiltinResult;

#[runtime_builtin(
    name = "cosine_array",
    category = "math/trigonometry",
    summary = "Cosine of every element of an n-dimensional numeric buffer.",
    keywords = "cos,cosine,array,tensor,elementwise",
    examples = "y = cosine_array([0.0 pi])"
)]
fn cosine_array_builtin(value: Value) -> BuiltinResult {
    let input = match value {
        Value::Tensor(t) => t,
        other => {
            return Err(BindError::type_mismatch(format!(
                "cosine_array: expected a numeric array, got {other:?}"
            )))
        }
    };
    cos_tensor(&input).map(Value::Tensor)
}

fn cos_tensor(input: &Tensor) -> BuiltinResult<Tensor> {
    let total = input.element_count();
    let mut data: Vec<f64> = Vec::new();
    data.try_reserve_exact(total).map_err(|_| {
        BindError::alloc(format!(
            "cosine_array: cannot allocate output buffer of {total} elements"
        ))
    })?;
    data.resize(total, 0.0);
    log::trace!("cosine_array: {total} elements, shape {:?}", input.shape);
    // Input and output advance over the same flattened index space, so
    // position i of one traversal corresponds to position i of the other.
    for (dst, src) in data.iter_mut().zip(input.data.iter()) {
        *dst = src.cos();
    }
    Tensor::new(data, input.shape.clone())
        .map_err(|e| BindError::type_mismatch(format!("cosine_array: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elementwise_over_a_vector() {
        let tensor = Tensor::new(vec![0.0, 3.14159265358979], vec![2, 1]).unwrap();
        let result = cosine_array_builtin(Value::Tensor(tensor)).expect("cosine_array");
        match result {
            Value::Tensor(t) => {
                assert_eq!(t.shape, vec![2, 1]);
                assert!((t.data[0] - 1.0).abs() < 1e-12);
                assert!((t.data[1] + 1.0).abs() < 1e-12);
            }
            other => panic!("expected tensor result, got {other:?}"),
        }
    }

    #[test]
    fn output_shape_matches_input_shape() {
        let tensor = Tensor::new((0..24).map(f64::from).collect(), vec![2, 3, 4]).unwrap();
        let result = cosine_array_builtin(Value::Tensor(tensor.clone())).expect("cosine_array");
        match result {
            Value::Tensor(t) => {
                assert_eq!(t.shape, tensor.shape);
                for (out, src) in t.data.iter().zip(tensor.data.iter()) {
                    assert_eq!(*out, src.cos());
                }
            }
            other => panic!("expected tensor result, got {other:?}"),
        }
    }

    #[test]
    fn one_element_buffer_stays_a_buffer() {
        let tensor = Tensor::new(vec![0.0], vec![1, 1]).unwrap();
        let result = cosine_array_builtin(Value::Tensor(tensor)).expect("cosine_array");
        match result {
            Value::Tensor(t) => {
                assert_eq!(t.shape, vec![1, 1]);
                assert!((t.data[0] - 1.0).abs() < 1e-12);
            }
            other => panic!("expected tensor result, got {other:?}"),
        }
    }

    #[test]
    fn empty_buffer_yields_empty_buffer_of_same_shape() {
        let tensor = Tensor::new(Vec::new(), vec![0, 3]).unwrap();
        let result = cosine_array_builtin(Value::Tensor(tensor)).expect("cosine_array");
        match result {
            Value::Tensor(t) => {
                assert_eq!(t.shape, vec![0, 3]);
                assert!(t.data.is_empty());
            }
            other => panic!("expected tensor result, got {other:?}"),
        }
    }

    #[test]
    fn input_is_not_mutated() {
        let tensor = Tensor::new(vec![0.5, 1.5, 2.5], vec![3, 1]).unwrap();
        let before = tensor.clone();
        let _ = cosine_array_builtin(Value::Tensor(tensor.clone())).expect("cosine_array");
        assert_eq!(tensor, before);
    }

    #[test]
    fn nan_and_inf_elements_follow_ieee_semantics() {
        let tensor = Tensor::new(vec![f64::NAN, f64::INFINITY, 0.0], vec![3, 1]).unwrap();
        let result = cosine_array_builtin(Value::Tensor(tensor)).expect("cosine_array");
        match result {
            Value::Tensor(t) => {
                assert!(t.data[0].is_nan());
                assert!(t.data[1].is_nan());
                assert!((t.data[2] - 1.0).abs() < 1e-12);
            }
            other => panic!("expected tensor result, got {other:?}"),
        }
    }

    #[test]
    fn scalar_input_is_a_type_mismatch() {
        let err = cosine_array_builtin(Value::Num(0.0)).expect_err("expected error");
        assert!(matches!(err, BindError::TypeMismatch(_)));
        assert_eq!(err.identifier(), "CosBind:TypeMismatch");
    }

    #[test]
    fn map_input_is_a_type_mismatch() {
        let err = cosine_array_builtin(Value::Map(cosbind_values::MapValue::new()))
            .expect_err("expected error");
        assert!(matches!(err, BindError::TypeMismatch(_)));
    }
}
