//! Scalar cosine entry point: one number in, its cosine out.

use cosbind_macros::runtime_builtin;
use cosbind_values::Value;

use crate::builtins::common::scalar;
use crate::BuiltinResult;

#[runtime_builtin(
    name = "cosine_scalar",
    category = "math/trigonometry",
    summary = "Cosine of a single numeric value in radians.",
    keywords = "cos,cosine,scalar,trigonometry",
    examples = "y = cosine_scalar(0.0)"
)]
fn cosine_scalar_builtin(value: Value) -> BuiltinResult {
    let x = scalar::value_into_scalar_for("cosine_scalar", &value)?;
    Ok(Value::Num(x.cos()))
}
