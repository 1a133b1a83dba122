use std::collections::HashMap;

use cosbind_values::{builtin_functions, BindError, BuiltinFunction, Value};
use once_cell::sync::Lazy;

static BUILTIN_INDEX: Lazy<HashMap<&'static str, &'static BuiltinFunction>> =
    Lazy::new(|| builtin_functions().into_iter().map(|b| (b.name, b)).collect());

/// Call a registered builtin by name.
///
/// This is the in-process surface an embedding host routes through: the host
/// supplies the argument `Value`s and consumes the returned one. Unregistered
/// names surface as [`BindError::UnknownBuiltin`].
pub fn call_builtin(name: &str, args: &[Value]) -> Result<Value, BindError> {
    let builtin = BUILTIN_INDEX
        .get(name)
        .ok_or_else(|| BindError::unknown_builtin(name))?;
    log::trace!("dispatch {name} ({} args)", args.len());
    (builtin.implementation)(args)
}

/// Names of all registered builtins, sorted for stable introspection output.
pub fn builtin_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = BUILTIN_INDEX.keys().copied().collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_is_a_typed_error() {
        let err = call_builtin("cosine_cubed", &[]).expect_err("expected error");
        assert!(matches!(err, BindError::UnknownBuiltin(_)));
        assert_eq!(err.identifier(), "CosBind:UnknownBuiltin");
    }

    #[test]
    fn all_three_entry_points_are_registered() {
        let names = builtin_names();
        for expected in ["cosine_array", "cosine_mapping", "cosine_scalar"] {
            assert!(names.contains(&expected), "missing builtin {expected}");
        }
    }

    #[test]
    fn registry_records_parameter_metadata() {
        let builtin = builtin_functions()
            .into_iter()
            .find(|b| b.name == "cosine_scalar")
            .expect("cosine_scalar registered");
        assert_eq!(builtin.category, "math/trigonometry");
        assert_eq!(builtin.param_types.len(), 1);
    }
}
