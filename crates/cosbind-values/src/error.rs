use thiserror::Error;

/// Typed failure surface for host-boundary calls.
///
/// Every failure a builtin can produce falls into one of these categories so
/// the embedding host can branch on kind instead of parsing messages. The
/// message text carries the builtin name prefix in the runtime's usual style.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The argument (or argument count) has the wrong kind for the builtin.
    #[error("{0}")]
    TypeMismatch(String),
    /// A mapping key is not a string.
    #[error("{0}")]
    KeyType(String),
    /// A mapping value is not numeric.
    #[error("{0}")]
    ValueType(String),
    /// Output storage could not be allocated; no partial output exists.
    #[error("{0}")]
    Alloc(String),
    /// The requested builtin name is not registered.
    #[error("{0}")]
    UnknownBuiltin(String),
}

impl BindError {
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::TypeMismatch(message.into())
    }

    pub fn key_type(message: impl Into<String>) -> Self {
        Self::KeyType(message.into())
    }

    pub fn value_type(message: impl Into<String>) -> Self {
        Self::ValueType(message.into())
    }

    pub fn alloc(message: impl Into<String>) -> Self {
        Self::Alloc(message.into())
    }

    pub fn unknown_builtin(name: &str) -> Self {
        Self::UnknownBuiltin(format!("unknown builtin '{name}'"))
    }

    /// Stable identifier for callers that dispatch on error kind.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::TypeMismatch(_) => "CosBind:TypeMismatch",
            Self::KeyType(_) => "CosBind:KeyTypeError",
            Self::ValueType(_) => "CosBind:ValueTypeError",
            Self::Alloc(_) => "CosBind:AllocationError",
            Self::UnknownBuiltin(_) => "CosBind:UnknownBuiltin",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::TypeMismatch(m)
            | Self::KeyType(m)
            | Self::ValueType(m)
            | Self::Alloc(m)
            | Self::UnknownBuiltin(m) => m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_distinct_per_category() {
        let errors = [
            BindError::type_mismatch("a"),
            BindError::key_type("b"),
            BindError::value_type("c"),
            BindError::alloc("d"),
            BindError::unknown_builtin("nope"),
        ];
        let mut seen: Vec<&str> = errors.iter().map(|e| e.identifier()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), errors.len());
    }

    #[test]
    fn display_matches_message() {
        let err = BindError::type_mismatch("cosine_scalar: expected a numeric scalar");
        assert_eq!(err.to_string(), err.message());
        assert_eq!(err.identifier(), "CosBind:TypeMismatch");
    }

    #[test]
    fn unknown_builtin_names_the_function() {
        let err = BindError::unknown_builtin("cosine_cubed");
        assert!(err.message().contains("cosine_cubed"));
    }
}
