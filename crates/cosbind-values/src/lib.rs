pub use inventory;
use std::collections::TryReserveError;
use std::convert::TryFrom;
use std::fmt;

mod error;
pub use error::BindError;

/// A value as seen from the embedding host's side of the boundary.
///
/// Every builtin receives and returns `Value`s; the typed Rust signatures
/// underneath are bridged by the `TryFrom`/`From` conversions below.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Num(f64),
    Bool(bool),
    String(String),
    Tensor(Tensor),
    Map(MapValue),
}

/// Dense n-dimensional numeric buffer, column-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    pub data: Vec<f64>,
    pub shape: Vec<usize>,
    pub rows: usize, // Compatibility for 2D usage
    pub cols: usize, // Compatibility for 2D usage
}

impl Tensor {
    pub fn new(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, String> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(format!(
                "Tensor data length {} doesn't match shape {:?} ({} elements)",
                data.len(),
                shape,
                expected
            ));
        }
        let (rows, cols) = dims_2d(&shape);
        Ok(Tensor {
            data,
            shape,
            rows,
            cols,
        })
    }

    pub fn new_2d(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self, String> {
        Self::new(data, vec![rows, cols])
    }

    pub fn zeros(shape: Vec<usize>) -> Self {
        let size: usize = shape.iter().product();
        let (rows, cols) = dims_2d(&shape);
        Tensor {
            data: vec![0.0; size],
            shape,
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.shape.first().copied().unwrap_or(1)
    }

    pub fn cols(&self) -> usize {
        self.shape.get(1).copied().unwrap_or(1)
    }

    pub fn element_count(&self) -> usize {
        self.data.len()
    }

    pub fn get2(&self, row: usize, col: usize) -> Result<f64, String> {
        let rows = self.rows();
        let cols = self.cols();
        if row >= rows || col >= cols {
            return Err(format!(
                "Index ({row}, {col}) out of bounds for {rows}x{cols} tensor"
            ));
        }
        // Column-major linearization: lin = row + col*rows
        Ok(self.data[row + col * rows])
    }

    pub fn set2(&mut self, row: usize, col: usize, value: f64) -> Result<(), String> {
        let rows = self.rows();
        let cols = self.cols();
        if row >= rows || col >= cols {
            return Err(format!(
                "Index ({row}, {col}) out of bounds for {rows}x{cols} tensor"
            ));
        }
        self.data[row + col * rows] = value;
        Ok(())
    }
}

fn dims_2d(shape: &[usize]) -> (usize, usize) {
    if shape.len() >= 2 {
        (shape[0], shape[1])
    } else if shape.len() == 1 {
        (1, shape[0])
    } else {
        (0, 0)
    }
}

/// Host-side associative collection, entries kept in insertion order.
///
/// Keys are `Value`s rather than `String`s: the host can hand over a mapping
/// whose keys are not strings, and the transform rejects them at runtime.
/// Inserting under an existing key replaces the previous value, so maps built
/// through `insert` have unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapValue {
    entries: Vec<(Value, Value)>,
}

impl MapValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fallibly grow the backing storage before a bulk build.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.entries.try_reserve_exact(additional)
    }

    pub fn insert(&mut self, key: Value, value: Value) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find_map(|(k, v)| match k {
            Value::String(s) if s == key => Some(v),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Value, Value)> {
        self.entries.iter()
    }

    /// String keys in entry order; non-string keys are skipped.
    pub fn string_keys(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|(k, _)| match k {
                Value::String(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl FromIterator<(Value, Value)> for MapValue {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut map = MapValue::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

// From implementations for Value
impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Num(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Tensor> for Value {
    fn from(t: Tensor) -> Self {
        Value::Tensor(t)
    }
}

impl From<MapValue> for Value {
    fn from(m: MapValue) -> Self {
        Value::Map(m)
    }
}

// TryFrom implementations for extracting native types
impl TryFrom<&Value> for i32 {
    type Error = BindError;
    fn try_from(v: &Value) -> Result<Self, Self::Error> {
        match v {
            Value::Int(i) => Ok(*i),
            Value::Num(n) => Ok(*n as i32),
            _ => Err(BindError::type_mismatch(format!(
                "cannot convert {v:?} to i32"
            ))),
        }
    }
}

impl TryFrom<&Value> for f64 {
    type Error = BindError;
    fn try_from(v: &Value) -> Result<Self, Self::Error> {
        match v {
            Value::Num(n) => Ok(*n),
            Value::Int(i) => Ok(*i as f64),
            _ => Err(BindError::type_mismatch(format!(
                "cannot convert {v:?} to f64"
            ))),
        }
    }
}

impl TryFrom<&Value> for bool {
    type Error = BindError;
    fn try_from(v: &Value) -> Result<Self, Self::Error> {
        match v {
            Value::Bool(b) => Ok(*b),
            Value::Int(i) => Ok(*i != 0),
            Value::Num(n) => Ok(*n != 0.0),
            _ => Err(BindError::type_mismatch(format!(
                "cannot convert {v:?} to bool"
            ))),
        }
    }
}

impl TryFrom<&Value> for String {
    type Error = BindError;
    fn try_from(v: &Value) -> Result<Self, Self::Error> {
        match v {
            Value::String(s) => Ok(s.clone()),
            Value::Int(i) => Ok(i.to_string()),
            Value::Num(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            _ => Err(BindError::type_mismatch(format!(
                "cannot convert {v:?} to String"
            ))),
        }
    }
}

impl TryFrom<&Value> for Tensor {
    type Error = BindError;
    fn try_from(v: &Value) -> Result<Self, Self::Error> {
        match v {
            Value::Tensor(t) => Ok(t.clone()),
            _ => Err(BindError::type_mismatch(format!(
                "cannot convert {v:?} to Tensor"
            ))),
        }
    }
}

impl TryFrom<&Value> for MapValue {
    type Error = BindError;
    fn try_from(v: &Value) -> Result<Self, Self::Error> {
        match v {
            Value::Map(m) => Ok(m.clone()),
            _ => Err(BindError::type_mismatch(format!(
                "cannot convert {v:?} to MapValue"
            ))),
        }
    }
}

impl TryFrom<&Value> for Value {
    type Error = BindError;
    fn try_from(v: &Value) -> Result<Self, Self::Error> {
        Ok(v.clone())
    }
}

use serde::{Deserialize, Serialize};

/// Parameter/return type metadata recorded for each registered builtin.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum Type {
    Int,
    Num,
    Bool,
    String,
    /// Tensor type with optional shape information (column-major semantics)
    Tensor {
        shape: Option<Vec<Option<usize>>>,
    },
    Map,
    Void,
    Unknown,
}

impl Type {
    /// Tensor type with unknown shape.
    pub fn tensor() -> Self {
        Type::Tensor { shape: None }
    }

    pub fn from_value(value: &Value) -> Type {
        match value {
            Value::Int(_) => Type::Int,
            Value::Num(_) => Type::Num,
            Value::Bool(_) => Type::Bool,
            Value::String(_) => Type::String,
            Value::Tensor(t) => Type::Tensor {
                shape: Some(t.shape.iter().map(|&d| Some(d)).collect()),
            },
            Value::Map(_) => Type::Map,
        }
    }
}

/// Record describing one registered builtin, discoverable through `inventory`.
#[derive(Debug, Clone)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub summary: &'static str,
    pub category: &'static str,
    pub keywords: &'static str,
    pub examples: &'static str,
    pub param_types: Vec<Type>,
    pub return_type: Type,
    pub implementation: fn(&[Value]) -> Result<Value, BindError>,
}

impl BuiltinFunction {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &'static str,
        summary: &'static str,
        category: &'static str,
        keywords: &'static str,
        examples: &'static str,
        param_types: Vec<Type>,
        return_type: Type,
        implementation: fn(&[Value]) -> Result<Value, BindError>,
    ) -> Self {
        Self {
            name,
            summary,
            category,
            keywords,
            examples,
            param_types,
            return_type,
            implementation,
        }
    }
}

inventory::collect!(BuiltinFunction);

pub fn builtin_functions() -> Vec<&'static BuiltinFunction> {
    inventory::iter::<BuiltinFunction>.into_iter().collect()
}

// ----------------------
// Display implementations
// ----------------------

fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() {
            "-Inf"
        } else {
            "Inf"
        }
        .to_string();
    }
    if value == 0.0 {
        // Normalize -0.0 to 0
        return "0".to_string();
    }
    format!("{value}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Num(n) => write!(f, "{}", format_number(*n)),
            Value::Bool(b) => write!(f, "{}", if *b { 1 } else { 0 }),
            Value::String(s) => write!(f, "'{s}'"),
            Value::Tensor(t) => write!(f, "{t}"),
            Value::Map(m) => write!(f, "{m}"),
        }
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape.len() {
            0 | 1 => {
                // Treat as row vector for display
                write!(f, "[")?;
                for (i, v) in self.data.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", format_number(*v))?;
                }
                write!(f, "]")
            }
            2 => {
                let rows = self.rows();
                let cols = self.cols();
                write!(f, "[")?;
                for r in 0..rows {
                    for c in 0..cols {
                        if c > 0 {
                            write!(f, " ")?;
                        }
                        write!(f, "{}", format_number(self.data[r + c * rows]))?;
                    }
                    if r + 1 < rows {
                        write!(f, "; ")?;
                    }
                }
                write!(f, "]")
            }
            _ => write!(f, "Tensor(shape={:?})", self.shape),
        }
    }
}

impl fmt::Display for MapValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        write!(f, "}}")
    }
}
