//! Runtime value representation for the GRL interpreter.
//!
//! GRL is dynamically typed across four kinds of value: booleans, numbers,
//! strings, and graphs. Operations pattern-match exhaustively and report a
//! recoverable error on a type mismatch rather than panicking.

use crate::error::{Result, RuntimeError};
use crate::graph::Graph;
use grl_parser::CastTarget;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// A dynamically typed GRL value.
///
/// Value kinds copy on assignment; graphs are shared references, so binding
/// a graph to a second name aliases it instead of duplicating it.
#[derive(Debug, Clone)]
pub enum Value {
    Boolean(bool),
    Number(f64),
    String(String),
    Graph(Rc<RefCell<Graph>>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Graph(_) => "graph",
        }
    }

    // Arithmetic operations

    /// Addition; `+` also concatenates strings.
    pub fn add(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{}{}", a, b))),
            _ => Err(self.operation_error("+", other)),
        }
    }

    pub fn subtract(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
            _ => Err(self.operation_error("-", other)),
        }
    }

    pub fn multiply(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a * b)),
            _ => Err(self.operation_error("*", other)),
        }
    }

    pub fn divide(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                if *b == 0.0 {
                    Err(RuntimeError::DivisionByZero)
                } else {
                    Ok(Value::Number(a / b))
                }
            }
            _ => Err(self.operation_error("/", other)),
        }
    }

    pub fn power(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.powf(*b))),
            _ => Err(self.operation_error("^", other)),
        }
    }

    // Logical operations
    //
    // Both operands are always evaluated before the operator applies, so
    // there is no short-circuiting; these only combine the results.

    pub fn and(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(*a && *b)),
            _ => Err(self.operation_error("AND", other)),
        }
    }

    pub fn or(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(*a || *b)),
            _ => Err(self.operation_error("OR", other)),
        }
    }

    pub fn xor(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(a != b)),
            _ => Err(self.operation_error("XOR", other)),
        }
    }

    pub fn implies(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(!*a || *b)),
            _ => Err(self.operation_error("IMPLIES", other)),
        }
    }

    pub fn negate(&self) -> Result<Value> {
        match self {
            Value::Boolean(value) => Ok(Value::Boolean(!value)),
            _ => Err(RuntimeError::invalid_operation(
                "NOT",
                vec![self.type_name().to_string()],
            )),
        }
    }

    // Comparison operations

    /// Equality works across all types; values of different types are never
    /// equal. Graphs compare by identity, not structure.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Graph(a), Value::Graph(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Ordering comparison for `<`, `<=`, `>`, `>=`; defined for numbers
    /// and strings only.
    pub fn compare(&self, other: &Value) -> Result<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                Ok(a.partial_cmp(b).unwrap_or(Ordering::Equal))
            }
            (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
            _ => Err(self.operation_error("comparison", other)),
        }
    }

    // Casts

    /// Apply an explicit cast form (`TO NUMBER`, `TO STRING`, `TO BOOL`).
    pub fn cast(&self, target: CastTarget) -> Result<Value> {
        match (target, self) {
            (_, Value::Graph(_)) => Err(RuntimeError::invalid_cast(target, self.type_name())),

            (CastTarget::Number, Value::Number(n)) => Ok(Value::Number(*n)),
            (CastTarget::Number, Value::Boolean(b)) => {
                Ok(Value::Number(if *b { 1.0 } else { 0.0 }))
            }
            (CastTarget::Number, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(Value::Number)
                .map_err(|_| RuntimeError::invalid_cast(target, format!("\"{}\"", s))),

            (CastTarget::String, value) => Ok(Value::String(value.to_string())),

            (CastTarget::Boolean, Value::Boolean(b)) => Ok(Value::Boolean(*b)),
            (CastTarget::Boolean, Value::Number(n)) => Ok(Value::Boolean(*n != 0.0)),
            (CastTarget::Boolean, Value::String(s)) => match s.as_str() {
                "TRUE" => Ok(Value::Boolean(true)),
                "FALSE" => Ok(Value::Boolean(false)),
                _ => Err(RuntimeError::invalid_cast(target, format!("\"{}\"", s))),
            },
        }
    }

    fn operation_error(&self, operator: &str, other: &Value) -> RuntimeError {
        RuntimeError::invalid_operation(
            operator,
            vec![self.type_name().to_string(), other.type_name().to_string()],
        )
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

/// Format a number the way GRL prints it: integral values lose the decimal
/// point, everything else uses the shortest float form.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_finite() && n == n.trunc() {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(true) => write!(f, "TRUE"),
            Value::Boolean(false) => write!(f, "FALSE"),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::Graph(graph) => write!(f, "{}", graph.borrow()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Boolean(true).type_name(), "boolean");
        assert_eq!(Value::Number(42.0).type_name(), "number");
        assert_eq!(Value::String("hello".to_string()).type_name(), "string");
    }

    #[test]
    fn test_arithmetic() {
        let a = Value::Number(5.0);
        let b = Value::Number(3.0);

        assert_eq!(a.add(&b).unwrap(), Value::Number(8.0));
        assert_eq!(a.subtract(&b).unwrap(), Value::Number(2.0));
        assert_eq!(a.multiply(&b).unwrap(), Value::Number(15.0));
        assert_eq!(a.divide(&b).unwrap(), Value::Number(5.0 / 3.0));
        assert_eq!(a.power(&b).unwrap(), Value::Number(125.0));
    }

    #[test]
    fn test_string_concatenation() {
        let a = Value::String("hello".to_string());
        let b = Value::String(" world".to_string());

        assert_eq!(a.add(&b).unwrap(), Value::String("hello world".to_string()));
    }

    #[test]
    fn test_division_by_zero() {
        let a = Value::Number(5.0);
        let zero = Value::Number(0.0);

        assert!(matches!(
            a.divide(&zero),
            Err(RuntimeError::DivisionByZero)
        ));
    }

    #[test]
    fn test_mixed_type_arithmetic_fails() {
        let number = Value::Number(5.0);
        let string = Value::String("5".to_string());

        assert!(matches!(
            number.add(&string),
            Err(RuntimeError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn test_logic() {
        let yes = Value::Boolean(true);
        let no = Value::Boolean(false);

        assert_eq!(yes.and(&no).unwrap(), Value::Boolean(false));
        assert_eq!(yes.or(&no).unwrap(), Value::Boolean(true));
        assert_eq!(yes.xor(&no).unwrap(), Value::Boolean(true));
        assert_eq!(no.implies(&yes).unwrap(), Value::Boolean(true));
        assert_eq!(yes.implies(&no).unwrap(), Value::Boolean(false));
        assert_eq!(yes.negate().unwrap(), Value::Boolean(false));
    }

    #[test]
    fn test_equality_across_types() {
        assert!(!Value::Number(5.0).equals(&Value::String("5".to_string())));
        assert!(!Value::Boolean(true).equals(&Value::Number(1.0)));
        assert!(Value::Number(5.0).equals(&Value::Number(5.0)));
    }

    #[test]
    fn test_casts() {
        assert_eq!(
            Value::String("3.5".to_string())
                .cast(CastTarget::Number)
                .unwrap(),
            Value::Number(3.5)
        );
        assert_eq!(
            Value::Boolean(true).cast(CastTarget::Number).unwrap(),
            Value::Number(1.0)
        );
        assert_eq!(
            Value::Number(7.0).cast(CastTarget::String).unwrap(),
            Value::String("7".to_string())
        );
        assert_eq!(
            Value::Boolean(false).cast(CastTarget::String).unwrap(),
            Value::String("FALSE".to_string())
        );
        assert_eq!(
            Value::String("TRUE".to_string())
                .cast(CastTarget::Boolean)
                .unwrap(),
            Value::Boolean(true)
        );
        assert!(Value::String("maybe".to_string())
            .cast(CastTarget::Boolean)
            .is_err());
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(2.5), "2.5");
    }
}
