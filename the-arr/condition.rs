//! Comparison predicates built from `(key, operator, value)` triples.

use std::{
  cmp::Ordering,
  fmt,
  str::FromStr,
};

use crate::{
  Tendril,
  compare::{
    compare,
    loose_eq,
    strict_eq,
  },
  error::{
    Error,
    Result,
  },
  path,
  value::Value,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
  Eq,
  Ne,
  Lt,
  Gt,
  Le,
  Ge,
  Identical,
  NotIdentical,
}

impl Operator {
  /// Parses `token`, falling back to loose equality for anything unknown.
  pub fn parse_lenient(token: &str) -> Self {
    token.parse().unwrap_or_else(|err| {
      tracing::debug!(%err, "falling back to loose equality");
      Operator::Eq
    })
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Operator::Eq => "==",
      Operator::Ne => "!=",
      Operator::Lt => "<",
      Operator::Gt => ">",
      Operator::Le => "<=",
      Operator::Ge => ">=",
      Operator::Identical => "===",
      Operator::NotIdentical => "!==",
    }
  }

  pub fn is_negation(self) -> bool {
    matches!(self, Operator::Ne | Operator::NotIdentical)
  }

  pub fn evaluate(self, left: &Value, right: &Value) -> bool {
    match self {
      Operator::Eq => loose_eq(left, right),
      Operator::Ne => !loose_eq(left, right),
      Operator::Lt => compare(left, right) == Some(Ordering::Less),
      Operator::Gt => compare(left, right) == Some(Ordering::Greater),
      Operator::Le => matches!(compare(left, right), Some(Ordering::Less | Ordering::Equal)),
      Operator::Ge => matches!(compare(left, right), Some(Ordering::Greater | Ordering::Equal)),
      Operator::Identical => strict_eq(left, right),
      Operator::NotIdentical => !strict_eq(left, right),
    }
  }
}

impl FromStr for Operator {
  type Err = Error;

  fn from_str(token: &str) -> Result<Self> {
    match token {
      "=" | "==" => Ok(Operator::Eq),
      "!=" | "<>" => Ok(Operator::Ne),
      "<" => Ok(Operator::Lt),
      ">" => Ok(Operator::Gt),
      "<=" => Ok(Operator::Le),
      ">=" => Ok(Operator::Ge),
      "===" => Ok(Operator::Identical),
      "!==" => Ok(Operator::NotIdentical),
      other => Err(Error::InvalidOperator(other.to_owned())),
    }
  }
}

impl fmt::Display for Operator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A predicate over array elements: retrieve `key` from the element with
/// dot-path semantics and compare it against `value` using `operator`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
  pub key:      Tendril,
  pub operator: Operator,
  pub value:    Value,
}

impl Condition {
  /// A three-argument condition. Unknown operator tokens mean loose equality.
  pub fn new(key: impl Into<Tendril>, operator: &str, value: impl Into<Value>) -> Self {
    Self {
      key:      key.into(),
      operator: Operator::parse_lenient(operator),
      value:    value.into(),
    }
  }

  pub fn with_operator(key: impl Into<Tendril>, operator: Operator, value: impl Into<Value>) -> Self {
    Self {
      key: key.into(),
      operator,
      value: value.into(),
    }
  }

  /// The two-argument form, `key == value`.
  pub fn eq(key: impl Into<Tendril>, value: impl Into<Value>) -> Self {
    Self::with_operator(key, Operator::Eq, value)
  }

  /// `key === value`.
  pub fn strict(key: impl Into<Tendril>, value: impl Into<Value>) -> Self {
    Self::with_operator(key, Operator::Identical, value)
  }

  /// Builds a condition from positional arguments: `[key, value]` or
  /// `[key, operator, value]`.
  pub fn from_args(args: &[Value]) -> Result<Self> {
    match args {
      [key, value] => Ok(Self::eq(key_text(key)?, value.clone())),
      [key, Value::Str(operator), value] => Ok(Self::new(key_text(key)?, operator, value.clone())),
      [_, operator, _] => {
        Err(Error::InvalidArgument(format!(
          "condition operator must be a string, got {}",
          operator.type_name()
        )))
      },
      other => {
        Err(Error::InvalidArgument(format!(
          "a condition takes 2 or 3 arguments, got {}",
          other.len()
        )))
      },
    }
  }

  pub fn matches(&self, item: &Value) -> bool {
    let retrieved = path::get(item, &self.key, Value::Null);
    let textual = [&retrieved, &self.value].into_iter().filter(|v| is_textual(v)).count();
    let objects = [&retrieved, &self.value].into_iter().filter(|v| v.is_object()).count();
    if textual < 2 && objects == 1 {
      return self.operator.is_negation();
    }
    self.operator.evaluate(&retrieved, &self.value)
  }
}

fn is_textual(value: &Value) -> bool {
  match value {
    Value::Str(_) => true,
    Value::Object(object) => object.is_stringable(),
    _ => false,
  }
}

fn key_text(key: &Value) -> Result<Tendril> {
  match key {
    Value::Str(s) => Ok(s.clone()),
    Value::Int(n) => Ok(n.to_string().into()),
    other => {
      Err(Error::InvalidArgument(format!(
        "condition key must be a string, got {}",
        other.type_name()
      )))
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    array,
    value::Object,
  };

  fn item(price: impl Into<Value>) -> Value {
    Value::from(array!["price" => price])
  }

  #[test]
  fn operators_parse_strictly() {
    assert_eq!("<>".parse::<Operator>().ok(), Some(Operator::Ne));
    assert_eq!("=".parse::<Operator>().ok(), Some(Operator::Eq));
    assert!(matches!("~".parse::<Operator>(), Err(Error::InvalidOperator(token)) if token == "~"));
    assert_eq!(Operator::parse_lenient("like"), Operator::Eq);
  }

  #[test]
  fn loose_and_strict_equality() {
    assert!(Condition::eq("price", 100).matches(&item("100")));
    assert!(!Condition::strict("price", 100).matches(&item("100")));
    assert!(Condition::new("price", "!==", 100).matches(&item("100")));
  }

  #[test]
  fn ordered_operators() {
    let cheap = item(50);
    assert!(Condition::new("price", "<", 100).matches(&cheap));
    assert!(Condition::new("price", "<=", 50).matches(&cheap));
    assert!(!Condition::new("price", ">", 50).matches(&cheap));
    assert!(Condition::new("price", ">=", "50").matches(&cheap));
  }

  #[test]
  fn missing_key_compares_as_null() {
    let empty = Value::from(array!["name" => "Desk"]);
    assert!(Condition::eq("price", Value::Null).matches(&empty));
    assert!(Condition::new("price", "<", 1).matches(&empty));
  }

  #[test]
  fn unstringable_object_against_scalar() {
    let with_object = item(Object::new("Money"));
    assert!(!Condition::eq("price", 100).matches(&with_object));
    assert!(Condition::new("price", "!=", 100).matches(&with_object));
    assert!(Condition::new("price", "<>", 100).matches(&with_object));
    assert!(!Condition::new("price", ">", 100).matches(&with_object));
  }

  #[test]
  fn stringable_object_compares_as_string() {
    let named = Value::from(array!["name" => Object::new("Name").with_repr("taylor")]);
    assert!(Condition::eq("name", "taylor").matches(&named));
  }

  #[test]
  fn from_positional_args() {
    let two = Condition::from_args(&[Value::from("price"), Value::Int(100)]).unwrap();
    assert_eq!(two, Condition::eq("price", 100));

    let three =
      Condition::from_args(&[Value::from("price"), Value::from(">"), Value::Int(100)]).unwrap();
    assert_eq!(three.operator, Operator::Gt);

    assert!(Condition::from_args(&[Value::from("price")]).is_err());
    assert!(Condition::from_args(&[Value::from("price"), Value::Int(1), Value::Int(2)]).is_err());
  }
}
