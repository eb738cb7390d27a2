//! Value retrievers and lazy defaults.

use std::fmt;

use crate::{
  Tendril,
  path,
  value::{
    Key,
    Value,
  },
};

/// Derives a value from an element: the element itself, a dot path into it,
/// or a callback over `(value, key)`.
pub enum Retriever<'a> {
  Identity,
  Path(Tendril),
  Callback(Box<dyn Fn(&Value, &Key) -> Value + 'a>),
}

impl<'a> Retriever<'a> {
  pub fn func(callback: impl Fn(&Value, &Key) -> Value + 'a) -> Self {
    Retriever::Callback(Box::new(callback))
  }

  pub fn resolve(&self, value: &Value, key: &Key) -> Value {
    match self {
      Retriever::Identity => value.clone(),
      Retriever::Path(path) => path::get(value, path, Value::Null),
      Retriever::Callback(callback) => callback(value, key),
    }
  }

  pub fn as_path(&self) -> Option<&str> {
    match self {
      Retriever::Path(path) => Some(path.as_str()),
      _ => None,
    }
  }

  pub(crate) fn has_wildcard(&self) -> bool {
    self.as_path().is_some_and(|path| path.contains(path::WILDCARD))
  }
}

impl Default for Retriever<'_> {
  fn default() -> Self {
    Retriever::Identity
  }
}

impl fmt::Debug for Retriever<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Retriever::Identity => f.write_str("Identity"),
      Retriever::Path(path) => f.debug_tuple("Path").field(path).finish(),
      Retriever::Callback(_) => f.write_str("Callback(..)"),
    }
  }
}

impl From<&str> for Retriever<'_> {
  fn from(path: &str) -> Self {
    Retriever::Path(path.into())
  }
}

impl From<String> for Retriever<'_> {
  fn from(path: String) -> Self {
    Retriever::Path(path.into())
  }
}

impl From<Tendril> for Retriever<'_> {
  fn from(path: Tendril) -> Self {
    Retriever::Path(path)
  }
}

/// A default value, either ready or computed on demand.
///
/// Any `Into<Value>` converts into an eager fallback; use [`Fallback::lazy`]
/// for defaults that should only be computed on a miss.
pub enum Fallback<'a> {
  Value(Value),
  Lazy(Box<dyn FnOnce() -> Value + 'a>),
}

impl<'a> Fallback<'a> {
  pub fn lazy(compute: impl FnOnce() -> Value + 'a) -> Self {
    Fallback::Lazy(Box::new(compute))
  }

  pub fn resolve(self) -> Value {
    match self {
      Fallback::Value(value) => value,
      Fallback::Lazy(compute) => compute(),
    }
  }
}

pub(crate) fn resolve_fallback<'f>(default: impl Into<Fallback<'f>>) -> Value {
  let fallback: Fallback<'f> = default.into();
  fallback.resolve()
}

impl Default for Fallback<'_> {
  fn default() -> Self {
    Fallback::Value(Value::Null)
  }
}

impl<T: Into<Value>> From<T> for Fallback<'_> {
  fn from(value: T) -> Self {
    Fallback::Value(value.into())
  }
}
