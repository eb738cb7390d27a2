//! Conversions from loosely shaped input into an [`Array`].

use crate::{
  array::Array,
  error::Result,
  json,
  value::Value,
};

/// Anything that can present itself as an array.
pub trait Arrayable {
  fn to_array(&self) -> Array;
}

/// Anything that can serialize itself to a JSON document.
pub trait Jsonable {
  fn to_json(&self) -> Result<String>;
}

/// Normalizes input into an array: arrays pass through, null becomes empty,
/// objects yield their properties and any other scalar is wrapped.
pub trait IntoArray {
  fn into_array(self) -> Array;
}

impl IntoArray for Array {
  fn into_array(self) -> Array {
    self
  }
}

impl IntoArray for &Array {
  fn into_array(self) -> Array {
    self.clone()
  }
}

impl IntoArray for Value {
  fn into_array(self) -> Array {
    match self {
      Value::Null => Array::new(),
      Value::Array(array) => array,
      Value::Object(object) => object.props().clone(),
      scalar => std::iter::once(scalar).collect(),
    }
  }
}

impl<T: Into<Value>> IntoArray for Vec<T> {
  fn into_array(self) -> Array {
    self.into_iter().map(Into::into).collect()
  }
}

impl IntoArray for serde_json::Value {
  fn into_array(self) -> Array {
    IntoArray::into_array(Value::from(self))
  }
}

impl Arrayable for Array {
  fn to_array(&self) -> Array {
    self.clone()
  }
}

impl Jsonable for Array {
  fn to_json(&self) -> Result<String> {
    json::to_json(self)
  }
}

pub fn from_arrayable<A: Arrayable + ?Sized>(source: &A) -> Array {
  source.to_array()
}

/// Round-trips `source` through its JSON form.
pub fn from_jsonable<J: Jsonable + ?Sized>(source: &J) -> Result<Array> {
  let document = source.to_json()?;
  let decoded: serde_json::Value = serde_json::from_str(&document)?;
  Ok(decoded.into_array())
}
