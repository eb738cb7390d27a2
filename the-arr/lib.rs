//! Ordered key/value arrays with dot-path access and sequence operations.
//!
//! An [`Array`] is an insertion-ordered map from [`Key`] (integer or string) to
//! [`Value`]. A list is simply an array whose keys are exactly `0..n`. Nested
//! containers are addressed with dot-separated paths such as `"users.0.name"`,
//! where a `*` segment fans out over every element at that level.
//!
//! Everything here is a free function over borrowed arrays; mutating helpers
//! take `&mut` and say so in their name (`set`, `forget`, `splice`, `pull`).
//! `the-collection` wraps these in a fluent value type.

use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod aggregate;
pub mod algebra;
pub mod array;
pub mod coerce;
pub mod compare;
pub mod condition;
pub mod error;
pub mod filter;
pub mod json;
pub mod path;
pub mod retrieve;
pub mod sort;
pub mod transform;
pub mod value;

pub use array::Array;
pub use compare::SortFlags;
pub use condition::{
  Condition,
  Operator,
};
pub use error::{
  Error,
  Result,
};
pub use retrieve::{
  Fallback,
  Retriever,
};
pub use value::{
  Key,
  Object,
  Value,
};

pub type Tendril = SmartString<LazyCompact>;

/// Builds an [`Array`] literal.
///
/// ```
/// use the_arr::array;
///
/// let list = array![1, 2, 3];
/// let map = array!["name" => "Desk", "price" => 200];
/// assert_eq!(list.len(), 3);
/// assert!(map.is_assoc());
/// ```
#[macro_export]
macro_rules! array {
  () => {
    $crate::Array::new()
  };
  ($($key:expr => $value:expr),+ $(,)?) => {{
    let mut array = $crate::Array::new();
    $(
      array.insert($key, $value);
    )+
    array
  }};
  ($($value:expr),+ $(,)?) => {{
    let mut array = $crate::Array::new();
    $(
      array.push($value);
    )+
    array
  }};
}
