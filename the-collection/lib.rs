//! A fluent collection type over [`the_arr`] arrays.
//!
//! [`Collection`] wraps an [`Array`](the_arr::Array) and exposes the path,
//! filtering, reshaping, sorting and aggregate operations of `the-arr` as
//! chainable methods.
//!
//! ```
//! use the_arr::{
//!   Value,
//!   array,
//! };
//! use the_collection::Collection;
//!
//! let orders = Collection::make(array![
//!   array!["account" => "a", "total" => 10],
//!   array!["account" => "b", "total" => 5],
//!   array!["account" => "a", "total" => 7],
//! ]);
//!
//! assert_eq!(orders.where_eq("account", "a").sum("total"), Value::Int(17));
//! assert_eq!(orders.pluck("total", None).max(the_arr::Retriever::Identity), Some(Value::Int(10)));
//! ```
//!
//! Methods that are not built in can be registered at runtime and invoked by
//! name through [`Collection::call`]. The process-wide registry is behind the
//! default `dynamic-registry` feature; [`Collection::call_in`] takes an
//! explicit [`MacroRegistry`] instead.

mod collection;
mod error;
mod registry;

pub use collection::Collection;
pub use error::{
  Error,
  Result,
};
#[cfg(feature = "dynamic-registry")]
pub use registry::registry;
pub use registry::{
  Macro,
  MacroRegistry,
};
