//! # the-dispatch
//!
//! Named handlers registered at runtime and scoped by an owner type.
//!
//! Every owner gets its own namespace, so two types may register a handler
//! under the same name without clashing. Handlers receive an optional
//! receiver (`None` for static calls) and their positional arguments.
//!
//! ```rust
//! use the_dispatch::DispatchRegistry;
//!
//! struct Counter;
//!
//! let mut registry = DispatchRegistry::<[i64], i64>::new();
//! registry.register::<Counter, _>("total", |items, extra| {
//!   items.map_or(0, |items| items.iter().sum::<i64>()) + extra.iter().sum::<i64>()
//! });
//!
//! assert_eq!(registry.dispatch::<Counter>("total", &[1, 2, 3], vec![4]), Ok(10));
//! assert!(registry.dispatch_static::<Counter>("missing", Vec::new()).is_err());
//! ```
//!
//! [`SharedRegistry`] wraps a registry in a lock for process-wide use.

mod registry;
mod shared;

pub use registry::{
  DispatchError,
  DispatchRegistry,
  DynHandler,
  Result,
};
pub use shared::SharedRegistry;
