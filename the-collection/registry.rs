//! Runtime-registered collection methods.

use the_arr::Value;
use the_dispatch::{
  DynHandler,
  SharedRegistry,
};

use crate::{
  collection::Collection,
  error::Result,
};

/// Registry of collection methods. Handlers receive the collection for
/// instance calls and `None` for static ones.
pub type MacroRegistry = SharedRegistry<Collection, Value>;

pub type Macro = DynHandler<Collection, Value>;

#[cfg(feature = "dynamic-registry")]
static REGISTRY: once_cell::sync::Lazy<MacroRegistry> = once_cell::sync::Lazy::new(MacroRegistry::new);

/// The process-wide registry used by [`Collection::call`].
#[cfg(feature = "dynamic-registry")]
pub fn registry() -> &'static MacroRegistry {
  &REGISTRY
}

impl Collection {
  /// Registers `handler` as a collection method named `name`, replacing any
  /// previous one.
  #[cfg(feature = "dynamic-registry")]
  pub fn register<F>(name: impl Into<String>, handler: F)
  where
    F: Fn(Option<&Collection>, Vec<Value>) -> Value + Send + Sync + 'static,
  {
    registry().register::<Collection, F>(name, handler);
  }

  #[cfg(feature = "dynamic-registry")]
  pub fn has_macro(name: &str) -> bool {
    registry().has::<Collection>(name)
  }

  /// Calls the registered method `name` with this collection bound.
  pub fn call(&self, name: &str, args: Vec<Value>) -> Result<Value> {
    #[cfg(feature = "dynamic-registry")]
    {
      self.call_in(registry(), name, args)
    }
    #[cfg(not(feature = "dynamic-registry"))]
    {
      let _ = args;
      tracing::debug!(name, "dynamic registry disabled");
      Err(not_found(name))
    }
  }

  /// Calls the registered method `name` without a receiver.
  pub fn call_static(name: &str, args: Vec<Value>) -> Result<Value> {
    #[cfg(feature = "dynamic-registry")]
    {
      Self::call_static_in(registry(), name, args)
    }
    #[cfg(not(feature = "dynamic-registry"))]
    {
      let _ = args;
      Err(not_found(name))
    }
  }

  pub fn call_in(&self, registry: &MacroRegistry, name: &str, args: Vec<Value>) -> Result<Value> {
    Ok(registry.dispatch::<Collection>(name, self, args)?)
  }

  pub fn call_static_in(registry: &MacroRegistry, name: &str, args: Vec<Value>) -> Result<Value> {
    Ok(registry.dispatch_static::<Collection>(name, args)?)
  }
}

#[cfg(not(feature = "dynamic-registry"))]
fn not_found(name: &str) -> crate::error::Error {
  the_dispatch::DispatchError::NotFound {
    owner: std::any::type_name::<Collection>(),
    name:  name.to_owned(),
  }
  .into()
}
