use parking_lot::RwLock;

use crate::registry::{
  DispatchRegistry,
  DynHandler,
  Result,
};

/// A [`DispatchRegistry`] behind a read/write lock.
///
/// The lock is only held while a handler is looked up or stored. Handlers run
/// after it is released, so a handler may itself register or dispatch.
pub struct SharedRegistry<Recv: ?Sized, V> {
  inner: RwLock<DispatchRegistry<Recv, V>>,
}

impl<Recv: ?Sized, V> Default for SharedRegistry<Recv, V> {
  fn default() -> Self {
    Self::new()
  }
}

impl<Recv: ?Sized, V> SharedRegistry<Recv, V> {
  pub fn new() -> Self {
    Self {
      inner: RwLock::new(DispatchRegistry::new()),
    }
  }

  pub fn register<O, F>(&self, name: impl Into<String>, handler: F) -> Option<DynHandler<Recv, V>>
  where
    O: 'static,
    F: Fn(Option<&Recv>, Vec<V>) -> V + Send + Sync + 'static,
  {
    self.inner.write().register::<O, F>(name, handler)
  }

  pub fn set<O: 'static>(&self, name: impl Into<String>, handler: DynHandler<Recv, V>) -> Option<DynHandler<Recv, V>> {
    self.inner.write().set::<O>(name, handler)
  }

  pub fn get<O: 'static>(&self, name: &str) -> Option<DynHandler<Recv, V>> {
    self.inner.read().get::<O>(name).cloned()
  }

  pub fn has<O: 'static>(&self, name: &str) -> bool {
    self.inner.read().has::<O>(name)
  }

  pub fn remove<O: 'static>(&self, name: &str) -> Option<DynHandler<Recv, V>> {
    self.inner.write().remove::<O>(name)
  }

  pub fn names<O: 'static>(&self) -> Vec<String> {
    self
      .inner
      .read()
      .names::<O>()
      .into_iter()
      .map(str::to_owned)
      .collect()
  }

  /// A point-in-time copy of the registry.
  pub fn snapshot(&self) -> DispatchRegistry<Recv, V> {
    self.inner.read().clone()
  }

  pub fn dispatch<O: 'static>(&self, name: &str, receiver: &Recv, args: Vec<V>) -> Result<V> {
    let handler = self.inner.read().lookup::<O>(name)?.clone();
    tracing::trace!(owner = std::any::type_name::<O>(), name, "dispatching shared");
    Ok(handler(Some(receiver), args))
  }

  pub fn dispatch_static<O: 'static>(&self, name: &str, args: Vec<V>) -> Result<V> {
    let handler = self.inner.read().lookup::<O>(name)?.clone();
    tracing::trace!(owner = std::any::type_name::<O>(), name, "dispatching shared static");
    Ok(handler(None, args))
  }
}
