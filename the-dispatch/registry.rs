use std::{
  any::{
    TypeId,
    type_name,
  },
  collections::HashMap,
  fmt,
  sync::Arc,
};

use thiserror::Error;

/// A dynamically registered handler.
///
/// Receives the receiver for instance calls (`None` for static calls) and the
/// positional arguments.
pub type DynHandler<Recv, V> = Arc<dyn Fn(Option<&Recv>, Vec<V>) -> V + Send + Sync>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
  #[error("method {owner}::{name} does not exist")]
  NotFound { owner: &'static str, name: String },
}

pub type Result<T> = std::result::Result<T, DispatchError>;

struct OwnerTable<Recv: ?Sized, V> {
  owner:    &'static str,
  handlers: HashMap<String, DynHandler<Recv, V>>,
}

impl<Recv: ?Sized, V> Clone for OwnerTable<Recv, V> {
  fn clone(&self) -> Self {
    Self {
      owner:    self.owner,
      handlers: self.handlers.clone(),
    }
  }
}

/// Named handlers scoped by an owner type.
///
/// Two owners may register the same name without clashing; lookups always
/// name the owner as a type parameter.
pub struct DispatchRegistry<Recv: ?Sized, V> {
  owners: HashMap<TypeId, OwnerTable<Recv, V>>,
}

impl<Recv: ?Sized, V> Clone for DispatchRegistry<Recv, V> {
  fn clone(&self) -> Self {
    Self {
      owners: self.owners.clone(),
    }
  }
}

impl<Recv: ?Sized, V> Default for DispatchRegistry<Recv, V> {
  fn default() -> Self {
    Self::new()
  }
}

impl<Recv: ?Sized, V> fmt::Debug for DispatchRegistry<Recv, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut map = f.debug_map();
    for table in self.owners.values() {
      let mut names: Vec<&str> = table.handlers.keys().map(String::as_str).collect();
      names.sort_unstable();
      map.entry(&table.owner, &names);
    }
    map.finish()
  }
}

impl<Recv: ?Sized, V> DispatchRegistry<Recv, V> {
  pub fn new() -> Self {
    Self {
      owners: HashMap::new(),
    }
  }

  /// Stores `handler` under `name` for owner `O`, returning any handler it
  /// replaced.
  pub fn set<O: 'static>(
    &mut self,
    name: impl Into<String>,
    handler: DynHandler<Recv, V>,
  ) -> Option<DynHandler<Recv, V>> {
    let name = name.into();
    let owner = type_name::<O>();
    let table = self
      .owners
      .entry(TypeId::of::<O>())
      .or_insert_with(|| {
        OwnerTable {
          owner,
          handlers: HashMap::new(),
        }
      });
    let previous = table.handlers.insert(name.clone(), handler);
    if previous.is_some() {
      tracing::debug!(owner, %name, "replaced dynamic handler");
    } else {
      tracing::debug!(owner, %name, "registered dynamic handler");
    }
    previous
  }

  pub fn register<O, F>(&mut self, name: impl Into<String>, handler: F) -> Option<DynHandler<Recv, V>>
  where
    O: 'static,
    F: Fn(Option<&Recv>, Vec<V>) -> V + Send + Sync + 'static,
  {
    self.set::<O>(name, Arc::new(handler))
  }

  pub fn get<O: 'static>(&self, name: &str) -> Option<&DynHandler<Recv, V>> {
    self
      .owners
      .get(&TypeId::of::<O>())
      .and_then(|table| table.handlers.get(name))
  }

  pub fn has<O: 'static>(&self, name: &str) -> bool {
    self.get::<O>(name).is_some()
  }

  pub fn remove<O: 'static>(&mut self, name: &str) -> Option<DynHandler<Recv, V>> {
    let table = self.owners.get_mut(&TypeId::of::<O>())?;
    let removed = table.handlers.remove(name);
    if table.handlers.is_empty() {
      self.owners.remove(&TypeId::of::<O>());
    }
    removed
  }

  /// Names registered for owner `O`, sorted.
  pub fn names<O: 'static>(&self) -> Vec<&str> {
    let mut names: Vec<&str> = self
      .owners
      .get(&TypeId::of::<O>())
      .map(|table| table.handlers.keys().map(String::as_str).collect())
      .unwrap_or_default();
    names.sort_unstable();
    names
  }

  pub fn len(&self) -> usize {
    self.owners.values().map(|table| table.handlers.len()).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.owners.is_empty()
  }

  /// Looks up the handler for `O::name`, failing with
  /// [`DispatchError::NotFound`].
  pub fn lookup<O: 'static>(&self, name: &str) -> Result<&DynHandler<Recv, V>> {
    self.get::<O>(name).ok_or_else(|| {
      tracing::debug!(owner = type_name::<O>(), name, "no dynamic handler");
      DispatchError::NotFound {
        owner: type_name::<O>(),
        name:  name.to_owned(),
      }
    })
  }

  /// Invokes `O::name` with `receiver` bound.
  pub fn dispatch<O: 'static>(&self, name: &str, receiver: &Recv, args: Vec<V>) -> Result<V> {
    let handler = self.lookup::<O>(name)?;
    tracing::trace!(owner = type_name::<O>(), name, args = args.len(), "dispatching");
    Ok(handler(Some(receiver), args))
  }

  /// Invokes `O::name` with no receiver.
  pub fn dispatch_static<O: 'static>(&self, name: &str, args: Vec<V>) -> Result<V> {
    let handler = self.lookup::<O>(name)?;
    tracing::trace!(owner = type_name::<O>(), name, args = args.len(), "dispatching static");
    Ok(handler(None, args))
  }
}
