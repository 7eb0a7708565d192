//! Object values: ordered, interior-mutable property maps

use indexmap::IndexMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::Value;

/// An object with named properties.
///
/// Uses IndexMap to preserve insertion order (important for predictable
/// key enumeration). Properties are interior-mutable so that shared
/// `Arc<ObjectValue>` handles observe each other's writes.
#[derive(Debug, Default)]
pub struct ObjectValue {
    /// The object's properties in insertion order
    props: RwLock<IndexMap<String, Value>>,
}

impl ObjectValue {
    /// Create a new empty object
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property (builder pattern)
    pub fn with_prop(self, name: impl Into<String>, value: Value) -> Self {
        self.set(name, value);
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexMap<String, Value>> {
        self.props.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<String, Value>> {
        self.props.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a property by name
    pub fn get(&self, name: &str) -> Option<Value> {
        self.read().get(name).cloned()
    }

    /// Set a property, inserting or overwriting
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.write().insert(name.into(), value);
    }

    /// Remove a property. Returns whether it existed.
    pub fn delete(&self, name: &str) -> bool {
        self.write().shift_remove(name).is_some()
    }

    /// Check if a property exists
    pub fn has(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// All property names in insertion order
    pub fn keys(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the object has no properties
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        *self.read() == *other.read()
    }
}
