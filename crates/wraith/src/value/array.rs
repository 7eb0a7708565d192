//! Array values: interior-mutable element vectors

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::Value;

/// An array of values.
///
/// Elements are interior-mutable so that shared `Arc<ArrayValue>` handles
/// observe each other's writes. Writing past the end grows the array,
/// padding the gap with `Unit`.
#[derive(Debug, Default)]
pub struct ArrayValue {
    /// The elements, in order
    items: RwLock<Vec<Value>>,
}

impl ArrayValue {
    /// Create an array from a vector of elements
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Value>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Value>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the array has no elements
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Get an element by index
    pub fn get(&self, index: usize) -> Option<Value> {
        self.read().get(index).cloned()
    }

    /// Store an element, growing the array if the index is past the end
    pub fn set(&self, index: usize, value: Value) {
        let mut items = self.write();
        if index >= items.len() {
            items.resize(index + 1, Value::Unit);
        }
        items[index] = value;
    }

    /// Append an element
    pub fn push(&self, value: Value) {
        self.write().push(value);
    }

    /// Blank an in-bounds element to `Unit`. Returns whether the index
    /// was in bounds.
    pub fn delete(&self, index: usize) -> bool {
        let mut items = self.write();
        match items.get_mut(index) {
            Some(slot) => {
                *slot = Value::Unit;
                true
            }
            None => false,
        }
    }

    /// Snapshot the current elements
    pub fn to_vec(&self) -> Vec<Value> {
        self.read().clone()
    }
}

impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        *self.read() == *other.read()
    }
}
