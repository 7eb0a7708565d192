//! Caller-supplied behavior tables and property machinery

use std::fmt;

use crate::error::Result;
use crate::value::Value;

/// A property key: either an element index or a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropKey {
    /// Element index into an array-shaped target
    Index(usize),

    /// Named property
    Name(String),
}

impl PropKey {
    /// The name, if this is a named key
    pub fn as_name(&self) -> Option<&str> {
        match self {
            PropKey::Name(name) => Some(name),
            PropKey::Index(_) => None,
        }
    }

    /// The index, if this is an index key
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PropKey::Index(i) => Some(*i),
            PropKey::Name(_) => None,
        }
    }

    /// Check for the distinguished `"length"` key
    pub fn is_length(&self) -> bool {
        matches!(self, PropKey::Name(name) if name == "length")
    }
}

impl From<usize> for PropKey {
    fn from(i: usize) -> Self {
        PropKey::Index(i)
    }
}

impl From<&str> for PropKey {
    fn from(name: &str) -> Self {
        PropKey::Name(name.to_string())
    }
}

impl From<String> for PropKey {
    fn from(name: String) -> Self {
        PropKey::Name(name)
    }
}

impl fmt::Display for PropKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropKey::Index(i) => write!(f, "{}", i),
            PropKey::Name(name) => write!(f, "{}", name),
        }
    }
}

/// A property descriptor, as reported by descriptor introspection.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    /// The property's current value
    pub value: Value,

    /// Whether the property can be written
    pub writable: bool,

    /// Whether the property shows up in key enumeration
    pub enumerable: bool,

    /// Whether the property can be reconfigured or removed
    pub configurable: bool,
}

impl PropertyDescriptor {
    /// An ordinary data descriptor: writable, enumerable, configurable
    pub fn data(value: Value) -> Self {
        Self {
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// The fixed synthetic `length` descriptor an array carrier reports
    /// for descriptor introspection: value 0, writable, not configurable.
    pub fn synthetic_length() -> Self {
        Self {
            value: Value::I64(0),
            writable: true,
            enumerable: false,
            configurable: false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Intercepting Function Signatures
// ═══════════════════════════════════════════════════════════════════

/// Intercepts property reads
pub type GetFn = dyn Fn(&Value, &PropKey) -> Result<Value> + Send + Sync;
/// Intercepts property writes
pub type SetFn = dyn Fn(&Value, &PropKey, Value) -> Result<()> + Send + Sync;
/// Intercepts property-existence queries
pub type HasFn = dyn Fn(&Value, &PropKey) -> Result<bool> + Send + Sync;
/// Intercepts property deletion
pub type DeleteFn = dyn Fn(&Value, &PropKey) -> Result<bool> + Send + Sync;
/// Intercepts key enumeration
pub type OwnKeysFn = dyn Fn(&Value) -> Result<Vec<PropKey>> + Send + Sync;
/// Intercepts descriptor introspection
pub type DescriptorFn =
    dyn Fn(&Value, &PropKey) -> Result<Option<PropertyDescriptor>> + Send + Sync;
/// Intercepts call invocation
pub type ApplyFn = dyn Fn(&Value, &[Value]) -> Result<Value> + Send + Sync;
/// Intercepts construct invocation
pub type ConstructFn = dyn Fn(&Value, &[Value]) -> Result<Value> + Send + Sync;

/// A caller-supplied behavior table.
///
/// One optional intercepting function per trapped operation. Every
/// interceptor receives the *live* target as its first argument; the
/// guard layer has already resolved the carrier's non-owning reference
/// (raising if the target is gone) by the time an interceptor runs.
///
/// Operations left `None` fall back to the pass-through defaults in
/// [`crate::defaults`], so a table only needs to name the operations it
/// actually customizes. A table is shared as `Arc<Handler>` and may be
/// reused across arbitrarily many carriers.
///
/// # Example
///
/// ```
/// use wraith::{defaults, Handler, Value};
///
/// // Uppercase every string property read; everything else passes through.
/// let handler = Handler::new().with_get(|target, key| {
///     let value = defaults::get(target, key)?;
///     Ok(match value.as_str() {
///         Some(s) => Value::string(s.to_uppercase()),
///         None => value,
///     })
/// });
/// # let _ = handler;
/// ```
#[derive(Default)]
pub struct Handler {
    /// Property read interceptor
    pub get: Option<Box<GetFn>>,

    /// Property write interceptor
    pub set: Option<Box<SetFn>>,

    /// Property existence interceptor
    pub has: Option<Box<HasFn>>,

    /// Property deletion interceptor
    pub delete: Option<Box<DeleteFn>>,

    /// Key enumeration interceptor
    pub own_keys: Option<Box<OwnKeysFn>>,

    /// Descriptor introspection interceptor
    pub descriptor: Option<Box<DescriptorFn>>,

    /// Call interceptor
    pub apply: Option<Box<ApplyFn>>,

    /// Construct interceptor
    pub construct: Option<Box<ConstructFn>>,
}

impl Handler {
    /// Create an empty table: every operation passes through to defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the property read interceptor (builder pattern)
    pub fn with_get(
        mut self,
        f: impl Fn(&Value, &PropKey) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.get = Some(Box::new(f));
        self
    }

    /// Set the property write interceptor
    pub fn with_set(
        mut self,
        f: impl Fn(&Value, &PropKey, Value) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.set = Some(Box::new(f));
        self
    }

    /// Set the property existence interceptor
    pub fn with_has(
        mut self,
        f: impl Fn(&Value, &PropKey) -> Result<bool> + Send + Sync + 'static,
    ) -> Self {
        self.has = Some(Box::new(f));
        self
    }

    /// Set the property deletion interceptor
    pub fn with_delete(
        mut self,
        f: impl Fn(&Value, &PropKey) -> Result<bool> + Send + Sync + 'static,
    ) -> Self {
        self.delete = Some(Box::new(f));
        self
    }

    /// Set the key enumeration interceptor
    pub fn with_own_keys(
        mut self,
        f: impl Fn(&Value) -> Result<Vec<PropKey>> + Send + Sync + 'static,
    ) -> Self {
        self.own_keys = Some(Box::new(f));
        self
    }

    /// Set the descriptor introspection interceptor
    pub fn with_descriptor(
        mut self,
        f: impl Fn(&Value, &PropKey) -> Result<Option<PropertyDescriptor>> + Send + Sync + 'static,
    ) -> Self {
        self.descriptor = Some(Box::new(f));
        self
    }

    /// Set the call interceptor
    pub fn with_apply(
        mut self,
        f: impl Fn(&Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.apply = Some(Box::new(f));
        self
    }

    /// Set the construct interceptor
    pub fn with_construct(
        mut self,
        f: impl Fn(&Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.construct = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut traps = Vec::new();
        if self.get.is_some() {
            traps.push("get");
        }
        if self.set.is_some() {
            traps.push("set");
        }
        if self.has.is_some() {
            traps.push("has");
        }
        if self.delete.is_some() {
            traps.push("delete");
        }
        if self.own_keys.is_some() {
            traps.push("own_keys");
        }
        if self.descriptor.is_some() {
            traps.push("descriptor");
        }
        if self.apply.is_some() {
            traps.push("apply");
        }
        if self.construct.is_some() {
            traps.push("construct");
        }
        write!(f, "Handler({})", traps.join(", "))
    }
}
