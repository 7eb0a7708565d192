//! Carrier construction and the trapped operation surface

use std::fmt;
use std::sync::Arc;

use crate::category::Category;
use crate::error::{Result, WraithError};
use crate::guard::{self, Backing, BoundRef, GuardedHandler};
use crate::handler::{Handler, PropKey, PropertyDescriptor};
use crate::value::Value;

/// A transparent, weakly held stand-in for a target value.
///
/// Every trapped operation resolves the carrier's non-owning reference
/// first: while the target is alive the operation behaves exactly as if
/// performed on the target directly; once the target has been reclaimed
/// the operation fails with the category's
/// [`Reclaimed`](WraithError::Reclaimed) error, now and forever.
///
/// Carriers hold no mutable state of their own and are safe to share
/// across threads.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use wraith::{create, Handler, ObjectValue, Value, WraithError};
///
/// let handler = Arc::new(Handler::new());
/// let target = Value::object(ObjectValue::new().with_prop("v", Value::I64(42)));
///
/// let carrier = create(&target, &handler, None).unwrap();
/// assert_eq!(carrier.get("v").unwrap(), Value::I64(42));
///
/// drop(target);
/// assert!(matches!(
///     carrier.get("v"),
///     Err(WraithError::Reclaimed(_))
/// ));
/// ```
pub struct Carrier {
    category: Category,
    backing: Backing,
    guards: Arc<GuardedHandler>,
}

/// Construct a carrier over `target`.
///
/// An explicit `category` is used verbatim (forcing, say, array shaping
/// over a non-array target); otherwise the target's natural
/// classification applies. The derived behavior table for the
/// (category, handler) pair is fetched from the process-wide cache,
/// building it on first use, and a fresh non-owning reference to the
/// target is shaped into the category's backing storage.
///
/// # Errors
///
/// Returns `TypeError` if `target` has no heap identity to weakly
/// reference. No carrier exists when an error is returned. (Raw category
/// codes are validated earlier, by [`Category::from_code`].)
pub fn create(
    target: &Value,
    handler: &Arc<Handler>,
    category: Option<Category>,
) -> Result<Carrier> {
    let category = category.unwrap_or_else(|| Category::classify(target));
    let guards = guard::guarded_table(category, handler);
    let reference = target.downgrade()?;

    let backing = match category {
        Category::Object => Backing::Object(reference),
        Category::Array => Backing::Array(vec![reference]),
        Category::Function => Backing::Function(BoundRef::bind(reference)),
    };

    Ok(Carrier {
        category,
        backing,
        guards,
    })
}

impl Carrier {
    // ═══════════════════════════════════════════════════════════════════
    // Trapped Operations (resolve-or-raise, then delegate)
    // ═══════════════════════════════════════════════════════════════════

    /// Read a property of the live target
    pub fn get(&self, key: impl Into<PropKey>) -> Result<Value> {
        (self.guards.get)(&self.backing, &key.into())
    }

    /// Write a property of the live target
    pub fn set(&self, key: impl Into<PropKey>, value: Value) -> Result<()> {
        (self.guards.set)(&self.backing, &key.into(), value)
    }

    /// Check whether the live target has a property
    pub fn has(&self, key: impl Into<PropKey>) -> Result<bool> {
        (self.guards.has)(&self.backing, &key.into())
    }

    /// Delete a property of the live target
    pub fn delete(&self, key: impl Into<PropKey>) -> Result<bool> {
        (self.guards.delete)(&self.backing, &key.into())
    }

    /// Enumerate the live target's own keys
    pub fn own_keys(&self) -> Result<Vec<PropKey>> {
        (self.guards.own_keys)(&self.backing)
    }

    /// Report a property descriptor of the live target
    pub fn get_own_property_descriptor(
        &self,
        key: impl Into<PropKey>,
    ) -> Result<Option<PropertyDescriptor>> {
        (self.guards.descriptor)(&self.backing, &key.into())
    }

    /// Invoke the live target as a function
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.guards.apply)(&self.backing, args)
    }

    /// Construct from the live target
    pub fn construct(&self, args: &[Value]) -> Result<Value> {
        (self.guards.construct)(&self.backing, args)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Structural Surface (identity-level, no resolve needed)
    // ═══════════════════════════════════════════════════════════════════

    /// Whether this carrier presents as an array
    pub fn is_array(&self) -> bool {
        self.category == Category::Array
    }

    /// Whether this carrier presents as a callable
    pub fn is_callable(&self) -> bool {
        self.category == Category::Function
    }

    // ═══════════════════════════════════════════════════════════════════
    // Array Capability Conveniences
    // ═══════════════════════════════════════════════════════════════════

    /// The live target's element count, read through the derived table
    /// (not the synthetic descriptor value).
    ///
    /// # Errors
    ///
    /// Raises the reclaimed error once the target is gone, and a
    /// `TypeError` if the trapped `length` read yields a non-count.
    pub fn len(&self) -> Result<usize> {
        let length = self.get("length")?;
        length
            .as_usize()
            .ok_or_else(|| WraithError::type_error("`length` did not resolve to a count"))
    }

    /// Check whether the live target has no elements
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Read an element of the live target by index
    pub fn index(&self, i: usize) -> Result<Value> {
        self.get(i)
    }
}

impl fmt::Debug for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Carrier({})", self.category)
    }
}
