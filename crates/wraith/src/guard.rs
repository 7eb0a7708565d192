//! Derived behavior tables: resolve-or-raise guards and the process-wide cache

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;

use crate::category::Category;
use crate::defaults;
use crate::error::{Result, WraithError};
use crate::handler::{Handler, PropKey, PropertyDescriptor};
use crate::value::Value;
use crate::weak::WeakValue;

/// Per-category backing storage for a carrier.
///
/// Each shape embeds the non-owning reference differently, so each
/// category needs its own recovery step before the reference can be
/// resolved.
pub(crate) enum Backing {
    /// The reference itself
    Object(WeakValue),

    /// A single-element sequence holding the reference
    Array(Vec<WeakValue>),

    /// An invocable pre-bound to the reference
    Function(BoundRef),
}

/// An invocable bound to a non-owning reference at construction time.
/// Invoking it with no arguments yields the reference back.
pub(crate) struct BoundRef(Box<dyn Fn() -> WeakValue + Send + Sync>);

impl BoundRef {
    pub(crate) fn bind(reference: WeakValue) -> Self {
        Self(Box::new(move || reference.clone()))
    }

    fn recover(&self) -> WeakValue {
        (self.0)()
    }
}

/// Resolve a carrier's backing storage to the live target, or raise the
/// category's reclaimed error.
fn resolve(category: Category, backing: &Backing) -> Result<Value> {
    let live = match backing {
        Backing::Object(reference) => reference.resolve(),
        Backing::Array(refs) => refs.first().and_then(WeakValue::resolve),
        Backing::Function(bound) => bound.recover().resolve(),
    };
    live.ok_or(WraithError::Reclaimed(category))
}

// ═══════════════════════════════════════════════════════════════════
// Derived Tables
// ═══════════════════════════════════════════════════════════════════

type GuardedGet = Box<dyn Fn(&Backing, &PropKey) -> Result<Value> + Send + Sync>;
type GuardedSet = Box<dyn Fn(&Backing, &PropKey, Value) -> Result<()> + Send + Sync>;
type GuardedHas = Box<dyn Fn(&Backing, &PropKey) -> Result<bool> + Send + Sync>;
type GuardedDelete = Box<dyn Fn(&Backing, &PropKey) -> Result<bool> + Send + Sync>;
type GuardedOwnKeys = Box<dyn Fn(&Backing) -> Result<Vec<PropKey>> + Send + Sync>;
type GuardedDescriptor =
    Box<dyn Fn(&Backing, &PropKey) -> Result<Option<PropertyDescriptor>> + Send + Sync>;
type GuardedInvoke = Box<dyn Fn(&Backing, &[Value]) -> Result<Value> + Send + Sync>;

/// The derived behavior table for one (category, handler) pair.
///
/// Every operation is present (full-surface policy): it resolves the
/// backing storage first, then delegates to the caller's interceptor or
/// the pass-through default with the live target substituted in.
pub(crate) struct GuardedHandler {
    pub(crate) get: GuardedGet,
    pub(crate) set: GuardedSet,
    pub(crate) has: GuardedHas,
    pub(crate) delete: GuardedDelete,
    pub(crate) own_keys: GuardedOwnKeys,
    pub(crate) descriptor: GuardedDescriptor,
    pub(crate) apply: GuardedInvoke,
    pub(crate) construct: GuardedInvoke,
}

fn build(category: Category, handler: &Arc<Handler>) -> GuardedHandler {
    GuardedHandler {
        get: {
            let h = Arc::clone(handler);
            Box::new(move |backing, key| {
                let live = resolve(category, backing)?;
                match &h.get {
                    Some(f) => f(&live, key),
                    None => defaults::get(&live, key),
                }
            })
        },
        set: {
            let h = Arc::clone(handler);
            Box::new(move |backing, key, value| {
                let live = resolve(category, backing)?;
                match &h.set {
                    Some(f) => f(&live, key, value),
                    None => defaults::set(&live, key, value),
                }
            })
        },
        has: {
            let h = Arc::clone(handler);
            Box::new(move |backing, key| {
                let live = resolve(category, backing)?;
                match &h.has {
                    Some(f) => f(&live, key),
                    None => defaults::has(&live, key),
                }
            })
        },
        delete: {
            let h = Arc::clone(handler);
            Box::new(move |backing, key| {
                let live = resolve(category, backing)?;
                match &h.delete {
                    Some(f) => f(&live, key),
                    None => defaults::delete(&live, key),
                }
            })
        },
        own_keys: {
            let h = Arc::clone(handler);
            Box::new(move |backing| {
                let live = resolve(category, backing)?;
                match &h.own_keys {
                    Some(f) => f(&live),
                    // Array carriers enumerate the fixed structural key set
                    None if category == Category::Array => defaults::array_own_keys(&live),
                    None => defaults::own_keys(&live),
                }
            })
        },
        descriptor: {
            let h = Arc::clone(handler);
            Box::new(move |backing, key| {
                let live = resolve(category, backing)?;
                match &h.descriptor {
                    Some(f) => f(&live, key),
                    // Array carriers report the synthetic length descriptor
                    None if category == Category::Array => defaults::array_descriptor(&live, key),
                    None => defaults::descriptor(&live, key),
                }
            })
        },
        apply: {
            let h = Arc::clone(handler);
            Box::new(move |backing, args| {
                let live = resolve(category, backing)?;
                match &h.apply {
                    Some(f) => f(&live, args),
                    None => defaults::apply(&live, args),
                }
            })
        },
        construct: {
            let h = Arc::clone(handler);
            Box::new(move |backing, args| {
                let live = resolve(category, backing)?;
                match &h.construct {
                    Some(f) => f(&live, args),
                    None => defaults::construct(&live, args),
                }
            })
        },
    }
}

// ═══════════════════════════════════════════════════════════════════
// Process-Wide Cache
// ═══════════════════════════════════════════════════════════════════

// One cache per category: the same handler derives a different table for
// each category because the resolve step differs. Keyed by the handler's
// Arc pointer identity. Entries are only ever added, and every cached
// table holds its handler strongly through the guard closures, so a keyed
// address can never be reused while its entry exists.
static OBJECT_GUARDS: LazyLock<DashMap<usize, Arc<GuardedHandler>>> = LazyLock::new(DashMap::new);
static ARRAY_GUARDS: LazyLock<DashMap<usize, Arc<GuardedHandler>>> = LazyLock::new(DashMap::new);
static FUNCTION_GUARDS: LazyLock<DashMap<usize, Arc<GuardedHandler>>> = LazyLock::new(DashMap::new);

fn cache_for(category: Category) -> &'static DashMap<usize, Arc<GuardedHandler>> {
    match category {
        Category::Object => &OBJECT_GUARDS,
        Category::Array => &ARRAY_GUARDS,
        Category::Function => &FUNCTION_GUARDS,
    }
}

/// Fetch the derived table for a (category, handler) pair, building and
/// caching it on first use.
///
/// Building is a pure function of its inputs, so a lost insert race
/// costs only a discarded duplicate; the stored table wins.
pub(crate) fn guarded_table(category: Category, handler: &Arc<Handler>) -> Arc<GuardedHandler> {
    let cache = cache_for(category);
    let key = Arc::as_ptr(handler) as usize;

    if let Some(entry) = cache.get(&key) {
        return Arc::clone(entry.value());
    }

    let built = Arc::new(build(category, handler));
    Arc::clone(cache.entry(key).or_insert(built).value())
}
