//! Observing reclamation: a finalization registry for external callers
//!
//! The core never needs this; it exists so embedders can learn that a
//! registered target has been reclaimed without probing a carrier and
//! catching its error. Where a host runtime would fire callbacks at some
//! unspecified point after collection, this registry delivers them from
//! an explicit [`cleanup`](FinalizationRegistry::cleanup) sweep, which is
//! deterministic and testable.

use std::sync::{Mutex, PoisonError};

use crate::error::Result;
use crate::value::Value;
use crate::weak::WeakValue;

type FinalizeFn = dyn Fn(Value) + Send + Sync;

struct Entry {
    target: WeakValue,
    token: Value,
}

/// Delivers a held token for each registered target once that target has
/// been reclaimed.
///
/// Targets are held weakly (registration never keeps a target alive);
/// tokens are held strongly until delivered. Each registration fires at
/// most once.
pub struct FinalizationRegistry {
    callback: Box<FinalizeFn>,
    entries: Mutex<Vec<Entry>>,
}

impl FinalizationRegistry {
    /// Create a registry that passes each reclaimed target's token to
    /// `callback`.
    pub fn new(callback: impl Fn(Value) + Send + Sync + 'static) -> Self {
        Self {
            callback: Box::new(callback),
            entries: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a target with a token to deliver on its reclamation.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` if `target` cannot be weakly referenced.
    pub fn register(&self, target: &Value, token: Value) -> Result<()> {
        let target = target.downgrade()?;
        self.lock().push(Entry { target, token });
        Ok(())
    }

    /// Sweep out entries whose target has been reclaimed, invoking the
    /// callback with each one's token. Returns how many fired.
    pub fn cleanup(&self) -> usize {
        // Collect dead tokens under the lock, deliver after releasing it,
        // so a callback may re-register without deadlocking.
        let dead: Vec<Value> = {
            let mut entries = self.lock();
            let mut dead = Vec::new();
            entries.retain(|entry| {
                if entry.target.is_live() {
                    true
                } else {
                    dead.push(entry.token.clone());
                    false
                }
            });
            dead
        };

        let fired = dead.len();
        for token in dead {
            (self.callback)(token);
        }
        fired
    }

    /// Number of registrations that have not yet fired
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if no registrations are pending
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl std::fmt::Debug for FinalizationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FinalizationRegistry({} pending)", self.len())
    }
}
