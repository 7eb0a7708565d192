//! # Wraith
//!
//! Weakly held proxy values: transparent carriers that forward operations
//! to a target without keeping it alive.
//!
//! A [`Carrier`] stands in for a target value and forwards every trapped
//! operation (property access, array behavior, invocation, construction)
//! to it, while holding only a non-owning reference. Once the last strong
//! handle to the target drops, every subsequent operation on the carrier
//! fails with a distinguishable, category-specific error instead of
//! silently operating on a dead value. This suits caches, registries, and
//! listener tables whose entries must not keep their subjects alive, yet
//! must stay fully transparent to callers.
//!
//! ## Architecture
//!
//! - **Value Model**: a small dynamic [`Value`] with Arc-backed heap
//!   payloads; reclamation is the drop of the last strong handle
//! - **Non-owning Reference**: [`WeakValue`], created fresh per carrier
//! - **Categories**: [`Category`] decides backing-storage shape and which
//!   resolve step recovers the live target
//! - **Behavior Tables**: a caller's [`Handler`] is derived once per
//!   (category, table) pair into a guarded table that resolves before
//!   delegating, cached process-wide
//! - **Registry**: [`FinalizationRegistry`] lets embedders observe
//!   reclamation without probing carriers
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use wraith::{create, Handler, ObjectValue, Value};
//!
//! let handler = Arc::new(Handler::new());
//! let target = Value::object(ObjectValue::new().with_prop("v", Value::I64(42)));
//! let carrier = create(&target, &handler, None).unwrap();
//!
//! assert_eq!(carrier.get("v").unwrap(), Value::I64(42));
//!
//! // The carrier never keeps its target alive:
//! drop(target);
//! assert!(carrier.get("v").is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod carrier;
pub mod category;
pub mod defaults;
pub mod error;
pub mod handler;
pub mod registry;
pub mod value;
pub mod weak;

mod guard;

// Re-export main types
pub use carrier::{create, Carrier};
pub use category::Category;
pub use error::{Result, WraithError};
pub use handler::{Handler, PropKey, PropertyDescriptor};
pub use registry::FinalizationRegistry;
pub use value::{ArrayValue, FunctionValue, NativeFnPtr, ObjectValue, Value};
pub use weak::WeakValue;

/// Wraith version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
