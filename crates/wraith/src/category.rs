//! Proxy categories and target classification

use std::fmt;

use crate::error::{Result, WraithError};
use crate::value::Value;

/// The three carrier categories.
///
/// The category decides how a carrier's backing storage embeds its
/// non-owning reference, which resolve step recovers the live target,
/// and which structural shape the carrier presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Opaque object: property access forwards to the target
    Object = 1,

    /// Array-like: presents the array capability surface
    Array = 2,

    /// Callable: supports invocation and construction
    Function = 3,
}

impl Category {
    /// Classify a target by its natural shape.
    ///
    /// Callable values classify as `Function`, arrays as `Array`, and
    /// everything else as `Object`.
    pub fn classify(target: &Value) -> Category {
        if target.is_callable() {
            Category::Function
        } else if target.is_array() {
            Category::Array
        } else {
            Category::Object
        }
    }

    /// Decode a raw category code, for embedders holding untrusted input.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedCategory` for any code outside the three
    /// supported values, before any carrier is built.
    pub fn from_code(code: u32) -> Result<Category> {
        match code {
            1 => Ok(Category::Object),
            2 => Ok(Category::Array),
            3 => Ok(Category::Function),
            other => Err(WraithError::UnsupportedCategory(other)),
        }
    }

    /// The raw code for this category (the inverse of `from_code`)
    pub fn code(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Object => "object",
            Category::Array => "array",
            Category::Function => "function",
        };
        write!(f, "{}", name)
    }
}
