//! Display and Debug implementations for Value

use std::fmt;

use super::*;

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::I64(n) => write!(f, "{}", n),
            Value::F64(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s.as_ref()),

            Value::Object(obj) => {
                write!(f, "{{")?;
                for (i, key) in obj.keys().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: ", key)?;
                    match obj.get(key) {
                        Some(value) => write!(f, "{:?}", value)?,
                        None => write!(f, "<removed>")?,
                    }
                }
                write!(f, "}}")
            }

            Value::Array(arr) => {
                write!(f, "[")?;
                for (i, item) in arr.to_vec().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", item)?;
                }
                write!(f, "]")
            }

            Value::Function(func) => write!(f, "fn {}/{}", func.name, func.arity),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Strings display unquoted; everything else matches Debug
            Value::String(s) => write!(f, "{}", s),
            other => write!(f, "{:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_formats() {
        assert_eq!(format!("{:?}", Value::Unit), "()");
        assert_eq!(format!("{:?}", Value::I64(42)), "42");
        assert_eq!(format!("{:?}", Value::string("hi")), "\"hi\"");
        assert_eq!(
            format!("{:?}", Value::array(vec![Value::I64(1), Value::I64(2)])),
            "[1, 2]"
        );
        assert_eq!(
            format!(
                "{:?}",
                Value::object(ObjectValue::new().with_prop("v", Value::I64(42)))
            ),
            "{v: 42}"
        );
    }

    #[test]
    fn test_display_strings_unquoted() {
        assert_eq!(format!("{}", Value::string("hi")), "hi");
        assert_eq!(format!("{}", Value::I64(7)), "7");
    }
}
