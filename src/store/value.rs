use std::collections::HashMap;

/// The payload stored under one key.
///
/// A key holds exactly one of these for its whole lifetime:
/// writing with a command of another family is a type conflict,
/// never an implicit conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// a plain string, as written by `SET`.
    Str(String),
    /// a field-to-string mapping, as written by `HSET`.
    Hash(HashMap<String, String>),
}

impl Value {
    /// view this value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// view this value as a hash, if it is one.
    pub fn as_hash(&self) -> Option<&HashMap<String, String>> {
        match self {
            Value::Hash(h) => Some(h),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<HashMap<String, String>> for Value {
    fn from(h: HashMap<String, String>) -> Self {
        Value::Hash(h)
    }
}
