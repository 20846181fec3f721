use std::str::FromStr;

use crate::resp::codec;

/// A value on the wire, either side of the conversation.
///
/// Requests arrive as arrays of bulk strings (occasionally integers);
/// replies go out as any of these. `Null` has two encodings, picked by
/// the negotiated [`ProtocolVersion`] at write time.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// a simple string (`+OK`).
    Simple(String),
    /// a length-prefixed bulk string.
    Bulk(String),
    /// a signed integer.
    Int(i64),
    /// an error line (`-ERROR: <CODE>`).
    Error(String),
    /// an array of values.
    Array(Vec<Value>),
    /// an ordered list of key-value pairs.
    Map(Vec<(Value, Value)>),
    /// the absent-value marker.
    Null,
}

impl Value {
    /// shortcut for making a bulk string value.
    pub fn from(value: impl Into<String>) -> Value {
        Value::Bulk(value.into())
    }

    /// view this value as a string, if it is a textual kind.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Simple(s) | Value::Bulk(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// read one value from a stream.
    pub fn read(stream: &mut impl std::io::Read) -> codec::Result<Value> {
        codec::read(stream)
    }

    /// write this value to a stream, encoding nulls for `version`.
    pub fn write(
        &self,
        stream: &mut impl std::io::Write,
        version: ProtocolVersion,
    ) -> std::io::Result<()> {
        codec::write(self, stream, version)
    }
}

/// The protocol revision a connection speaks, negotiated with `HELLO`.
/// The only observable difference at our level is the null encoding.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ProtocolVersion {
    /// the classic protocol: nulls are `$-1`.
    Resp2,
    /// the newer protocol: nulls are `_`.
    Resp3,
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        // stock clients start in the classic protocol and upgrade via HELLO.
        ProtocolVersion::Resp2
    }
}

impl FromStr for ProtocolVersion {
    type Err = NoSuchVersion;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "2" => Ok(ProtocolVersion::Resp2),
            "3" => Ok(ProtocolVersion::Resp3),
            _ => Err(NoSuchVersion),
        }
    }
}

/// the requested protocol revision is not one we speak.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct NoSuchVersion;
