pub use codec::{read, write};
pub use errors::{Error, Result};
pub use value::{ProtocolVersion, Value};

/// the blocking reader/writer for wire values.
pub mod codec;
/// the error type.
pub mod errors;
/// the wire value model.
pub mod value;
