/// the error type.
pub mod errors;
/// the in-memory store implementation (default and only).
pub mod memory;
/// the store abstraction.
pub mod store;
/// the stored value model.
pub mod value;
