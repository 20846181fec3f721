pub use store::errors::{Result, StoreError};
pub use store::memory::MemStore;
pub use store::store::Store;
pub use store::value::Value;

/// About the command dispatcher: parsing wire arguments into commands,
/// and translating store results back into replies.
pub mod command;
/// About the logger configuration.
pub mod config;
/// About the RESP wire codec.
pub mod resp;
/// About the common server types (options, errors).
pub mod server_common;
/// About the key-value store engine.
pub mod store;
/// About the thread pools used by the server.
pub mod thread_pool;
