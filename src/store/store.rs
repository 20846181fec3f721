use super::errors::Result;
use super::value::Value;

/// The engine of our key-value server.
/// This is the basic abstraction of the typed key space.
///
/// This is a sub-trait of `Send` and `Clone`, so it can simply be sent
/// between threads. Implementations guarantee that `Clone` is cheap and
/// that clones observe the same key space, so you needn't share it with
/// `Arc` yourself.
///
/// Every operation is atomic with respect to every other operation:
/// no caller ever observes a half-applied `rename` or `flush_all`.
pub trait Store: Send + Clone + 'static {
    /// get the value stored under `key`.
    /// when the key does not exist, return `None`; a miss never creates the key.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// store a string value under `key`, creating or overwriting it
    /// unconditionally, whatever type the old value had.
    fn set(&self, key: String, value: String) -> Result<()>;

    /// atomically move the value under `source` to `dest`, overwriting
    /// any value at `dest` and removing `source`.
    ///
    /// # Error
    ///
    /// when `source` does not exist, it should throw `NoSuchKey` and leave
    /// the store untouched.
    fn rename(&self, source: &str, dest: String) -> Result<()>;

    /// set `field` to `value` inside the hash under `key`, creating the
    /// hash when the key is absent. Returns the number of fields newly
    /// created: 1 on insert, 0 on overwrite.
    ///
    /// # Error
    ///
    /// when the key holds a non-hash value, it should throw `WrongType`
    /// and leave the old value untouched.
    fn hset(&self, key: String, field: String, value: String) -> Result<usize>;

    /// get `field` from the hash under `key`.
    /// when the key is absent, the key is not a hash, or the field is
    /// absent within the hash, return `None`.
    fn hget(&self, key: &str, field: &str) -> Result<Option<String>>;

    /// atomically remove every key. No reader started after this begins
    /// may observe a pre-flush key.
    fn flush_all(&self) -> Result<()>;
}
