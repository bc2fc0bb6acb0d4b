/// Local durable storage port: string keys to string values.
///
/// The browser shell backs this with localStorage; native shells and
/// tests use `MemoryStore`. The core never touches storage directly —
/// it goes through an injected implementation of this trait, so the
/// state machine stays free of platform I/O.
pub trait KeyValueStore {
    /// Read a value. `None` when the key is absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, overwriting any existing one.
    fn set(&mut self, key: &str, value: &str);

    /// Delete a key. Deleting an absent key is a no-op.
    fn remove(&mut self, key: &str);
}
