//! Configuration access port trait.

/// Read-only view over session settings, keyed by INI section and key.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
}
