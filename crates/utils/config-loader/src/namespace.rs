use crate::source::ConfigSource;
use std::fmt::{self, Debug};

/// Factory producing a namespace value from a config source.
pub type NamespaceFactory<T> = fn(&dyn ConfigSource) -> T;

/// A configuration namespace: a key paired with the factory that builds its value.
///
/// Creating a namespace never evaluates the factory; the value is built on
/// every [`Namespace::load`] call, or once per registry when resolved through
/// [`ConfigRegistry`](crate::registry::ConfigRegistry).
pub struct Namespace<T> {
    key: &'static str,
    factory: NamespaceFactory<T>,
}

impl<T> Namespace<T> {
    pub const fn new(key: &'static str, factory: NamespaceFactory<T>) -> Self {
        Self { key, factory }
    }

    pub const fn key(&self) -> &'static str {
        self.key
    }

    pub fn factory(&self) -> NamespaceFactory<T> {
        self.factory
    }

    pub fn load(&self, source: &dyn ConfigSource) -> T {
        (self.factory)(source)
    }
}

// Manual impls: derive would require `T: Clone`/`T: Debug`.
impl<T> Clone for Namespace<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Namespace<T> {}

impl<T> Debug for Namespace<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("key", &self.key)
            .field("value", &std::any::type_name::<T>())
            .finish()
    }
}

/// Pair `key` with `factory` without evaluating it.
pub const fn register_as<T>(key: &'static str, factory: NamespaceFactory<T>) -> Namespace<T> {
    Namespace::new(key, factory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MapSource;

    fn port(source: &dyn ConfigSource) -> u16 {
        source
            .get("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000)
    }

    const SERVER: Namespace<u16> = register_as("server", port);

    #[test]
    fn test_load_runs_factory_each_time() {
        let source = MapSource::new().with("PORT", "8080");
        assert_eq!(SERVER.key(), "server");
        assert_eq!(SERVER.load(&source), 8080);
        assert_eq!(SERVER.load(&MapSource::new()), 3000);
    }

    #[test]
    fn test_closure_without_captures_is_a_factory() {
        let ns = register_as("flag", |source: &dyn ConfigSource| source.get("FLAG").is_some());
        assert!(ns.load(&MapSource::new().with("FLAG", "")));
        assert!(!ns.load(&MapSource::new()));
    }

    #[test]
    fn test_debug_names_value_type() {
        let debug = format!("{:?}", SERVER);
        assert!(debug.contains("server"));
        assert!(debug.contains("u16"));
    }
}
