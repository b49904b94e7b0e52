use std::{
    collections::HashMap,
    fmt::{self, Debug},
    sync::Arc,
};

/// Key/value lookup that namespace factories read from.
pub trait ConfigSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Reads the live process environment at call time.
///
/// Values that are not valid UTF-8 are converted lossily rather than dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ConfigSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

/// Fixed in-memory snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Ordered stack of sources, the first one that knows a key wins.
///
/// ```
/// use config_loader::source::{ConfigSource, LayeredSource, MapSource};
///
/// let overrides = MapSource::new().with("TZ", "Asia/Jakarta");
/// let defaults = MapSource::new().with("TZ", "UTC").with("NODE_ENV", "development");
///
/// let source = LayeredSource::new().layer(overrides).layer(defaults);
/// assert_eq!(source.get("TZ").as_deref(), Some("Asia/Jakarta"));
/// assert_eq!(source.get("NODE_ENV").as_deref(), Some("development"));
/// ```
#[derive(Default, Clone)]
pub struct LayeredSource {
    layers: Vec<Arc<dyn ConfigSource>>,
}

impl LayeredSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer with lower precedence than every existing one.
    pub fn layer<S: ConfigSource + 'static>(mut self, source: S) -> Self {
        self.layers.push(Arc::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Debug for LayeredSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredSource")
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl ConfigSource for LayeredSource {
    fn get(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }
}
