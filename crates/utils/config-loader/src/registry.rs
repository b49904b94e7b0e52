use crate::{
    error::{RegistryError, RegistryResult},
    namespace::Namespace,
    source::{ConfigSource, ProcessEnv},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::{
    collections::HashMap,
    fmt::{self, Debug},
    sync::{Arc, Mutex, PoisonError, RwLock},
};
use tracing::{debug, info};

type ErasedFactory = Box<dyn Fn(&dyn ConfigSource) -> serde_json::Result<Value> + Send + Sync>;

struct Entry {
    factory: ErasedFactory,
    /// Snapshot of the first successful evaluation.
    snapshot: Mutex<Option<Value>>,
}

/// Named configuration namespaces, evaluated lazily against one source.
///
/// ```
/// use config_loader::{
///     app_common::{APP_COMMON_CONFIGURATION, AppCommonConfig},
///     registry::ConfigRegistry,
///     source::MapSource,
/// };
///
/// let source = MapSource::new().with("NODE_ENV", "production");
/// let mut registry = ConfigRegistry::new(source);
/// registry.register(APP_COMMON_CONFIGURATION).unwrap();
///
/// let app: AppCommonConfig = registry.get("appCommon").unwrap();
/// assert!(app.is_production_env);
///
/// let tz: String = registry.get_value("appCommon.timezone").unwrap();
/// assert_eq!(tz, "UTC");
/// ```
pub struct ConfigRegistry {
    source: Arc<dyn ConfigSource>,
    entries: HashMap<&'static str, Entry>,
}

impl ConfigRegistry {
    pub fn new<S: ConfigSource + 'static>(source: S) -> Self {
        Self {
            source: Arc::new(source),
            entries: HashMap::new(),
        }
    }

    /// Registry reading the live process environment.
    pub fn from_env() -> Self {
        Self::new(ProcessEnv)
    }

    /// Register a namespace. The factory is not evaluated until first requested.
    pub fn register<T>(&mut self, namespace: Namespace<T>) -> RegistryResult<()>
    where
        T: Serialize + 'static,
    {
        let name = namespace.key();
        if self.entries.contains_key(name) {
            return Err(RegistryError::duplicate(name));
        }

        let factory = namespace.factory();
        self.entries.insert(
            name,
            Entry {
                factory: Box::new(move |source: &dyn ConfigSource| {
                    serde_json::to_value(factory(source))
                }),
                snapshot: Mutex::new(None),
            },
        );
        debug!(namespace = name, "registered configuration namespace");
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered namespace names in sorted order.
    pub fn namespaces(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a whole namespace.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> RegistryResult<T> {
        self.with_snapshot(name, |value| {
            T::deserialize(value).map_err(|e| RegistryError::serialization(name, e))
        })
    }

    /// Resolve a namespace through its own definition.
    pub fn load<T: DeserializeOwned>(&self, namespace: &Namespace<T>) -> RegistryResult<T> {
        self.get(namespace.key())
    }

    /// Resolve a dotted path such as `appCommon.timezone`.
    pub fn get_value<T: DeserializeOwned>(&self, path: &str) -> RegistryResult<T> {
        self.find_value(path)?
            .ok_or_else(|| RegistryError::unknown_key(path))
    }

    /// Like [`ConfigRegistry::get_value`], but a path that does not resolve
    /// inside a registered namespace is `Ok(None)`.
    pub fn find_value<T: DeserializeOwned>(&self, path: &str) -> RegistryResult<Option<T>> {
        let (name, rest) = match path.split_once('.') {
            Some((name, rest)) => (name, Some(rest)),
            None => (path, None),
        };

        self.with_snapshot(name, |root| {
            let found = match rest {
                Some(rest) => rest.split('.').try_fold(root, step),
                None => Some(root),
            };
            found
                .map(|value| {
                    T::deserialize(value).map_err(|e| RegistryError::serialization(name, e))
                })
                .transpose()
        })
    }

    /// Drop the cached snapshot so the next request re-reads the source.
    pub fn refresh(&self, name: &str) -> RegistryResult<()> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| RegistryError::unknown(name))?;
        *entry.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        debug!(namespace = name, "configuration namespace refreshed");
        Ok(())
    }

    fn with_snapshot<R>(
        &self,
        name: &str,
        f: impl FnOnce(&Value) -> RegistryResult<R>,
    ) -> RegistryResult<R> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| RegistryError::unknown(name))?;

        // Held across evaluation so concurrent first reads run the factory once.
        // A factory panic poisons the lock before anything is cached, so the
        // guard is recovered and the factory runs again.
        let mut snapshot = entry.snapshot.lock().unwrap_or_else(PoisonError::into_inner);
        if snapshot.is_none() {
            let value = (entry.factory)(self.source.as_ref())
                .map_err(|e| RegistryError::serialization(name, e))?;
            debug!(namespace = name, "configuration namespace evaluated");
            *snapshot = Some(value);
        }

        match snapshot.as_ref() {
            Some(value) => f(value),
            None => Err(RegistryError::unknown(name)),
        }
    }
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

impl Debug for ConfigRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigRegistry")
            .field("namespaces", &self.namespaces())
            .finish()
    }
}

static GLOBAL: RwLock<Option<Arc<ConfigRegistry>>> = RwLock::new(None);

/// Install the process-wide registry. Fails if one is already installed.
pub fn init_global(registry: ConfigRegistry) -> RegistryResult<Arc<ConfigRegistry>> {
    let mut slot = GLOBAL.write().map_err(|_| RegistryError::Poisoned)?;
    if slot.is_some() {
        return Err(RegistryError::AlreadyInitialized);
    }

    let registry = Arc::new(registry);
    info!(namespaces = ?registry.namespaces(), "global config registry initialized");
    *slot = Some(Arc::clone(&registry));
    Ok(registry)
}

pub fn global() -> RegistryResult<Arc<ConfigRegistry>> {
    GLOBAL
        .read()
        .map_err(|_| RegistryError::Poisoned)?
        .clone()
        .ok_or(RegistryError::NotInitialized)
}

/// Remove the process-wide registry, returning it if one was installed.
///
/// Handles obtained from [`global`] stay valid until dropped.
pub fn teardown_global() -> RegistryResult<Option<Arc<ConfigRegistry>>> {
    let previous = GLOBAL.write().map_err(|_| RegistryError::Poisoned)?.take();
    if previous.is_some() {
        info!("global config registry torn down");
    }
    Ok(previous)
}
