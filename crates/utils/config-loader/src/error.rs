use thiserror::Error;

/// Errors raised by [`ConfigRegistry`](crate::registry::ConfigRegistry) and the
/// process-wide registry slot.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("namespace '{name}' is already registered")]
    DuplicateNamespace { name: String },

    #[error("namespace '{name}' is not registered")]
    UnknownNamespace { name: String },

    #[error("no configuration value at '{path}'")]
    UnknownKey { path: String },

    #[error("namespace '{name}' could not be (de)serialized")]
    Serialization {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The process-wide registry was already installed.
    #[error("global config registry is already initialized")]
    AlreadyInitialized,

    /// No process-wide registry is installed.
    #[error("global config registry is not initialized")]
    NotInitialized,

    #[error("global config registry lock is poisoned")]
    Poisoned,
}

impl RegistryError {
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateNamespace { name: name.into() }
    }

    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownNamespace { name: name.into() }
    }

    pub fn unknown_key(path: impl Into<String>) -> Self {
        Self::UnknownKey { path: path.into() }
    }

    pub fn serialization(name: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            name: name.into(),
            source,
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
