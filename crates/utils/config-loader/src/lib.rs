pub mod app_common;
pub mod env;
pub mod error;
pub mod loader;
pub mod logging;
pub mod namespace;
pub mod registry;
pub mod source;

pub use app_common::{
    APP_COMMON_CONFIGURATION, APP_COMMON_NAMESPACE, AppCommonConfig, get_app_common_config,
};
pub use env::NodeEnv;
pub use error::{RegistryError, RegistryResult};
pub use namespace::{Namespace, register_as};
pub use registry::{ConfigRegistry, global, init_global, teardown_global};
pub use source::{ConfigSource, LayeredSource, MapSource, ProcessEnv};

// Re-exports
pub use config::ConfigError;
