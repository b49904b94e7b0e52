use crate::{
    env::{FRONTEND_URL, NODE_ENV, NodeEnv, TZ},
    namespace::{Namespace, register_as},
    source::{ConfigSource, ProcessEnv},
};
use serde::{Deserialize, Serialize};

pub const APP_COMMON_NAMESPACE: &str = "appCommon";
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Settings shared by every service of the application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct AppCommonConfig {
    pub is_production_env: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_url: Option<String>,
    pub timezone: String,
}

impl AppCommonConfig {
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        let is_production_env =
            source.get(NODE_ENV).as_deref() == Some(NodeEnv::Production.as_str());

        let timezone = source
            .get(TZ)
            .filter(|tz| !tz.is_empty())
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());

        Self {
            is_production_env,
            frontend_url: source.get(FRONTEND_URL),
            timezone,
        }
    }

    pub fn node_env(source: &dyn ConfigSource) -> Option<NodeEnv> {
        source.get(NODE_ENV).map(NodeEnv::from)
    }
}

/// Read `appCommon` from the live process environment.
pub fn get_app_common_config() -> AppCommonConfig {
    AppCommonConfig::from_source(&ProcessEnv)
}

pub const APP_COMMON_CONFIGURATION: Namespace<AppCommonConfig> =
    register_as(APP_COMMON_NAMESPACE, AppCommonConfig::from_source);
