use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares the runtime mode of the process.
pub const NODE_ENV: &str = "NODE_ENV";
/// Public URL of the frontend that talks to this backend.
pub const FRONTEND_URL: &str = "FRONTEND_URL";
/// Timezone name or offset, e.g. `Asia/Jakarta` or `+07:00`.
pub const TZ: &str = "TZ";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
#[non_exhaustive]
pub enum NodeEnv {
    Development,
    Production,
    Test,
    Staging,
    Unknown(String),
}

impl NodeEnv {
    pub fn as_str(&self) -> &str {
        match self {
            NodeEnv::Development => "development",
            NodeEnv::Production => "production",
            NodeEnv::Test => "test",
            NodeEnv::Staging => "staging",
            NodeEnv::Unknown(other) => other,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, NodeEnv::Production)
    }
}

// Exact match only: "Production" or " production" are Unknown.
impl From<&str> for NodeEnv {
    fn from(value: &str) -> Self {
        match value {
            "development" => NodeEnv::Development,
            "production" => NodeEnv::Production,
            "test" => NodeEnv::Test,
            "staging" => NodeEnv::Staging,
            other => NodeEnv::Unknown(other.to_string()),
        }
    }
}

impl From<String> for NodeEnv {
    fn from(value: String) -> Self {
        NodeEnv::from(value.as_str())
    }
}

impl From<NodeEnv> for String {
    fn from(value: NodeEnv) -> Self {
        match value {
            NodeEnv::Unknown(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NodeEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
