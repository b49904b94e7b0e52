use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[non_exhaustive]
pub struct LoggerConfig {
    pub max_level: String,
    /// Force JSON (`true`) or human (`false`) output. Unset follows `isProductionEnv`.
    #[serde(default)]
    pub json: Option<bool>,
}

impl LoggerConfig {
    pub fn new(max_level: impl Into<String>) -> Self {
        Self {
            max_level: max_level.into(),
            json: None,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = Some(json);
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new("INFO")
    }
}
