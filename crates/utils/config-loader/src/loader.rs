use crate::source::MapSource;
use config::{Config, ConfigError, File, FileStoredFormat, Format, Map, Value, ValueKind};
use std::{
    io::{Error, ErrorKind},
    path::Path,
};
use tracing::debug;

/// Load a structured file (toml, json, yaml, ...) into `T`, format picked by extension.
pub fn load_config<T>(path: impl AsRef<Path>) -> Result<T, ConfigError>
where
    T: serde::de::DeserializeOwned,
{
    let config_path =
        std::fs::canonicalize(path.as_ref()).map_err(|e| ConfigError::Foreign(Box::new(e)))?;

    let settings = Config::builder()
        .add_source(File::from(config_path))
        .build()?;

    settings.try_deserialize::<T>()
}

/// Read a `.env` / `.properties` file into a [`MapSource`].
///
/// Keys keep their case, so the result can sit under or over
/// [`ProcessEnv`](crate::source::ProcessEnv) in a
/// [`LayeredSource`](crate::source::LayeredSource).
pub fn load_properties(path: impl AsRef<Path>) -> Result<MapSource, ConfigError> {
    let path = path.as_ref();
    let uri = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Foreign(Box::new(e)))?;

    let parsed = PropertiesFile
        .parse(Some(&uri), &text)
        .map_err(ConfigError::Foreign)?;

    let mut source = MapSource::new();
    for (key, value) in parsed {
        source.insert(key, value.into_string()?);
    }
    debug!(path = %uri, keys = source.len(), "loaded properties file");

    Ok(source)
}

/// `key=value` lines as written in `.env` and Java-style `.properties` files.
#[derive(Debug, Clone)]
pub struct PropertiesFile;

impl Format for PropertiesFile {
    fn parse(
        &self,
        uri: Option<&String>,
        text: &str,
    ) -> Result<Map<String, Value>, Box<dyn std::error::Error + Send + Sync>> {
        let mut result = Map::new();

        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments (# or !)
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);

            let (key, value) = match line.split_once('=') {
                Some((k, v)) if !k.trim().is_empty() => (k.trim(), unquote(v.trim())),
                _ => {
                    return Err(Box::new(Error::new(
                        ErrorKind::InvalidData,
                        format!("Invalid line {}: '{}'", lineno + 1, line),
                    )));
                }
            };

            result.insert(
                key.to_string(),
                Value::new(uri, ValueKind::String(value.to_string())),
            );
        }

        Ok(result)
    }
}

impl FileStoredFormat for PropertiesFile {
    fn file_extensions(&self) -> &'static [&'static str] {
        &["properties", "env"]
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ConfigSource;

    fn parse(text: &str) -> Map<String, Value> {
        PropertiesFile.parse(None, text).unwrap()
    }

    fn string(map: &Map<String, Value>, key: &str) -> String {
        map.get(key).cloned().unwrap().into_string().unwrap()
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let map = parse("# comment\n! also a comment\n\nNODE_ENV = production\n");
        assert_eq!(map.len(), 1);
        assert_eq!(string(&map, "NODE_ENV"), "production");
    }

    #[test]
    fn test_parse_export_and_quotes() {
        let map = parse(
            "export FRONTEND_URL=\"https://app.example.com\"\n\
             TZ='Asia/Jakarta'\nEMPTY=\nHALF=\"open\n",
        );
        assert_eq!(string(&map, "FRONTEND_URL"), "https://app.example.com");
        assert_eq!(string(&map, "TZ"), "Asia/Jakarta");
        assert_eq!(string(&map, "EMPTY"), "");
        assert_eq!(string(&map, "HALF"), "\"open");
    }

    #[test]
    fn test_value_keeps_later_equals_signs() {
        let map = parse("FRONTEND_URL=https://app.example.com/?a=b");
        assert_eq!(string(&map, "FRONTEND_URL"), "https://app.example.com/?a=b");
    }

    #[test]
    fn test_parse_rejects_line_without_separator() {
        let err = PropertiesFile.parse(None, "NODE_ENV=test\nTZ\n").unwrap_err();
        assert!(err.to_string().contains("Invalid line 2"));

        let err = PropertiesFile.parse(None, "=value").unwrap_err();
        assert!(err.to_string().contains("Invalid line 1"));
    }

    #[test]
    fn test_load_properties_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "NODE_ENV=production\nTZ=\n").unwrap();

        let source = load_properties(&path).unwrap();
        assert_eq!(source.get("NODE_ENV").as_deref(), Some("production"));
        assert_eq!(source.get("TZ").as_deref(), Some(""));
    }

    #[test]
    fn test_load_properties_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_properties(dir.path().join("missing.env")).unwrap_err();
        assert!(matches!(err, ConfigError::Foreign(_)));
    }

    #[test]
    fn test_load_config_toml() {
        use crate::logging::LoggerConfig;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logger.toml");
        std::fs::write(&path, "max_level = \"DEBUG\"\njson = true\n").unwrap();

        let config: LoggerConfig = load_config(&path).unwrap();
        assert_eq!(config.max_level, "DEBUG");
        assert_eq!(config.json, Some(true));
    }
}
