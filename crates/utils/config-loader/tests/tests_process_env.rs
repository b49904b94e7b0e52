//! The only test binary that touches the real process environment; keep it to one test.

use config_loader::{
    APP_COMMON_CONFIGURATION, AppCommonConfig, ConfigRegistry, get_app_common_config,
};

fn set_env(pairs: &[(&str, Option<&str>)]) {
    for (key, value) in pairs {
        // SAFETY: no other test in this binary reads or writes the environment.
        unsafe {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}

#[test]
fn test_app_common_from_process_env() {
    set_env(&[
        ("NODE_ENV", Some("production")),
        ("FRONTEND_URL", Some("https://app.example.com")),
        ("TZ", Some("America/New_York")),
    ]);
    let config = get_app_common_config();
    assert!(config.is_production_env);
    assert_eq!(config.frontend_url.as_deref(), Some("https://app.example.com"));
    assert_eq!(config.timezone, "America/New_York");
    assert_eq!(config, get_app_common_config());

    set_env(&[
        ("NODE_ENV", Some("development")),
        ("FRONTEND_URL", None),
        ("TZ", None),
    ]);
    let config = get_app_common_config();
    assert!(!config.is_production_env);
    assert_eq!(config.frontend_url, None);
    assert_eq!(config.timezone, "UTC");

    set_env(&[("NODE_ENV", Some("production")), ("TZ", Some(""))]);
    let config = get_app_common_config();
    assert!(config.is_production_env);
    assert_eq!(config.frontend_url, None);
    assert_eq!(config.timezone, "UTC");

    // registry snapshot is taken on first read, not at registration
    let mut registry = ConfigRegistry::from_env();
    registry.register(APP_COMMON_CONFIGURATION).unwrap();
    set_env(&[("TZ", Some("Europe/Berlin"))]);
    let app: AppCommonConfig = registry.get("appCommon").unwrap();
    assert_eq!(app.timezone, "Europe/Berlin");

    set_env(&[("TZ", Some("Asia/Tokyo"))]);
    let cached: String = registry.get_value("appCommon.timezone").unwrap();
    assert_eq!(cached, "Europe/Berlin");

    registry.refresh("appCommon").unwrap();
    let refreshed: String = registry.get_value("appCommon.timezone").unwrap();
    assert_eq!(refreshed, "Asia/Tokyo");

    // non-UTF-8 values are converted lossily, not dropped
    #[cfg(unix)]
    {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        // SAFETY: see `set_env`.
        unsafe {
            std::env::set_var("FRONTEND_URL", OsStr::from_bytes(b"https://app.example.com/\xff"));
        }
        let config = get_app_common_config();
        assert_eq!(
            config.frontend_url.as_deref(),
            Some("https://app.example.com/\u{FFFD}")
        );
    }

    set_env(&[("NODE_ENV", None), ("TZ", None), ("FRONTEND_URL", None)]);
}
