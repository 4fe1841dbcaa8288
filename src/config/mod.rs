use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

pub(crate) const APP_DIR: &str = "scenetag";
const APP_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_BADGE_SPACING: f64 = 8.0;

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Directory holding the settings blobs; defaults to the XDG data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_badge_spacing")]
    pub badge_spacing: f64,
    /// Commit every armed selection as soon as it is applied.
    #[serde(default)]
    pub auto_tag: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            badge_spacing: DEFAULT_BADGE_SPACING,
            auto_tag: false,
        }
    }
}

fn default_badge_spacing() -> f64 {
    DEFAULT_BADGE_SPACING
}

pub fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    if !path.exists() {
        return AppConfig::default();
    }
    let config = match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    };
    sanitize(config)
}

fn sanitize(mut config: AppConfig) -> AppConfig {
    if !config.badge_spacing.is_finite() || config.badge_spacing < 0.0 {
        tracing::warn!(
            spacing = config.badge_spacing,
            "invalid badge_spacing; using default"
        );
        config.badge_spacing = DEFAULT_BADGE_SPACING;
    }
    config
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture_root() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let pid = std::process::id();
        path.push(format!("scenetag-config-{pid}-{nanos}"));
        path
    }

    fn with_config_file<F: FnOnce(&Path)>(contents: &str, f: F) {
        let root = fixture_root();
        let dir = root.join(APP_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(APP_CONFIG_FILE), contents).unwrap();
        f(&root);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "scenetag",
            "config.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/config-root/scenetag/config.json"));
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path("scenetag", "config.json", None, Some(Path::new("/tmp/home")))
            .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/scenetag/config.json"));
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("scenetag", "config.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn missing_config_yields_defaults() {
        let root = fixture_root();
        let config = load_app_config_with(Some(&root), None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.badge_spacing, DEFAULT_BADGE_SPACING);
        assert!(!config.auto_tag);
    }

    #[test]
    fn partial_config_keeps_field_defaults() {
        with_config_file(r#"{ "auto_tag": true }"#, |root| {
            let config = load_app_config_with(Some(root), None);
            assert!(config.auto_tag);
            assert_eq!(config.badge_spacing, DEFAULT_BADGE_SPACING);
            assert!(config.data_dir.is_none());
        });
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        with_config_file("{ not json", |root| {
            assert_eq!(load_app_config_with(Some(root), None), AppConfig::default());
        });
    }

    #[test]
    fn negative_spacing_is_replaced_with_default() {
        with_config_file(r#"{ "badge_spacing": -4.0, "data_dir": "/srv/tags" }"#, |root| {
            let config = load_app_config_with(Some(root), None);
            assert_eq!(config.badge_spacing, DEFAULT_BADGE_SPACING);
            assert_eq!(config.data_dir, Some(PathBuf::from("/srv/tags")));
        });
    }
}
