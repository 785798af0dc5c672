use std::{fs, path::Path};

use serde::Deserialize;

pub const CONFIG_FILE: &str = "tree-tools.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_filter: String,
    pub pretty_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            pretty_json: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    log_filter: Option<String>,
    pretty_json: Option<bool>,
}

/// Loads settings from the config file and the environment. A config file
/// that exists but does not parse is skipped; the parse error is returned
/// alongside the defaults so the caller can report it once logging is up.
pub fn load_settings() -> (Settings, Option<String>) {
    let (settings, problem) = load_settings_from(Path::new(CONFIG_FILE));
    (apply_env_overrides(settings, |key| std::env::var(key).ok()), problem)
}

fn load_settings_from(path: &Path) -> (Settings, Option<String>) {
    let mut settings = Settings::default();

    let Ok(raw) = fs::read_to_string(path) else {
        return (settings, None);
    };
    match toml::from_str::<FileSettings>(&raw) {
        Ok(file_cfg) => {
            if let Some(v) = file_cfg.log_filter {
                settings.log_filter = v;
            }
            if let Some(v) = file_cfg.pretty_json {
                settings.pretty_json = v;
            }
        }
        Err(err) => {
            return (
                settings,
                Some(format!("ignoring config file '{}': {err}", path.display())),
            )
        }
    }

    (settings, None)
}

fn apply_env_overrides(mut settings: Settings, var: impl Fn(&str) -> Option<String>) -> Settings {
    if let Some(v) = var("TREE_TOOLS_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = var("APP__PRETTY_JSON") {
        if let Ok(parsed) = v.trim().parse::<bool>() {
            settings.pretty_json = parsed;
        }
    }

    settings
}
