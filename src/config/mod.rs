//! Hint configuration: which language to decorate and how hints look.
//!
//! User-level config: `~/.bindhints/config.yaml`
//! Project-level config: `.bindhints/config.yaml` (overrides the user file key by key)
//!
//! Resolution: project config → user config → built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Theme colour keys for the rendered hint text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationStyle {
    pub color: String,
    pub background_color: String,
}

impl Default for DecorationStyle {
    fn default() -> Self {
        Self {
            color: "rust.typeHintColor".into(),
            background_color: "rust.typeHintBackgroundColor".into(),
        }
    }
}

/// Fully resolved hint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HintsConfig {
    /// Documents with any other language identifier are left alone.
    pub language_id: String,
    /// Prepended to the type text reported by the service.
    pub label_prefix: String,
    /// Token identifying this crate's decorations on the editor surface.
    pub decoration_key: String,
    pub decoration: DecorationStyle,
}

impl Default for HintsConfig {
    fn default() -> Self {
        Self {
            language_id: "rust".into(),
            label_prefix: ": ".into(),
            decoration_key: "bindhints.typeHint".into(),
            decoration: DecorationStyle::default(),
        }
    }
}

/// One config file on disk. Every key is optional so layers can be merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigLayer {
    #[serde(skip_serializing_if = "Option::is_none")]
    language_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    decoration_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    decoration: Option<DecorationStyle>,
}

/// Path to `~/.bindhints/`.
fn dirs_path() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|p| PathBuf::from(p).join(".bindhints"))
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME")
            .ok()
            .map(|p| PathBuf::from(p).join(".bindhints"))
    }
}

const PROJECT_CONFIG: &str = ".bindhints/config.yaml";

impl HintsConfig {
    /// Load config from disk, merging user + project files over the defaults.
    pub fn load() -> Self {
        let mut config = Self::default();
        if let Some(dir) = dirs_path() {
            config.apply(read_layer(&dir.join("config.yaml")));
        }
        config.apply(read_layer(Path::new(PROJECT_CONFIG)));
        config
    }

    /// Load a single explicit file over the defaults.
    pub fn load_from(path: &Path) -> Self {
        let mut config = Self::default();
        config.apply(read_layer(path));
        config
    }

    /// Write the full config as YAML.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|e| format!("YAML serialize error: {e}"))?;
        std::fs::write(path, yaml).map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        Ok(())
    }

    fn apply(&mut self, layer: ConfigLayer) {
        if let Some(language_id) = layer.language_id {
            self.language_id = language_id;
        }
        if let Some(prefix) = layer.label_prefix {
            self.label_prefix = prefix;
        }
        if let Some(key) = layer.decoration_key {
            self.decoration_key = key;
        }
        if let Some(decoration) = layer.decoration {
            self.decoration = decoration;
        }
    }
}

/// Missing files are silent; unreadable YAML is logged and ignored.
fn read_layer(path: &Path) -> ConfigLayer {
    let Ok(content) = std::fs::read_to_string(path) else {
        return ConfigLayer::default();
    };
    match serde_yaml::from_str(&content) {
        Ok(layer) => layer,
        Err(e) => {
            warn!("ignoring {}: {e}", path.display());
            ConfigLayer::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = HintsConfig::default();
        assert_eq!(config.language_id, "rust");
        assert_eq!(config.label_prefix, ": ");
        assert_eq!(config.decoration.color, "rust.typeHintColor");
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "label_prefix: \" -> \"\n").unwrap();

        let config = HintsConfig::load_from(&path);
        assert_eq!(config.label_prefix, " -> ");
        assert_eq!(config.language_id, "rust");
        assert_eq!(config.decoration_key, "bindhints.typeHint");
    }

    #[test]
    fn layers_override_key_by_key() {
        let mut config = HintsConfig::default();
        config.apply(serde_yaml::from_str("language_id: ron\n").unwrap());
        config.apply(
            serde_yaml::from_str(
                "decoration:\n  color: editor.foreground\n  background_color: editor.background\n",
            )
            .unwrap(),
        );
        assert_eq!(config.language_id, "ron");
        assert_eq!(config.decoration.color, "editor.foreground");
        assert_eq!(config.label_prefix, ": ");
    }

    #[test]
    fn invalid_yaml_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "language_id: [unclosed\n").unwrap();
        assert_eq!(HintsConfig::load_from(&path), HintsConfig::default());
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = HintsConfig::load_from(&dir.path().join("nope.yaml"));
        assert_eq!(config, HintsConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = HintsConfig {
            label_prefix: " :: ".into(),
            ..HintsConfig::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(HintsConfig::load_from(&path), config);
    }
}
