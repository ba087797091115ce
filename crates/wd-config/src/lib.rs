//! Configuration management for wd.
//!
//! Two kinds of configuration live here:
//!
//! - **Project settings** ([`Settings`]): where the site configuration, the
//!   documentation tree and the generated endpoint fragments live, plus the
//!   API merge mode. Parsed from an optional `wd.toml`, auto-discovered in the
//!   current directory and its parents.
//! - **Site configuration** ([`SiteConfig`]): the `config.json` file that
//!   carries the navbar and the persisted sidebars. See the [`site`] module.
//!
//! CLI settings can be applied during load via [`CliSettings`].

pub mod site;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use site::{Category, Group, NavbarItem, SidebarItem, SidebarSection, SiteConfig};

/// CLI settings that override settings file values.
///
/// All fields are optional. Only non-None values override the loaded settings.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site configuration file.
    pub config_file: Option<PathBuf>,
    /// Override documentation directory.
    pub docs_dir: Option<PathBuf>,
    /// Override endpoint fragment directory.
    pub api_pages_dir: Option<PathBuf>,
    /// Override API merge mode.
    pub merge_mode: Option<MergeMode>,
    /// Override the slug segment removed from generated slugs.
    pub remove_segment: Option<String>,
}

/// Settings filename to search for.
const SETTINGS_FILENAME: &str = "wd.toml";

/// How endpoint fragments are matched to generated API pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Search the whole documentation tree by name and route, then move the
    /// merged page next to the fragment's mirrored location.
    #[default]
    Dashboard,
    /// Merge in place into `docs/reference/<same relative path>`.
    Reference,
}

impl std::str::FromStr for MergeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dashboard" => Ok(Self::Dashboard),
            "reference" => Ok(Self::Reference),
            other => Err(ConfigError::Validation(format!(
                "unknown merge mode '{other}' (expected 'dashboard' or 'reference')"
            ))),
        }
    }
}

/// Project settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path configuration (relative strings from TOML).
    paths: PathsConfigRaw,
    /// API fragment merge configuration.
    pub api: ApiConfig,
    /// Slug generation configuration.
    pub slugs: SlugsConfig,

    /// Resolved paths (set after loading).
    #[serde(skip)]
    pub paths_resolved: PathsConfig,
    /// Path to the settings file (set after loading).
    #[serde(skip)]
    pub settings_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw path configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PathsConfigRaw {
    config: Option<String>,
    docs_dir: Option<String>,
    api_pages_dir: Option<String>,
}

/// Resolved path configuration.
#[derive(Debug, Default, Clone)]
pub struct PathsConfig {
    /// Project root (directory of `wd.toml`, or the working directory).
    pub project_dir: PathBuf,
    /// Site configuration file (`config.json`).
    pub config_file: PathBuf,
    /// Documentation pages root.
    pub docs_dir: PathBuf,
    /// Generated endpoint fragments root.
    pub api_pages_dir: PathBuf,
}

impl PathsConfig {
    /// Content roots scanned by sidebar synchronization, in scan order.
    #[must_use]
    pub fn content_roots(&self) -> Vec<PathBuf> {
        vec![self.docs_dir.clone(), self.api_pages_dir.clone()]
    }
}

/// API merge configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Fragment matching strategy.
    pub merge_mode: MergeMode,
}

/// Slug generation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SlugsConfig {
    /// Path segment dropped from every generated slug.
    pub remove_segment: String,
}

impl Default for SlugsConfig {
    fn default() -> Self {
        Self {
            remove_segment: "documentation".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parsing error.
    #[error("JSON parse error in {}: {source}", path.display())]
    Json {
        /// File being parsed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Settings {
    /// Load settings from file with optional CLI settings.
    ///
    /// If `settings_path` is provided, loads from that file.
    /// Otherwise, searches for `wd.toml` in current directory and parents,
    /// falling back to defaults rooted at the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `settings_path` doesn't exist or parsing fails.
    pub fn load(
        settings_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut settings = if let Some(path) = settings_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_settings() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(cli) = cli_settings {
            settings.apply_cli_settings(cli);
        }

        Ok(settings)
    }

    /// Apply CLI settings to the loaded settings.
    fn apply_cli_settings(&mut self, cli: &CliSettings) {
        if let Some(config_file) = &cli.config_file {
            self.paths_resolved.config_file.clone_from(config_file);
        }
        if let Some(docs_dir) = &cli.docs_dir {
            self.paths_resolved.docs_dir.clone_from(docs_dir);
        }
        if let Some(api_pages_dir) = &cli.api_pages_dir {
            self.paths_resolved.api_pages_dir.clone_from(api_pages_dir);
        }
        if let Some(mode) = cli.merge_mode {
            self.api.merge_mode = mode;
        }
        if let Some(segment) = &cli.remove_segment {
            self.slugs.remove_segment.clone_from(segment);
        }
    }

    /// Search for settings file in current directory and parents.
    fn discover_settings() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(SETTINGS_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default settings with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default settings with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            paths: PathsConfigRaw::default(),
            api: ApiConfig::default(),
            slugs: SlugsConfig::default(),
            paths_resolved: PathsConfig {
                project_dir: base.to_path_buf(),
                config_file: base.join("config.json"),
                docs_dir: base.join("docs"),
                api_pages_dir: base.join("apiPages"),
            },
            settings_path: None,
        }
    }

    /// Load settings from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut settings: Self = toml::from_str(&content)?;

        settings.validate()?;

        let settings_dir = path.parent().unwrap_or(Path::new("."));
        settings.resolve_paths(settings_dir);
        settings.settings_path = Some(path.to_path_buf());

        Ok(settings)
    }

    /// Validate raw settings values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a configured path is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            (self.paths.config.as_deref(), "paths.config"),
            (self.paths.docs_dir.as_deref(), "paths.docs_dir"),
            (self.paths.api_pages_dir.as_deref(), "paths.api_pages_dir"),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                require_non_empty(value, field)?;
            }
        }
        Ok(())
    }

    /// Resolve relative paths against the settings file directory.
    fn resolve_paths(&mut self, settings_dir: &Path) {
        let resolve =
            |path: Option<&str>, default: &str| settings_dir.join(path.unwrap_or(default));

        self.paths_resolved = PathsConfig {
            project_dir: settings_dir.to_path_buf(),
            config_file: resolve(self.paths.config.as_deref(), "config.json"),
            docs_dir: resolve(self.paths.docs_dir.as_deref(), "docs"),
            api_pages_dir: resolve(self.paths.api_pages_dir.as_deref(), "apiPages"),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default_with_base(Path::new("/test"));
        assert_eq!(
            settings.paths_resolved.config_file,
            PathBuf::from("/test/config.json")
        );
        assert_eq!(settings.paths_resolved.docs_dir, PathBuf::from("/test/docs"));
        assert_eq!(
            settings.paths_resolved.api_pages_dir,
            PathBuf::from("/test/apiPages")
        );
        assert_eq!(settings.api.merge_mode, MergeMode::Dashboard);
        assert_eq!(settings.slugs.remove_segment, "documentation");
    }

    #[test]
    fn test_parse_minimal_settings() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.api.merge_mode, MergeMode::Dashboard);
        assert!(settings.paths.docs_dir.is_none());
    }

    #[test]
    fn test_parse_merge_mode() {
        let toml = r#"
[api]
merge_mode = "reference"
"#;
        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.api.merge_mode, MergeMode::Reference);
    }

    #[test]
    fn test_parse_unknown_merge_mode_fails() {
        let toml = r#"
[api]
merge_mode = "sideways"
"#;
        let result: Result<Settings, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_mode_from_str() {
        assert_eq!("Dashboard".parse::<MergeMode>().unwrap(), MergeMode::Dashboard);
        assert_eq!("reference".parse::<MergeMode>().unwrap(), MergeMode::Reference);
        let err = "other".parse::<MergeMode>().unwrap_err();
        assert!(err.to_string().contains("other"));
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[paths]
config = "site/config.json"
docs_dir = "content"
"#;
        let mut settings: Settings = toml::from_str(toml).unwrap();
        settings.resolve_paths(Path::new("/project"));

        assert_eq!(
            settings.paths_resolved.config_file,
            PathBuf::from("/project/site/config.json")
        );
        assert_eq!(
            settings.paths_resolved.docs_dir,
            PathBuf::from("/project/content")
        );
        assert_eq!(
            settings.paths_resolved.api_pages_dir,
            PathBuf::from("/project/apiPages")
        );
        assert_eq!(settings.paths_resolved.project_dir, PathBuf::from("/project"));
    }

    #[test]
    fn test_content_roots_order() {
        let settings = Settings::default_with_base(Path::new("/p"));
        assert_eq!(
            settings.paths_resolved.content_roots(),
            vec![PathBuf::from("/p/docs"), PathBuf::from("/p/apiPages")]
        );
    }

    #[test]
    fn test_validate_empty_path() {
        let toml = r#"
[paths]
docs_dir = "  "
"#;
        let settings: Settings = toml::from_str(toml).unwrap();
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("paths.docs_dir"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Settings::load(Some(Path::new("/nonexistent/wd.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_against_file_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wd.toml");
        std::fs::write(&path, "[paths]\ndocs_dir = \"pages\"\n").unwrap();

        let settings = Settings::load(Some(&path), None).unwrap();

        assert_eq!(settings.paths_resolved.docs_dir, dir.path().join("pages"));
        assert_eq!(settings.settings_path, Some(path));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut settings = Settings::default_with_base(Path::new("/test"));
        let cli = CliSettings {
            docs_dir: Some(PathBuf::from("/custom/docs")),
            merge_mode: Some(MergeMode::Reference),
            ..Default::default()
        };

        settings.apply_cli_settings(&cli);

        assert_eq!(
            settings.paths_resolved.docs_dir,
            PathBuf::from("/custom/docs")
        );
        assert_eq!(settings.api.merge_mode, MergeMode::Reference);
        // Unchanged
        assert_eq!(
            settings.paths_resolved.config_file,
            PathBuf::from("/test/config.json")
        );
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let before = Settings::default_with_base(Path::new("/test"));
        let mut settings = Settings::default_with_base(Path::new("/test"));

        settings.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            settings.paths_resolved.docs_dir,
            before.paths_resolved.docs_dir
        );
        assert_eq!(settings.slugs.remove_segment, before.slugs.remove_segment);
    }
}
