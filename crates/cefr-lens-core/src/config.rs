//! Configuration loading and discovery.
//!
//! Configuration is merged from, lowest precedence first:
//! 1. Built-in defaults
//! 2. User config in the platform config directory
//! 3. Project config, found by walking up from the current directory
//! 4. Explicit files (`--config`)
//! 5. `CEFR_LENS_*` environment variables
//!
//! # Supported formats
//!
//! - TOML (`.toml`)
//! - YAML (`.yaml`, `.yml`)
//! - JSON (`.json`)
//!
//! # Config file locations (in order of precedence, highest first):
//! - `cefr-lens.<ext>` in current directory or any parent
//! - `.cefr-lens.<ext>` in current directory or any parent
//! - `cefr.<ext>` in current directory or any parent
//! - `.cefr.<ext>` in current directory or any parent
//! - `~/.config/cefr-lens/config.<ext>` (user config)
//!
//! Only the closest directory with any match contributes. When several files
//! exist there, all are merged.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use cefr_lens_core::config::ConfigLoader;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! let score_config = config.score_config();
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::level::CefrLevel;
use crate::score_config::{ScoreConfig, ScoreOption, Weights};

/// The configuration for cefr-lens.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files (falls back to platform defaults if unset).
    pub log_dir: Option<Utf8PathBuf>,
    /// Sub-score weights. Ignored unless non-negative and summing to 1.0.
    pub weights: Option<Weights>,
    /// Always analyze long texts whole instead of sampling.
    pub full_analysis: bool,
    /// Word count above which texts are sampled (default 10000).
    pub sampling_threshold: Option<usize>,
    /// Highest acceptable level for the `assess` quality gate.
    pub max_level: Option<CefrLevel>,
    /// Maximum input size in bytes (default: 5 MiB).
    ///
    /// Applies to files read by the CLI and to text sent to the MCP server.
    /// Use `disable_input_limit` to remove the limit entirely.
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    ///
    /// When `true`, `max_input_bytes` is ignored and no size check is performed.
    pub disable_input_limit: bool,
}

impl Config {
    /// Scoring options from this configuration, in application order:
    /// weights, then full analysis, then the sampling threshold.
    pub fn score_options(&self) -> Vec<ScoreOption> {
        let mut options = Vec::new();
        if let Some(w) = self.weights {
            options.push(ScoreOption::Weights(w.vocabulary, w.syntax, w.readability));
        }
        if self.full_analysis {
            options.push(ScoreOption::FullAnalysis);
        }
        if let Some(threshold) = self.sampling_threshold {
            options.push(ScoreOption::SamplingThreshold(threshold));
        }
        options
    }

    /// The [`ScoreConfig`] these settings describe. Invalid values are ignored.
    pub fn score_config(&self) -> ScoreConfig {
        ScoreConfig::from_options(self.score_options())
    }

    /// Effective input limit in bytes, or `None` when disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES))
        }
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Metadata about which configuration sources were loaded.
///
/// Returned alongside [`Config`] from [`ConfigLoader::load()`] so commands
/// can report the actual config files without re-discovering them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files found by walking up, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file from the platform config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Explicit config files loaded (e.g., from `--config` flag).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Returns the highest-precedence config file that was loaded.
    ///
    /// Precedence: explicit files > project files > user file.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions (in order of preference).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for platform directory lookup.
const APP_NAME: &str = "cefr-lens";

/// Config file base names, lowest precedence first.
const APP_NAMES: &[&str] = &["cefr", "cefr-lens"];

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "CEFR_LENS_";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Starting directory for project config search.
    project_search_root: Option<Utf8PathBuf>,
    /// Whether to include user config from the platform config directory.
    include_user_config: bool,
    /// Stop searching when we hit a directory containing this file/dir.
    boundary_marker: Option<String>,
    /// Explicit config files to load.
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default settings.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Set the starting directory for project config search.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/cefr-lens/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Set a boundary marker to stop directory traversal. Default is `.git`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Disable boundary marker (search all the way to filesystem root).
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file to load. Later files take precedence.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    ///
    /// Nested keys can be set from the environment with a double underscore,
    /// e.g. `CEFR_LENS_WEIGHTS__VOCABULARY=0.6`.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = self.find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = Self::merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // CEFR_LENS_SAMPLING_THRESHOLD=5000, CEFR_LENS_MAX_LEVEL=B1, etc.
        figment = figment.merge(Env::prefixed(ENV_PREFIX).lowercase(true).split("__"));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            files = sources.project_files.len() + sources.explicit_files.len(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Load configuration, returning an error if no config file is found.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        let has_user = self.include_user_config && self.find_user_config().is_some();
        let has_project = self
            .project_search_root
            .as_ref()
            .is_some_and(|root| !self.find_project_configs(root).is_empty());
        let has_explicit = !self.explicit_files.is_empty();

        if !has_user && !has_project && !has_explicit {
            return Err(ConfigError::NotFound);
        }

        self.load()
    }

    /// Find project config files by walking up from the given directory.
    ///
    /// Returns every match in the closest directory that has any, ordered
    /// low-to-high precedence: `cefr` before `cefr-lens`, dotfiles before
    /// regular files within each name.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let mut found = Vec::new();
            for app_name in APP_NAMES {
                for prefix in [".", ""] {
                    for ext in CONFIG_EXTENSIONS {
                        let candidate = dir.join(format!("{prefix}{app_name}.{ext}"));
                        if candidate.is_file() {
                            found.push(candidate);
                        }
                    }
                }
            }

            if !found.is_empty() {
                return found;
            }

            // Checked after the config files so a config next to the marker is found.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }

    /// Find user config in the platform config directory.
    fn find_user_config(&self) -> Option<Utf8PathBuf> {
        let config_dir = user_config_dir()?;
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| config_dir.join(format!("config.{ext}")))
            .find(|path| path.is_file())
    }

    /// Merge a config file into the figment, detecting format from extension.
    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// Get the user config directory path.
///
/// Returns `~/.config/cefr-lens/` on Linux, `~/Library/Application Support/cefr-lens/`
/// on macOS, and equivalent on other platforms.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}

/// Get the local data directory path, used for log files.
///
/// Returns `~/.local/share/cefr-lens/` on Linux and the platform equivalent
/// elsewhere.
pub fn user_data_local_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.data_local_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;

    /// Serializes tests that mutate environment variables via `set_var`/`remove_var`.
    static TEST_ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::try_from(path.to_path_buf()).unwrap()
    }

    fn load_file(name: &str, contents: &str) -> Config {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(name);
        fs::write(&path, contents).unwrap();
        ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(&path))
            .load()
            .unwrap()
            .0
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.log_dir.is_none());
        assert!(config.weights.is_none());
        assert!(!config.full_analysis);
        assert!(!config.disable_input_limit);
        assert_eq!(config.score_config(), ScoreConfig::default());
        assert_eq!(config.input_limit(), Some(crate::DEFAULT_MAX_INPUT_BYTES));
    }

    #[test]
    fn test_loader_builds_with_defaults() {
        let _lock = env_lock();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load()
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.primary_file().is_none());
    }

    #[test]
    fn test_single_file_overrides_default() {
        let _lock = env_lock();
        let config = load_file(
            "config.toml",
            r#"log_level = "debug"
log_dir = "/tmp/cefr-lens"
full_analysis = true
sampling_threshold = 4000
max_level = "B2"

[weights]
vocabulary = 0.6
syntax = 0.2
readability = 0.2
"#,
        );

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.log_dir.as_ref().map(|dir| dir.as_str()),
            Some("/tmp/cefr-lens")
        );
        assert_eq!(config.max_level, Some(CefrLevel::B2));

        let score = config.score_config();
        assert!(score.full_analysis);
        assert_eq!(score.sampling_threshold, 4000);
        assert_eq!(score.weights.vocabulary, 0.6);
    }

    #[test]
    fn invalid_file_options_keep_defaults() {
        let _lock = env_lock();
        let config = load_file(
            "config.toml",
            "sampling_threshold = 0\n[weights]\nvocabulary = 0.9\nsyntax = 0.9\nreadability = 0.9\n",
        );
        assert_eq!(config.score_config(), ScoreConfig::default());
    }

    #[test]
    fn unknown_level_is_a_deserialize_error() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "max_level = \"Z9\"\n").unwrap();
        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(&path))
            .load();
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn test_later_file_overrides_earlier() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("base.toml");
        fs::write(&base, r#"log_level = "warn""#).unwrap();
        let over = tmp.path().join("override.json");
        fs::write(&over, r#"{"log_level": "error"}"#).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(&base))
            .with_file(utf8(&over))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(sources.primary_file(), Some(utf8(&over).as_path()));
    }

    #[test]
    fn test_project_config_discovery() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        let project_dir = tmp.path().join("project");
        let sub_dir = project_dir.join("src").join("deep");
        fs::create_dir_all(&sub_dir).unwrap();
        fs::write(project_dir.join(".cefr-lens.toml"), r#"log_level = "debug""#).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(utf8(&sub_dir))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn test_boundary_marker_stops_search() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let work = child.join("work");
        fs::create_dir_all(&work).unwrap();
        fs::write(parent.join(".cefr-lens.toml"), r#"log_level = "warn""#).unwrap();
        fs::create_dir(child.join(".git")).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_boundary_marker(".git")
            .with_project_search(utf8(&work))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.project_files.is_empty());
    }

    #[test]
    fn test_explicit_file_overrides_project_config() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("cefr.yaml"), "log_level: warn\n").unwrap();
        let over = tmp.path().join("override.toml");
        fs::write(&over, r#"log_level = "error""#).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(utf8(tmp.path()))
            .with_file(utf8(&over))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(sources.project_files.len(), 1);
        assert_eq!(sources.explicit_files.len(), 1);
    }

    #[test]
    fn test_load_or_error_fails_when_no_config() {
        let _lock = env_lock();
        let result = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load_or_error();
        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn cefr_lens_overrides_cefr_config() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".cefr.toml"), "sampling_threshold = 2000\n").unwrap();
        fs::write(tmp.path().join("cefr-lens.toml"), "sampling_threshold = 3000\n").unwrap();
        fs::write(tmp.path().join(".cefr-lens.toml"), "full_analysis = true\n").unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(utf8(tmp.path()))
            .load()
            .unwrap();

        assert_eq!(config.sampling_threshold, Some(3000));
        assert!(config.full_analysis);
        assert_eq!(sources.project_files.len(), 3);
        assert!(sources.project_files[2].as_str().ends_with("cefr-lens.toml"));
    }

    #[test]
    fn only_closest_directory_contributes() {
        let _lock = env_lock();
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        fs::create_dir_all(&child).unwrap();
        fs::write(parent.join(".cefr.toml"), "full_analysis = true\n").unwrap();
        fs::write(child.join(".cefr-lens.toml"), r#"log_level = "error""#).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(utf8(&child))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert!(!config.full_analysis);
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn input_limit_respects_disable_flag() {
        let _lock = env_lock();
        let config = load_file(
            "config.toml",
            "max_input_bytes = 1024\ndisable_input_limit = true\n",
        );
        assert_eq!(config.max_input_bytes, Some(1024));
        assert_eq!(config.input_limit(), None);

        let config = load_file("config.yml", "max_input_bytes: 2048\n");
        assert_eq!(config.input_limit(), Some(2048));
    }

    #[test]
    fn config_deserializes_from_yaml() {
        let yaml = r#"
weights:
  vocabulary: 0.4
  syntax: 0.4
  readability: 0.2
max_level: b1
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.max_level, Some(CefrLevel::B1));
        assert_eq!(config.score_config().weights.syntax, 0.4);
    }

    #[test]
    #[allow(unsafe_code)]
    fn test_env_var_overrides_file_config() {
        let _lock = env_lock();

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "sampling_threshold = 2000\nmax_level = \"A2\"\n").unwrap();

        // SAFETY: env access is serialized by TEST_ENV_MUTEX.
        unsafe {
            std::env::set_var("CEFR_LENS_SAMPLING_THRESHOLD", "7000");
            std::env::set_var("CEFR_LENS_WEIGHTS__VOCABULARY", "0.2");
            std::env::set_var("CEFR_LENS_WEIGHTS__SYNTAX", "0.4");
            std::env::set_var("CEFR_LENS_WEIGHTS__READABILITY", "0.4");
        }

        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(&path))
            .load();

        // SAFETY: Cleanup after test.
        unsafe {
            std::env::remove_var("CEFR_LENS_SAMPLING_THRESHOLD");
            std::env::remove_var("CEFR_LENS_WEIGHTS__VOCABULARY");
            std::env::remove_var("CEFR_LENS_WEIGHTS__SYNTAX");
            std::env::remove_var("CEFR_LENS_WEIGHTS__READABILITY");
        }

        let (config, _sources) = result.unwrap();
        assert_eq!(config.sampling_threshold, Some(7000));
        assert_eq!(config.max_level, Some(CefrLevel::A2));
        assert_eq!(config.score_config().weights.readability, 0.4);
    }

    #[test]
    fn test_user_config_dir() {
        if let Some(path) = user_config_dir() {
            assert!(path.as_str().contains("cefr-lens"));
        }
    }
}
