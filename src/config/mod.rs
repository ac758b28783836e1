//! Configuration management.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then environment variables (including a `.env` file in the working
//! directory), then command-line flags.

mod features;

pub use features::{DuplicateCheck, FeatureFlags};

use secrecy::SecretString;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable holding the OMDb API key.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Older name of the API key variable, still honoured.
pub const LEGACY_API_KEY_ENV: &str = "API_KEY";

/// Main configuration for moviedb.
#[derive(Debug, Clone)]
pub struct MovieDbConfig {
    /// Path to the catalog JSON file.
    pub data_file: PathBuf,
    /// Static site settings.
    pub site: SiteConfig,
    /// OMDb client settings.
    pub omdb: OmdbConfig,
    /// Feature flags.
    pub features: FeatureFlags,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Static site generation settings.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// HTML template containing the placeholder tokens.
    pub template_path: PathBuf,
    /// Where the rendered page is written.
    pub output_path: PathBuf,
    /// Page title substituted for `__TEMPLATE_TITLE__`.
    pub title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from("index_template.html"),
            output_path: PathBuf::from("index.html"),
            title: "MOVIE APP".to_string(),
        }
    }
}

/// OMDb metadata service settings.
#[derive(Debug, Clone)]
pub struct OmdbConfig {
    /// Service base URL.
    pub base_url: String,
    /// API key.
    pub api_key: Option<SecretString>,
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl OmdbConfig {
    /// Default OMDb endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "http://www.omdbapi.com/";
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_ms: 0,
            connect_timeout_ms: 0,
        }
    }
}

/// Logging settings from the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, e.g. `moviedb=debug`.
    pub filter: Option<String>,
    /// Output format: `pretty` or `json`.
    pub format: Option<String>,
    /// Append log lines to this file instead of stderr.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Catalog path.
    pub data_file: Option<String>,
    /// Site section.
    pub site: Option<ConfigFileSite>,
    /// OMDb section.
    pub omdb: Option<ConfigFileOmdb>,
    /// Feature flags.
    pub features: Option<ConfigFileFeatures>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

/// Site section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileSite {
    /// Template path.
    pub template_path: Option<String>,
    /// Output path.
    pub output_path: Option<String>,
    /// Page title.
    pub title: Option<String>,
}

/// OMDb section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileOmdb {
    /// Base URL.
    pub base_url: Option<String>,
    /// API key.
    pub api_key: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

/// Features section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileFeatures {
    /// Duplicate check mode.
    pub duplicate_check: Option<DuplicateCheck>,
}

impl Default for MovieDbConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data.json"),
            site: SiteConfig::default(),
            omdb: OmdbConfig::default(),
            features: FeatureFlags::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl MovieDbConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the text is not a valid config file.
    pub fn from_toml_str(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| crate::Error::Config(e.to_string()))?;
        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/moviedb/` on macOS)
    /// 2. XDG config dir (`~/.config/moviedb/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let platform_config = base_dirs.config_dir().join("moviedb").join("config.toml");
        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("moviedb")
            .join("config.toml");

        for candidate in [platform_config, xdg_config] {
            if !candidate.exists() {
                continue;
            }
            match Self::load_from_file(&candidate) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(path = %candidate.display(), "Ignoring config file: {e}"),
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `MovieDbConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_file) = file.data_file {
            config.data_file = PathBuf::from(data_file);
        }
        if let Some(site) = file.site {
            if let Some(v) = site.template_path {
                config.site.template_path = PathBuf::from(v);
            }
            if let Some(v) = site.output_path {
                config.site.output_path = PathBuf::from(v);
            }
            if let Some(v) = site.title {
                config.site.title = v;
            }
        }
        if let Some(omdb) = file.omdb {
            if let Some(v) = omdb.base_url {
                config.omdb.base_url = v;
            }
            config.omdb.api_key = omdb.api_key.map(SecretString::from);
            if let Some(v) = omdb.timeout_ms {
                config.omdb.timeout_ms = v;
            }
            if let Some(v) = omdb.connect_timeout_ms {
                config.omdb.connect_timeout_ms = v;
            }
        }
        if let Some(check) = file.features.and_then(|f| f.duplicate_check) {
            config.features.duplicate_check = check;
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }

    /// Applies overrides from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_env_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides using `lookup` to resolve variable names.
    ///
    /// Blank values are ignored. Unparsable numbers and unknown modes are
    /// ignored with a warning.
    #[must_use]
    pub fn with_env_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(API_KEY_ENV).or_else(|| get(LEGACY_API_KEY_ENV)) {
            self.omdb.api_key = Some(SecretString::from(key));
        }
        if let Some(path) = get("MOVIEDB_DATA_FILE") {
            self.data_file = PathBuf::from(path);
        }
        if let Some(url) = get("MOVIEDB_OMDB_URL") {
            self.omdb.base_url = url;
        }
        if let Some(v) = get("MOVIEDB_OMDB_TIMEOUT_MS") {
            match v.trim().parse::<u64>() {
                Ok(ms) => self.omdb.timeout_ms = ms,
                Err(e) => tracing::warn!(value = %v, "Ignoring MOVIEDB_OMDB_TIMEOUT_MS: {e}"),
            }
        }
        if let Some(v) = get("MOVIEDB_OMDB_CONNECT_TIMEOUT_MS") {
            match v.trim().parse::<u64>() {
                Ok(ms) => self.omdb.connect_timeout_ms = ms,
                Err(e) => {
                    tracing::warn!(value = %v, "Ignoring MOVIEDB_OMDB_CONNECT_TIMEOUT_MS: {e}");
                },
            }
        }
        if let Some(v) = get("MOVIEDB_DUPLICATE_CHECK") {
            match DuplicateCheck::parse(&v) {
                Some(check) => self.features.duplicate_check = check,
                None => tracing::warn!(value = %v, "Ignoring unknown MOVIEDB_DUPLICATE_CHECK"),
            }
        }

        self
    }

    /// Sets the catalog path.
    #[must_use]
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }
}

/// Loads variables from a `.env` file in the working directory, if present.
///
/// Variables already set in the process environment are not overridden.
/// Returns the path of the loaded file.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(e) if e.not_found() => None,
        Err(e) => {
            tracing::warn!("Failed to load .env file: {e}");
            None
        },
    }
}
