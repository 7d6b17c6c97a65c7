//! Configuration File Loading
//!
//! Finds, parses, validates, and saves the config file. TOML and JSON are
//! both accepted; the format follows the file extension.

use super::Config;
use crate::error::{Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "FOLIOTERM_CONFIG";

/// Configuration file loader
pub struct ConfigLoader {
    /// Search paths for configuration files, without extension
    search_paths: Vec<PathBuf>,
    /// Supported configuration file formats
    supported_formats: Vec<ConfigFormat>,
    /// Current configuration file path (if loaded)
    current_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Format implied by a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Whether to fall back to the default config if none exists
    pub create_default: bool,
    /// Whether to validate configuration after loading
    pub validate: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            create_default: true,
            validate: true,
        }
    }
}

impl ConfigLoader {
    /// Create a loader over the default search paths
    pub fn new() -> Self {
        Self {
            search_paths: Self::get_search_paths(),
            supported_formats: vec![ConfigFormat::Toml, ConfigFormat::Json],
            current_path: None,
        }
    }

    /// Load configuration with default options
    pub fn load() -> Result<Config> {
        Self::new().load_config(&LoadOptions::default())
    }

    /// Load configuration, honouring `FOLIOTERM_CONFIG` first
    pub fn load_config(&mut self, options: &LoadOptions) -> Result<Config> {
        if let Some(path) = env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()) {
            let path = PathBuf::from(path);
            debug!("Using config from ${}: {}", CONFIG_ENV, path.display());
            let config = self.load_from_path(&path)?;
            return Ok(config);
        }

        if let Some((path, config)) = self.find_and_load_config() {
            if options.validate {
                validate_config(&config)?;
            }
            info!("Loaded config from {}", path.display());
            self.current_path = Some(path);
            return Ok(config);
        }

        if options.create_default {
            debug!("No config file found; using defaults");
            Ok(Config::default())
        } else {
            Err(Error::ConfigLoadFailed {
                path: self
                    .search_paths
                    .first()
                    .cloned()
                    .unwrap_or_else(Self::get_default_config_path),
                reason: "no configuration file found".to_string(),
            })
        }
    }

    /// Load and validate one specific file; a missing file is an error
    pub fn load_from_path(&mut self, path: &Path) -> Result<Config> {
        let format = ConfigFormat::from_path(path).unwrap_or(ConfigFormat::Toml);
        let config = self
            .load_config_file(path, format)
            .map_err(|e| match e {
                Error::Io(io) => Error::ConfigLoadFailed {
                    path: path.to_path_buf(),
                    reason: io.to_string(),
                },
                other => other,
            })?;
        validate_config(&config)?;
        self.current_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save configuration to the current path or default location
    pub fn save(&self, config: &Config) -> Result<PathBuf> {
        let path = self
            .current_path
            .clone()
            .unwrap_or_else(Self::get_default_config_path);
        self.save_to_path(config, &path)?;
        Ok(path)
    }

    /// Save configuration to a specific path, format by extension
    pub fn save_to_path(&self, config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let format = ConfigFormat::from_path(path).unwrap_or(ConfigFormat::Toml);
        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| {
                Error::ConfigSerializationFailed {
                    format: format.label().to_string(),
                    reason: e.to_string(),
                }
            })?,
            ConfigFormat::Toml => {
                toml::to_string_pretty(config).map_err(|e| Error::ConfigSerializationFailed {
                    format: format.label().to_string(),
                    reason: e.to_string(),
                })?
            }
        };

        fs::write(path, content)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// First config file in the search paths that parses
    fn find_and_load_config(&self) -> Option<(PathBuf, Config)> {
        for path in &self.search_paths {
            for format in &self.supported_formats {
                let config_path = path.with_extension(format.extension());
                if !config_path.is_file() {
                    continue;
                }
                match self.load_config_file(&config_path, *format) {
                    Ok(config) => return Some((config_path, config)),
                    Err(e) => {
                        warn!(
                            "Failed to load config from {}: {}",
                            config_path.display(),
                            e
                        );
                    }
                }
            }
        }

        None
    }

    fn load_config_file(&self, path: &Path, format: ConfigFormat) -> Result<Config> {
        let content = fs::read_to_string(path)?;

        match format {
            ConfigFormat::Toml => toml::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                format: format.label().to_string(),
                reason: e.to_string(),
            }),
            ConfigFormat::Json => {
                serde_json::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                    format: format.label().to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Default search paths, most specific first
    fn get_search_paths() -> Vec<PathBuf> {
        use crate::platform::Platform;

        let paths = Platform::paths();
        let mut search = Vec::new();

        match paths.app_config_dir() {
            Ok(dir) => search.push(dir.join("config")),
            Err(e) => debug!("Skipping platform config dir: {}", e),
        }
        if let Some(dir) = paths.dotfile_dir() {
            search.push(dir.join("config"));
        }

        search
    }

    fn get_default_config_path() -> PathBuf {
        use crate::platform::Platform;

        Platform::paths()
            .app_config_dir()
            .unwrap_or_else(|_| PathBuf::from(".folioterm"))
            .join("config.toml")
    }

    /// Get the current configuration file path
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Add a search path (without extension) at the lowest priority
    pub fn add_search_path(&mut self, path: PathBuf) {
        self.search_paths.push(path);
    }

    /// Replace all search paths with a single one
    pub fn set_search_path(&mut self, path: PathBuf) {
        self.search_paths = vec![path];
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(field: &str, reason: &str) -> Error {
    Error::ConfigValidationFailed {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.prompt.user.trim().is_empty() {
        return Err(invalid("prompt.user", "Prompt user cannot be empty"));
    }

    if config.prompt.host.trim().is_empty() {
        return Err(invalid("prompt.host", "Prompt host cannot be empty"));
    }

    if config.theme.default.trim().is_empty() {
        return Err(invalid("theme.default", "Theme name cannot be empty"));
    }

    for palette in &config.theme.palettes {
        if palette.name.is_empty() || palette.name.contains(char::is_whitespace) {
            return Err(invalid(
                "theme.palettes",
                "Palette names must be single words",
            ));
        }
    }

    if config.notes.warn_delay_ms == 0 {
        return Err(invalid(
            "notes.warn_delay_ms",
            "Warning delay must be greater than 0",
        ));
    }

    if config.notes.open_delay_ms == 0 {
        return Err(invalid(
            "notes.open_delay_ms",
            "Redirect delay must be greater than 0",
        ));
    }

    if let Some(url) = &config.notes.url {
        if url.trim().is_empty() {
            return Err(invalid("notes.url", "Notes URL cannot be empty"));
        }
    }

    Ok(())
}
