//! Configuration management for folioterm
//!
//! Loading and saving the config file, palette management, and the runtime
//! bundle (config, persona content, themes) a session is built from.

pub mod loader;
pub mod theme;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::content::ContentStore;
use crate::error::Result;
use theme::{PaletteSpec, ThemeManager, ThemeSurface, DEFAULT_PALETTE};

/// Main configuration structure for folioterm
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt shown before every echoed command
    pub prompt: PromptConfig,

    /// Palette selection
    pub theme: ThemeConfig,

    /// Notes redirect behaviour
    pub notes: NotesConfig,

    /// Persona content source
    pub content: ContentConfig,
}

impl Config {
    /// Load the configured persona and apply the notes URL override
    pub fn resolve_content(&self) -> Result<ContentStore> {
        let mut content = match &self.content.persona {
            Some(path) => ContentStore::from_path(path)?,
            None => ContentStore::builtin()?,
        };
        if let Some(url) = &self.notes.url {
            content.notes.url = url.clone();
        }
        Ok(content)
    }

    /// Built-in plus custom palettes with the configured default active
    ///
    /// An unknown default is logged and `default` stays active.
    pub fn resolve_themes(&self) -> ThemeManager {
        let mut themes = ThemeManager::new().with_custom(&self.theme.palettes);
        let name = self.theme.default.to_lowercase();
        if let Err(e) = themes.apply_palette(&name) {
            warn!("{}; keeping '{}'", e, themes.active().name);
        }
        themes
    }
}

/// Pieces of the `user@host:cwd$` prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub user: String,
    pub host: String,
    pub cwd: String,
    pub symbol: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            user: "artist".to_string(),
            host: "universe".to_string(),
            cwd: "~".to_string(),
            symbol: "$".to_string(),
        }
    }
}

impl PromptConfig {
    /// Render the prompt, e.g. `artist@universe:~$`
    pub fn render(&self) -> String {
        format!("{}@{}:{}{}", self.user, self.host, self.cwd, self.symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Palette active at startup
    pub default: String,

    /// Extra palettes; a name matching a built-in replaces it
    pub palettes: Vec<PaletteSpec>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: DEFAULT_PALETTE.to_string(),
            palettes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// Overrides the persona's notes URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Delay before the redirect warning, in milliseconds
    pub warn_delay_ms: u64,

    /// Delay between the warning and the redirect, in milliseconds
    pub open_delay_ms: u64,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            url: None,
            warn_delay_ms: 1000,
            open_delay_ms: 5000,
        }
    }
}

impl NotesConfig {
    pub fn warn_delay(&self) -> Duration {
        Duration::from_millis(self.warn_delay_ms)
    }

    pub fn open_delay(&self) -> Duration {
        Duration::from_millis(self.open_delay_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Persona file to use instead of the built-in one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona: Option<PathBuf>,
}

/// Everything a session is built from
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Current configuration
    config: Config,
    /// Persona content
    content: ContentStore,
    /// Palettes, with the configured default applied
    themes: ThemeManager,
    /// File the configuration came from, if any
    config_path: Option<PathBuf>,
}

impl RuntimeConfig {
    /// Load configuration from the search paths, falling back to defaults
    pub fn new() -> Result<Self> {
        let mut loader = loader::ConfigLoader::new();
        let config = loader.load_config(&loader::LoadOptions::default())?;
        let path = loader.current_path().map(Path::to_path_buf);
        Self::from_config(config, path)
    }

    /// Load configuration from an explicit file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config = loader::ConfigLoader::new().load_from_path(path)?;
        Self::from_config(config, Some(path.to_path_buf()))
    }

    /// Resolve content and themes for an already-loaded configuration
    pub fn from_config(config: Config, config_path: Option<PathBuf>) -> Result<Self> {
        let content = config.resolve_content()?;
        let themes = config.resolve_themes();

        Ok(Self {
            config,
            content,
            themes,
            config_path,
        })
    }

    /// Save current configuration
    pub fn save(&self) -> Result<PathBuf> {
        let loader = loader::ConfigLoader::new();
        match &self.config_path {
            Some(path) => {
                loader.save_to_path(&self.config, path)?;
                Ok(path.clone())
            }
            None => loader.save(&self.config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn themes(&self) -> &ThemeManager {
        &self.themes
    }

    pub fn themes_mut(&mut self) -> &mut ThemeManager {
        &mut self.themes
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// The rendered prompt string
    pub fn prompt(&self) -> String {
        self.config.prompt.render()
    }

    /// Split into owned parts for session construction
    pub fn into_parts(self) -> (Config, ContentStore, ThemeManager) {
        (self.config, self.content, self.themes)
    }
}
