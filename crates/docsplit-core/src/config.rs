//! Configuration types for docsplit.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DocsplitError, Result};

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocsplitConfig {
    /// Chunking configuration.
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Document source configuration.
    #[serde(default)]
    pub source: SourceConfig,

    /// Acquisition step configuration.
    #[serde(default)]
    pub acquisition: AcquisitionConfig,

    /// Response envelope configuration.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Named separator hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeparatorPreset {
    /// Headings, code fences and rules before paragraphs and lines.
    #[default]
    Markdown,
    /// Paragraphs, lines, sentences, words.
    Text,
}

impl SeparatorPreset {
    /// Placement the preset's separator list is written for.
    pub fn placement(self) -> Placement {
        match self {
            Self::Markdown => Placement::Leading,
            Self::Text => Placement::Trailing,
        }
    }
}

/// Which side of a split the separator text stays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Separator ends the preceding piece (`"a. "`, `"b"`).
    #[default]
    Trailing,
    /// Separator starts the following piece (`"a"`, `"\n## b"`).
    Leading,
}

/// Chunking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk size, in length-function units (characters by default).
    #[serde(default = "default_max_size")]
    pub max_size: usize,

    /// Units shared between adjacent chunks.
    #[serde(default)]
    pub overlap: usize,

    /// Separator hierarchy used when `separators` is not set.
    #[serde(default)]
    pub preset: SeparatorPreset,

    /// Explicit separator list, most significant first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separators: Option<Vec<String>>,

    /// Separator placement. Defaults to the preset's placement, also when
    /// `separators` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_size: 500,
            overlap: 0,
            preset: SeparatorPreset::Markdown,
            separators: None,
            placement: None,
        }
    }
}

impl ChunkingConfig {
    /// Check the size and overlap bounds and the separator list.
    pub fn validate(&self) -> Result<()> {
        validate_sizes(self.max_size, self.overlap)?;
        if self.separators.as_ref().is_some_and(|list| list.is_empty()) {
            return Err(DocsplitError::config("separators must not be empty"));
        }
        Ok(())
    }

    /// Placement in effect: the explicit setting, else the preset's.
    pub fn effective_placement(&self) -> Placement {
        self.placement.unwrap_or_else(|| self.preset.placement())
    }
}

/// Check that `max_size > 0` and `overlap < max_size`.
pub fn validate_sizes(max_size: usize, overlap: usize) -> Result<()> {
    if max_size == 0 {
        return Err(DocsplitError::config("max_size must be greater than zero"));
    }
    if overlap >= max_size {
        return Err(DocsplitError::config(format!(
            "overlap ({}) must be smaller than max_size ({})",
            overlap, max_size
        )));
    }
    Ok(())
}

/// Filesystem document source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Root directory of the document store.
    #[serde(default = "default_source_root")]
    pub root: PathBuf,

    /// Prefix stripped from document identifiers before deriving file names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Folder under `root` holding the documents.
    #[serde(default = "default_folder")]
    pub folder: String,

    /// File extension of stored documents.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: default_source_root(),
            base_url: None,
            folder: default_folder(),
            extension: default_extension(),
        }
    }
}

/// Acquisition step configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionConfig {
    /// Program and arguments run before fetching. None disables acquisition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,

    /// Time allowed for the command, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            command: None,
            timeout_secs: 60,
        }
    }
}

/// Response envelope configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Serialize full chunks (content + metadata) instead of bare texts.
    #[serde(default)]
    pub include_metadata: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level used when not running verbose (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions

fn default_max_size() -> usize {
    500
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_folder() -> String {
    "documents".to_string()
}

fn default_extension() -> String {
    "md".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_source_root() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docsplit")
}

impl DocsplitConfig {
    /// Load configuration from file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| DocsplitError::config(format!("Failed to parse config: {}", e)))?;
        config.chunking.validate()?;
        Ok(config)
    }

    /// Load configuration from default paths.
    pub fn load_default() -> Result<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("docsplit").join("config.toml");
            if user_config.exists() {
                return Self::load(&user_config);
            }
        }

        let local_config = PathBuf::from("docsplit.toml");
        if local_config.exists() {
            return Self::load(&local_config);
        }

        Ok(Self::default())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| DocsplitError::internal(format!("Failed to render config: {}", e)))
    }
}
