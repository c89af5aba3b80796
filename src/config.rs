//! Application settings and the per-document split policy
//!
//! Settings persist as TOML in the platform config directory. A
//! [`SplitPolicy`] is the immutable snapshot one document is processed
//! under; it is captured once per file, so a settings change mid-batch
//! never produces a document split under two different limits.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::error::SplitError;

/// Default word limit for each output part.
pub const DEFAULT_MAX_WORDS: usize = 50_000;

/// Bounds enforced on the persisted word limit.
const MAX_WORDS_MIN: usize = 1_000;
const MAX_WORDS_MAX: usize = 100_000;

/// Persisted application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Word limit for each output part.
    pub max_words: usize,
    /// Folder split parts are written into.
    pub output_folder: PathBuf,
    /// Reconstruct bold/italic/underline runs in `.docx` parts.
    pub preserve_formatting: bool,
    /// Leave documents alone when their total is already within the limit.
    pub skip_under_limit: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_words: DEFAULT_MAX_WORDS,
            output_folder: PathBuf::from("./output"),
            preserve_formatting: false,
            skip_under_limit: false,
        }
    }
}

impl Settings {
    /// Load settings from the config directory.
    ///
    /// A missing file yields the defaults. An unreadable or unparsable file
    /// is logged and also yields the defaults, so a damaged config never
    /// blocks a run.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(settings) => settings,
            Err(err) => {
                warn!("failed to load settings ({err:#}), using defaults");
                Settings::default()
            }
        }
    }

    fn try_load() -> Result<Self> {
        if let Some(config_path) = Self::get_config_path() {
            if config_path.exists() {
                let content = fs::read_to_string(&config_path)?;
                let mut settings: Settings = toml::from_str(&content)?;
                settings.clamp_to_valid();
                debug!("settings loaded from {}", config_path.display());
                return Ok(settings);
            }
        }

        // Return defaults if no config found
        Ok(Settings::default())
    }

    /// Save settings to the config directory.
    pub fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::get_config_path() {
            // Create config directory if it doesn't exist
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }

            let content = toml::to_string_pretty(self)?;
            fs::write(&config_path, content)?;
        }

        Ok(())
    }

    /// Get the path to the settings file
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("manusplit").join("config.toml"))
    }

    /// Initialize default settings file
    pub fn init_default() -> Result<()> {
        let settings = Settings::default();
        settings.save()?;
        Ok(())
    }

    /// Snapshot the policy documents will be processed under.
    pub fn policy(&self) -> Result<SplitPolicy, SplitError> {
        SplitPolicy::new(self.max_words, self.skip_under_limit, self.preserve_formatting)
    }

    /// Persisted values outside their allowed range fall back to defaults.
    /// Only the loaded file is constrained this way; callers constructing
    /// policies directly may use any positive limit.
    fn clamp_to_valid(&mut self) {
        if !(MAX_WORDS_MIN..=MAX_WORDS_MAX).contains(&self.max_words) {
            warn!(
                "max_words {} outside {MAX_WORDS_MIN}..={MAX_WORDS_MAX}, using default {DEFAULT_MAX_WORDS}",
                self.max_words
            );
            self.max_words = DEFAULT_MAX_WORDS;
        }
    }
}

/// Immutable policy governing one document's split.
#[derive(Debug, Clone)]
pub struct SplitPolicy {
    /// Word limit for each output part. At least 1 when built through
    /// [`SplitPolicy::new`] or [`Settings::policy`].
    pub max_words: usize,
    /// Leave the document alone when its total is within the limit.
    pub skip_under_limit: bool,
    /// Reconstruct run formatting in `.docx` output.
    pub preserve_formatting: bool,
}

impl SplitPolicy {
    /// Build a policy. A zero word limit is rejected as a configuration
    /// error; every output part must be allowed to hold at least one word.
    pub fn new(
        max_words: usize,
        skip_under_limit: bool,
        preserve_formatting: bool,
    ) -> Result<Self, SplitError> {
        if max_words == 0 {
            return Err(SplitError::Configuration(
                "max_words must be at least 1".to_string(),
            ));
        }
        Ok(SplitPolicy {
            max_words,
            skip_under_limit,
            preserve_formatting,
        })
    }
}
