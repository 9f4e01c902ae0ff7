//! Card content.
//!
//! Everything the card says can be replaced from a TOML file. Missing keys
//! fall back to the built-in card.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use indoc::indoc;
use serde::Deserialize;
use thiserror::Error;

use crate::constants::{DEFAULT_AMBIENT_PARTICLES, DEFAULT_BURST_PARTICLES};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read card file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse card file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid card: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Letter {
    pub key: String,
    pub label: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub title: String,
    pub landing_hint: String,
    pub question: String,
    pub accept_label: String,
    pub decline_label: String,
    pub acceptance_title: String,
    pub acceptance_message: String,
    pub show_image: bool,
    pub ambient_particles: usize,
    pub burst_particles: usize,
    pub letters: Vec<Letter>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            title: "You've got mail".to_string(),
            landing_hint: "click the envelope to open it".to_string(),
            question: "Will you be my Valentine?".to_string(),
            accept_label: "Yes".to_string(),
            decline_label: "No".to_string(),
            acceptance_title: "Yay!".to_string(),
            acceptance_message: "I knew you'd say yes. Open the envelopes below.".to_string(),
            show_image: true,
            ambient_particles: DEFAULT_AMBIENT_PARTICLES,
            burst_particles: DEFAULT_BURST_PARTICLES,
            letters: default_letters(),
        }
    }
}

fn default_letters() -> Vec<Letter> {
    vec![
        Letter {
            key: "memories".to_string(),
            label: "Memories".to_string(),
            title: "Our favourite memories".to_string(),
            body: indoc! {"
                The first coffee that went cold because we forgot it.
                The walk home in the rain.
                Every late-night conversation since.
            "}
            .to_string(),
        },
        Letter {
            key: "reasons".to_string(),
            label: "Reasons".to_string(),
            title: "Reasons I like you".to_string(),
            body: indoc! {"
                You laugh at my worst jokes.
                You make ordinary days feel like plans.
                You chose yes.
            "}
            .to_string(),
        },
        Letter {
            key: "promise".to_string(),
            label: "A promise".to_string(),
            title: "A small promise".to_string(),
            body: "Dinner is on me. Dessert too.".to_string(),
        },
    ]
}

impl CardConfig {
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: CardConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&raw)?;
        tracing::info!(path = %path.display(), letters = config.letters.len(), "card loaded");
        Ok(config)
    }

    /// Load `path` when given, otherwise use the built-in card.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for letter in &self.letters {
            if letter.key.trim().is_empty() {
                return Err(ConfigError::Invalid("letter key must not be empty".into()));
            }
            if !seen.insert(letter.key.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate letter key `{}`",
                    letter.key
                )));
            }
        }
        Ok(())
    }

    pub fn letter(&self, key: &str) -> Option<&Letter> {
        self.letters.iter().find(|letter| letter.key == key)
    }
}
