use std::path::PathBuf;

use directories::BaseDirs;
use figment::{
   Figment,
   providers::{Env, Format, Toml},
};
use serde::Deserialize;

use crate::{Result, error::Error};

/// Chat model used for intent extraction and course-name suggestion.
pub const CHAT_MODEL: &str = "gemini-2.5-flash";
/// Embedding model used by the vector fallback path.
pub const EMBED_MODEL: &str = "text-embedding-004";

pub const EMBED_DIM: usize = 768;

/// Cap on the primary (full-query) result list.
pub const PRIMARY_RESULTS: usize = 15;
/// Wider primary cap used when query expansion is disabled.
pub const PRIMARY_RESULTS_PLAIN: usize = 20;
/// Cap on candidates contributed by the suggested-name path.
pub const SUGGESTED_RESULTS: usize = 10;
/// Results taken from each suggested-name pass.
pub const PER_NAME_RESULTS: usize = 2;
/// Suggested names accepted from the suggester.
pub const SUGGESTION_LIMIT: usize = 10;
/// Sample course names handed to the suggester.
pub const SAMPLE_NAME_LIMIT: usize = 200;

pub const DEFAULT_EMBED_BATCH: usize = 100;
pub const MAX_EMBED_BATCH: usize = 500;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

pub fn data_dir() -> PathBuf {
   BaseDirs::new()
      .expect("failed to locate base directories")
      .home_dir()
      .join(".coursegrep")
}

pub fn config_path() -> PathBuf {
   data_dir().join("config.toml")
}

/// API key from the environment, `COURSEGREP_API_KEY` winning over the
/// provider-native `GEMINI_API_KEY`.
pub fn env_api_key() -> Option<String> {
   std::env::var("COURSEGREP_API_KEY")
      .or_else(|_| std::env::var("GEMINI_API_KEY"))
      .ok()
      .filter(|s| !s.is_empty())
}

pub fn embed_batch() -> usize {
   std::env::var("COURSEGREP_EMBED_BATCH")
      .ok()
      .and_then(|s| s.parse().ok())
      .unwrap_or(DEFAULT_EMBED_BATCH)
      .min(MAX_EMBED_BATCH)
}

/// Runtime settings for the external collaborators, loaded from
/// `~/.coursegrep/config.toml` with `COURSEGREP_*` environment overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
   pub endpoint:    String,
   pub api_key:     Option<String>,
   pub chat_model:  String,
   pub embed_model: String,
   pub timeout_ms:  u64,
}

impl Default for Settings {
   fn default() -> Self {
      Self {
         endpoint:    DEFAULT_ENDPOINT.to_string(),
         api_key:     None,
         chat_model:  CHAT_MODEL.to_string(),
         embed_model: EMBED_MODEL.to_string(),
         timeout_ms:  30_000,
      }
   }
}

impl Settings {
   pub fn load() -> Result<Self> {
      Figment::new()
         .merge(Toml::file(config_path()))
         .merge(Env::prefixed("COURSEGREP_"))
         .extract()
         .map_err(|e| Error::Config(e.to_string()))
   }

   /// Config-file key, falling back to the environment.
   pub fn resolved_api_key(&self) -> Option<String> {
      self
         .api_key
         .clone()
         .filter(|s| !s.is_empty())
         .or_else(env_api_key)
   }
}
