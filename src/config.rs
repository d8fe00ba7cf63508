//! Completion configuration and request loading
//!
//! Configuration is a small JSON document; every field is optional:
//!
//! ```json
//! { "matcher": { "mode": "levenshtein", "max_distance": 1 }, "max_results": 50, "include_builtins": true }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::completion::matcher::MatchMode;
use crate::completion::{Environment, FileMetadata, ModuleRegistry};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Tunables of the typespec completion stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub matcher: MatchMode,
    /// Truncate the sorted candidate list
    pub max_results: Option<usize>,
    /// Offer builtin types for unqualified hints
    pub include_builtins: bool,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            matcher: MatchMode::default(),
            max_results: None,
            include_builtins: true,
        }
    }
}

impl CompletionConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        read_json(path)
    }
}

/// A completion request as produced by the editor side: hint, environment,
/// file metadata and the compiled modules visible to introspection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionRequest {
    pub hint: String,
    pub environment: Environment,
    pub metadata: FileMetadata,
    pub registry: ModuleRegistry,
}

impl CompletionRequest {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        read_json(path)
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
