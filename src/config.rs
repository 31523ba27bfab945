use crate::error::NotesError;
use crate::log_debug;

use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Environment variable holding the release tag
pub const TAG_NAME_ENV: &str = "TAG_NAME";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_COMMITS_FILE: &str = "commits.txt";
pub const DEFAULT_DIFF_FILE: &str = "changes.diff";
pub const DEFAULT_OUTPUT_FILE: &str = "gemini_notes.md";
/// Number of characters of the diff that make it into the prompt
pub const DEFAULT_DIFF_CHAR_LIMIT: usize = 5000;

/// Optional overrides for a run, usually filled in from the command line
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub base_dir: Option<PathBuf>,
    pub commits_path: Option<PathBuf>,
    pub diff_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub model: Option<String>,
    pub diff_char_limit: Option<usize>,
    /// Write the fence-stripped text instead of the raw model response
    pub write_cleaned: bool,
}

/// Fully resolved settings for one run
#[derive(Clone)]
pub struct Config {
    /// API key, passed through to the client as-is when present
    pub api_key: Option<String>,
    /// Version tag embedded in the prompt
    pub tag_name: String,
    pub model: String,
    pub commits_path: PathBuf,
    pub diff_path: PathBuf,
    pub output_path: PathBuf,
    pub diff_char_limit: usize,
    pub write_cleaned: bool,
}

/// Reads `name` from the process environment; unset or non-UTF-8 is `None`
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl Config {
    /// Resolve configuration using `lookup` to read environment values.
    ///
    /// The API key is optional at this point; a missing key only fails later
    /// when the remote call is rejected. The tag is required.
    pub fn from_lookup<F>(options: &RunOptions, lookup: F) -> Result<Self, NotesError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV).filter(|key| !key.is_empty());
        let tag_name = lookup(TAG_NAME_ENV).ok_or(NotesError::MissingEnv {
            name: TAG_NAME_ENV,
        })?;

        let base_dir = options.base_dir.clone().unwrap_or_default();
        let resolve = |path: Option<&PathBuf>, default: &str| -> PathBuf {
            let path = path.map_or_else(|| Path::new(default), PathBuf::as_path);
            base_dir.join(path)
        };

        let config = Self {
            api_key,
            tag_name,
            model: options
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            commits_path: resolve(options.commits_path.as_ref(), DEFAULT_COMMITS_FILE),
            diff_path: resolve(options.diff_path.as_ref(), DEFAULT_DIFF_FILE),
            output_path: resolve(options.output_path.as_ref(), DEFAULT_OUTPUT_FILE),
            diff_char_limit: options.diff_char_limit.unwrap_or(DEFAULT_DIFF_CHAR_LIMIT),
            write_cleaned: options.write_cleaned,
        };

        log_debug!("Configuration resolved: {:?}", config);
        Ok(config)
    }
}

// Hand-written so the API key never ends up in logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("tag_name", &self.tag_name)
            .field("model", &self.model)
            .field("commits_path", &self.commits_path)
            .field("diff_path", &self.diff_path)
            .field("output_path", &self.output_path)
            .field("diff_char_limit", &self.diff_char_limit)
            .field("write_cleaned", &self.write_cleaned)
            .finish()
    }
}
