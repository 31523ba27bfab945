#![allow(dead_code)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use gemini_notes::{Config, RunOptions, TextGenerator};
use parking_lot::Mutex;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_TAG: &str = "v1.0.0";

/// A prompt handed to a generator
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system_instruction: String,
    pub prompt: String,
}

pub type CallLog = Arc<Mutex<Vec<RecordedCall>>>;

/// Generator that records every call and answers with a canned reply
pub struct FakeGenerator {
    reply: Result<String, String>,
    calls: CallLog,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: Arc::default(),
        }
    }

    /// Handle to the recorded calls, usable after the generator is moved
    pub fn call_log(&self) -> CallLog {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate_message(&self, system_instruction: &str, prompt: &str) -> Result<String> {
        self.calls.lock().push(RecordedCall {
            system_instruction: system_instruction.to_string(),
            prompt: prompt.to_string(),
        });
        self.reply.clone().map_err(|message| anyhow!(message))
    }
}

/// Creates a temporary working directory holding `commits.txt` and `changes.diff`
pub fn setup_workspace(commits: &str, diff: &str) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    fs::write(temp_dir.path().join("commits.txt"), commits).expect("Failed to write commits.txt");
    fs::write(temp_dir.path().join("changes.diff"), diff).expect("Failed to write changes.diff");
    temp_dir
}

/// Options rooted at `temp_dir`
pub fn workspace_options(temp_dir: &TempDir) -> RunOptions {
    RunOptions {
        base_dir: Some(temp_dir.path().to_path_buf()),
        ..RunOptions::default()
    }
}

/// Environment lookup with only the tag set
pub fn tag_only_env(name: &str) -> Option<String> {
    (name == "TAG_NAME").then(|| TEST_TAG.to_string())
}

/// Resolves a config for `options` with `TAG_NAME` set
pub fn test_config(options: &RunOptions) -> Config {
    Config::from_lookup(options, tag_only_env).expect("Failed to resolve test config")
}
