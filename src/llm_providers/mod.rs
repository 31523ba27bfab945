//! Text generation backends.

mod gemini;

pub use gemini::{GEMINI_API_BASE, GeminiConfig, GeminiProvider};

use anyhow::Result;
use async_trait::async_trait;

/// A remote service that turns a prompt into text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for `prompt`, constrained by `system_instruction`
    async fn generate_message(&self, system_instruction: &str, prompt: &str) -> Result<String>;
}
