//! gemini-notes - AI-generated release notes for CI pipelines
//!
//! Reads a commit log and a diff, asks Gemini for release notes and writes
//! them to a markdown file.

#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::format_push_string)] // Performance improvement but stylistic

pub mod cli;
pub mod config;
pub mod error;
pub mod llm_providers;
pub mod logger;
pub mod notes;
pub mod prompt;
pub mod sanitize;
pub mod ui;

pub use config::{Config, RunOptions};
pub use error::{ErrorKind, NotesError};
pub use llm_providers::{GeminiProvider, TextGenerator};
pub use notes::{GeneratedNotes, NotesGenerator, Progress, generate_release_notes};
