//! The release notes pipeline: read inputs, prompt the model, write the file.

use crate::config::{Config, RunOptions};
use crate::error::NotesError;
use crate::llm_providers::{GeminiConfig, GeminiProvider, TextGenerator};
use crate::log_debug;
use crate::prompt::{SYSTEM_INSTRUCTION, create_release_notes_prompt, truncate_chars};
use crate::sanitize::clean_response;

use std::fs;
use std::path::{Path, PathBuf};

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct GeneratedNotes {
    /// Where the notes were written
    pub output_path: PathBuf,
    /// The model response exactly as received
    pub raw: String,
    /// Trimmed and fence-stripped response
    pub cleaned: String,
    /// Whether `cleaned` (rather than `raw`) was written to disk
    pub wrote_cleaned: bool,
}

impl GeneratedNotes {
    /// The text that ended up in the output file
    pub fn written_text(&self) -> &str {
        if self.wrote_cleaned {
            &self.cleaned
        } else {
            &self.raw
        }
    }
}

/// Milestones reported while a run is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Inputs were read and the prompt is about to be sent
    Sending,
    /// The model call returned, successfully or not
    Received,
}

/// Generates release notes from a commit log and a diff
pub struct NotesGenerator<G> {
    config: Config,
    generator: G,
}

impl<G: TextGenerator> NotesGenerator<G> {
    pub fn new(config: Config, generator: G) -> Self {
        Self { config, generator }
    }

    /// Builds the prompt from the input files
    pub fn build_prompt(&self) -> Result<String, NotesError> {
        let commits = read_input(&self.config.commits_path)?;
        let diff = read_input(&self.config.diff_path)?;
        let diff = truncate_chars(&diff, self.config.diff_char_limit);

        log_debug!(
            "Read {} commit log chars and {} diff chars",
            commits.chars().count(),
            diff.chars().count()
        );

        Ok(create_release_notes_prompt(&self.config.tag_name, &commits, diff))
    }

    /// Runs the pipeline once. Nothing is written unless the model call
    /// succeeds.
    pub async fn run(&self) -> Result<GeneratedNotes, NotesError> {
        self.run_with_progress(|_| {}).await
    }

    /// Like [`run`](Self::run), reporting milestones to `on_progress`
    pub async fn run_with_progress<P>(
        &self,
        mut on_progress: P,
    ) -> Result<GeneratedNotes, NotesError>
    where
        P: FnMut(Progress),
    {
        let prompt = self.build_prompt()?;

        on_progress(Progress::Sending);
        let response = self
            .generator
            .generate_message(SYSTEM_INSTRUCTION, &prompt)
            .await;
        on_progress(Progress::Received);
        let raw = response.map_err(NotesError::Generation)?;

        let cleaned = clean_response(&raw);
        let notes = GeneratedNotes {
            output_path: self.config.output_path.clone(),
            raw,
            cleaned,
            wrote_cleaned: self.config.write_cleaned,
        };

        fs::write(&notes.output_path, notes.written_text()).map_err(|source| NotesError::Write {
            path: notes.output_path.clone(),
            source,
        })?;

        log_debug!(
            "Wrote {} bytes to {}",
            notes.written_text().len(),
            notes.output_path.display()
        );
        Ok(notes)
    }
}

fn read_input(path: &Path) -> Result<String, NotesError> {
    fs::read_to_string(path).map_err(|source| NotesError::Input {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves configuration through `lookup`, connects to Gemini and runs the
/// pipeline.
pub async fn generate_release_notes<F, P>(
    options: &RunOptions,
    lookup: F,
    on_progress: P,
) -> Result<GeneratedNotes, NotesError>
where
    F: Fn(&str) -> Option<String>,
    P: FnMut(Progress),
{
    let config = Config::from_lookup(options, lookup)?;
    let provider = GeminiProvider::new(GeminiConfig::from(&config));
    NotesGenerator::new(config, provider)
        .run_with_progress(on_progress)
        .await
}
