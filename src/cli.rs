use crate::config::{API_KEY_ENV, RunOptions, env_lookup};
use crate::error::NotesError;
use crate::notes::{GeneratedNotes, Progress, generate_release_notes};
use crate::{log_debug, log_error, log_info, log_warn, ui};
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, crate_version};
use indicatif::ProgressBar;
use std::path::PathBuf;

const LOG_FILE: &str = "gemini-notes-debug.log";

/// Command-line arguments. Every flag is optional; a bare invocation reads
/// `commits.txt` and `changes.diff` and writes `gemini_notes.md`.
#[derive(Parser, Debug)]
#[command(
    author,
    version = crate_version!(),
    about = "Generate release notes from a commit log and diff using Gemini",
    long_about = "Reads commits.txt and changes.diff from the working directory, asks Gemini for release notes \
                  for the version in TAG_NAME, and writes them to gemini_notes.md. GEMINI_API_KEY supplies the credential.",
    disable_version_flag = true,
    styles = get_styles(),
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Commit log to summarize
    #[arg(long, value_name = "PATH", help = "Commit log file [default: commits.txt]")]
    pub commits: Option<PathBuf>,

    /// Diff to summarize
    #[arg(long, value_name = "PATH", help = "Diff file [default: changes.diff]")]
    pub diff: Option<PathBuf>,

    /// Where to write the notes
    #[arg(
        short = 'o',
        long,
        value_name = "PATH",
        help = "Output file [default: gemini_notes.md]"
    )]
    pub output: Option<PathBuf>,

    /// Model to request
    #[arg(long, help = "Gemini model name [default: gemini-2.5-flash]")]
    pub model: Option<String>,

    /// Number of diff characters included in the prompt
    #[arg(
        long,
        value_name = "CHARS",
        help = "Diff characters sent to the model [default: 5000]"
    )]
    pub diff_limit: Option<usize>,

    /// Write the fence-stripped response instead of the raw one
    #[arg(
        long,
        help = "Write the trimmed, fence-stripped response instead of the raw response"
    )]
    pub write_cleaned: bool,

    /// Log debug messages to a file
    #[arg(short = 'l', long = "log", help = "Log debug messages to a file")]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(long = "log-file", help = "Specify a custom log file path")]
    pub log_file: Option<String>,

    /// Suppress non-essential output
    #[arg(short = 'q', long = "quiet", help = "Suppress non-essential output")]
    pub quiet: bool,

    /// Display the version
    #[arg(short = 'v', long = "version", help = "Display the version")]
    pub version: bool,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            base_dir: None,
            commits_path: self.commits.clone(),
            diff_path: self.diff.clone(),
            output_path: self.output.clone(),
            model: self.model.clone(),
            diff_char_limit: self.diff_limit,
            write_cleaned: self.write_cleaned,
        }
    }
}

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Status line for a finished run
pub fn format_outcome(outcome: &Result<GeneratedNotes, NotesError>) -> String {
    match outcome {
        Ok(notes) => format!("✅ Success! '{}' was generated.", notes.output_path.display()),
        Err(e) => format!("❌ ERROR: {e}"),
    }
}

/// Print the outcome of a run. Failures are reported, never propagated.
pub fn report(outcome: &Result<GeneratedNotes, NotesError>) {
    let line = format_outcome(outcome);
    match outcome {
        Ok(notes) => {
            log_info!("Release notes written to {}", notes.output_path.display());
            ui::print_success(&line);
        }
        Err(e) => {
            log_error!("Run failed ({} error): {}", e.kind(), e);
            ui::print_error(&line);
        }
    }
}

/// Start message and spinner around the model call
fn show_progress(progress: Progress, spinner: &mut Option<ProgressBar>) {
    match progress {
        Progress::Sending => {
            ui::print_info("Sending to Gemini... please wait.");
            *spinner = Some(ui::create_spinner("Waiting for the model to respond..."));
        }
        Progress::Received => {
            if let Some(pb) = spinner.take() {
                pb.finish_and_clear();
            }
        }
    }
}

fn setup_logging(cli: &Cli) {
    if let Err(e) = crate::logger::init() {
        eprintln!("Warning: Failed to initialize logging: {e}");
    }

    if cli.log {
        crate::logger::enable_logging();
        let log_file = cli.log_file.as_deref().unwrap_or(LOG_FILE);
        match crate::logger::set_log_file(log_file) {
            Ok(()) => log_debug!("Debug logging enabled, writing to {}", log_file),
            Err(e) => eprintln!("Warning: Failed to open log file {log_file}: {e}"),
        }
    } else {
        crate::logger::disable_logging();
    }
}

/// Main function to parse arguments and generate the notes.
///
/// A failed run is printed and still returns `Ok`, so the process exits 0.
pub async fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    if cli.version {
        ui::print_version(crate_version!());
        return Ok(());
    }

    setup_logging(&cli);

    if cli.quiet {
        ui::set_quiet_mode(true);
    }

    log_debug!("Parsed arguments: {:?}", cli);
    if env_lookup(API_KEY_ENV).is_none_or(|key| key.is_empty()) {
        log_warn!("{} is not set; the request will likely be rejected", API_KEY_ENV);
    }

    let mut spinner = None;
    let outcome = generate_release_notes(&cli.run_options(), env_lookup, |progress| {
        show_progress(progress, &mut spinner);
    })
    .await;
    if let Some(pb) = spinner.take() {
        pb.finish_and_clear();
    }
    report(&outcome);

    Ok(())
}
