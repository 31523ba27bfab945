// Calls the real Gemini API; run with `--features integration` and
// GEMINI_API_KEY set (a .env file works too).

#![cfg(feature = "integration")]

use dotenv::dotenv;
use gemini_notes::{generate_release_notes, logger};
use std::env;
use std::fs;

#[path = "test_utils.rs"]
mod test_utils;
use test_utils::{TEST_TAG, setup_workspace, workspace_options};

#[tokio::test]
async fn test_generate_release_notes_live() {
    dotenv().ok();
    let _ = logger::init();
    logger::enable_logging();
    logger::set_log_to_stdout(true);

    let api_key = env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY not set");
    let temp_dir = setup_workspace(
        "a1b2c3d feat: add dark mode toggle\n9f8e7d6 fix: settings not saved on exit\n",
        "diff --git a/src/settings.ts b/src/settings.ts\n+  darkMode: boolean;\n",
    );

    let lookup = |name: &str| match name {
        "GEMINI_API_KEY" => Some(api_key.clone()),
        "TAG_NAME" => Some(TEST_TAG.to_string()),
        _ => None,
    };
    let notes = generate_release_notes(&workspace_options(&temp_dir), lookup, |_| {})
        .await
    .expect("live generation should succeed");

    let written = fs::read_to_string(&notes.output_path).expect("notes file should exist");
    assert_eq!(written, notes.raw);
    assert!(!notes.cleaned.trim().is_empty());
}
