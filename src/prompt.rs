//! Prompt construction for release notes.

/// Fixed directive sent alongside every prompt
pub const SYSTEM_INSTRUCTION: &str = "You are a specialized tool that outputs ONLY raw Markdown for GitHub Releases. No conversational text, no greetings, no backticks.";

/// Section headers the model is asked to fill in
pub const SECTION_HEADERS: [&str; 3] = [
    "## 🚀 Features",
    "## 🐛 Bug Fixes",
    "## ⚙️ Technical Changes",
];

/// Returns at most the first `limit` characters of `text`.
///
/// This is a hard cutoff on characters, not lines, so it may split a diff
/// line in half.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Builds the user prompt from the tag, the commit log and the (already
/// truncated) diff. Both inputs are embedded verbatim.
pub fn create_release_notes_prompt(tag_name: &str, commits: &str, diff: &str) -> String {
    let mut prompt = String::from("Generate professional release notes in Markdown.\n");
    prompt.push_str(&format!("Version: {tag_name}\n\n"));

    prompt.push_str("Structure:\n");
    for header in SECTION_HEADERS {
        prompt.push_str(header);
        prompt.push('\n');
    }

    prompt.push_str("\nCOMMITS:\n");
    prompt.push_str(commits);
    prompt.push_str("\n\nDIFF:\n");
    prompt.push_str(diff);
    prompt.push('\n');

    prompt
}
