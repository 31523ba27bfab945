//! Code fence stripping for model output.
//!
//! This is a prefix heuristic, not a markdown parser: after trimming, a reply
//! that opens with a fence has its fence markers removed.

const FENCE: &str = "```";
const MARKDOWN_FENCE: &str = "```markdown";

/// Trims `response` and strips surrounding code fence markers.
///
/// * Opening with ```` ```markdown ````: that opener is removed, then every
///   remaining ```` ``` ````.
/// * Opening with a bare ```` ``` ```` (or any other language tag): the first
///   two ```` ``` ```` markers are removed.
/// * Otherwise the trimmed text is returned unchanged.
///
/// The result is not trimmed again, so the newline that followed the opener
/// survives.
pub fn clean_response(response: &str) -> String {
    let trimmed = response.trim();

    if trimmed.starts_with(MARKDOWN_FENCE) {
        trimmed.replacen(MARKDOWN_FENCE, "", 1).replace(FENCE, "")
    } else if trimmed.starts_with(FENCE) {
        trimmed.replacen(FENCE, "", 2)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fence_is_trim_only() {
        assert_eq!(
            clean_response("  \n## 🚀 Features\n- Login\n\n"),
            "## 🚀 Features\n- Login"
        );
    }

    #[test]
    fn test_markdown_fence_removed() {
        let response = "```markdown\n## 🚀 Features\n- Login\n```\n";
        assert_eq!(clean_response(response), "\n## 🚀 Features\n- Login\n");
    }

    #[test]
    fn test_markdown_fence_removes_all_inner_fences() {
        let response = "```markdown\nUse `x`:\n```rust\nlet x = 1;\n```\n```";
        let cleaned = clean_response(response);
        assert!(!cleaned.contains("```"));
        assert!(cleaned.contains("`x`"));
    }

    #[test]
    fn test_bare_fence_removes_first_two_markers() {
        let response = "```\n## Notes\n```\n```rust\nlet x = 1;\n```";
        assert_eq!(
            clean_response(response),
            "\n## Notes\n\n```rust\nlet x = 1;\n```"
        );
    }

    #[test]
    fn test_other_language_tag_keeps_tag() {
        assert_eq!(clean_response("```md\n# Title\n```"), "md\n# Title\n");
    }

    #[test]
    fn test_fence_not_at_start_is_left_alone() {
        let response = "## Notes\n```\ncode\n```";
        assert_eq!(clean_response(response), response);
    }
}
