//! Hook extraction: a short excerpt of a post used to seed an image prompt.

/// Default maximum hook length in characters.
pub const DEFAULT_HOOK_MAX_CHARS: usize = 90;

/// Hook used when a post has no usable text.
pub const DEFAULT_FALLBACK_HOOK: &str = "CurlSek.ai";

const ELLIPSIS: &str = "...";

/// Returns the first line of `text` (or, with no newline, the text before
/// the first period), capped at `max_chars` characters.
///
/// Over-long hooks are cut to `max_chars - 3` characters, right-trimmed and
/// suffixed with `...`.
///
/// Empty or whitespace-only text, and text whose first segment is empty
/// (such as `".foo"`), yield `fallback` rather than an empty hook, so the
/// image prompt never quotes an empty string.
pub fn extract_hook(text: &str, max_chars: usize, fallback: &str) -> String {
    let trimmed = text.trim();
    let first = match trimmed.split_once('\n') {
        Some((line, _)) => line,
        None => trimmed.split('.').next().unwrap_or(trimmed),
    }
    .trim();

    if first.is_empty() {
        return fallback.to_string();
    }

    if first.chars().count() > max_chars {
        let keep = max_chars.saturating_sub(ELLIPSIS.len());
        let head: String = first.chars().take(keep).collect();
        return format!("{}{}", head.trim_end(), ELLIPSIS);
    }

    first.to_string()
}
