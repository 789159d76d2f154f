//! Filename sanitizing: free spreadsheet text → a filesystem-safe token.
//!
//! Guest names arrive as whatever was typed into the sheet — stray tabs,
//! Windows-reserved punctuation, doubled spaces, or nothing at all. Each rule
//! below is a pure `&str → String` pass with no shared state, applied in a
//! fixed order.
//!
//! ## Rule Order
//!
//! Order matters: forbidden characters become spaces *before* whitespace
//! collapsing so that `"CON:FILE/NAME"` merges into single separators, and
//! spaces become underscores only after the final trim so no underscore can
//! land on either end from surrounding whitespace.
//!
//! Rules (applied in order):
//! 1. Trim leading/trailing whitespace
//! 2. Replace every run of forbidden characters (`\ / : * ? " < > |` plus
//!    CR, LF, TAB) with a single space
//! 3. Collapse runs of two or more whitespace characters to one space; trim
//! 4. Replace each remaining space with an underscore
//! 5. Truncate to at most 120 characters
//! 6. Map the empty result to the literal `"untitled"`

use once_cell::sync::Lazy;
use regex::Regex;

/// Returned when sanitizing leaves nothing usable.
pub const FALLBACK_NAME: &str = "untitled";

/// Maximum length of a sanitized name, in characters.
pub const MAX_NAME_CHARS: usize = 120;

// ── Rule 2: forbidden-character runs → single space ──────────────────────────

static RE_FORBIDDEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\\/:*?"<>|\r\n\t]+"#).expect("forbidden-chars pattern is valid"));

// ── Rule 3: whitespace runs → single space ───────────────────────────────────

static RE_WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("whitespace-run pattern is valid"));

/// Sanitize one raw spreadsheet cell into a filename fragment.
///
/// Total and pure: never fails, never returns an empty string, output
/// contains no forbidden character and no raw space, length ≤ 120 chars.
/// Sanitizing an already-sanitized name returns it unchanged.
///
/// # Example
/// ```rust
/// use pdf2named::sanitize_name;
///
/// assert_eq!(sanitize_name("Nguyễn Văn A"), "Nguyễn_Văn_A");
/// assert_eq!(sanitize_name("CON:FILE/NAME"), "CON_FILE_NAME");
/// assert_eq!(sanitize_name("   "), "untitled");
/// ```
pub fn sanitize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let spaced = RE_FORBIDDEN.replace_all(trimmed, " ");
    let collapsed = RE_WHITESPACE_RUN.replace_all(&spaced, " ");
    let underscored = collapsed.trim().replace(' ', "_");
    let bounded = truncate_chars(&underscored, MAX_NAME_CHARS);

    if bounded.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        bounded
    }
}

/// Truncate to at most `max` characters, never splitting a code point.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => s[..byte_idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name_gets_underscores() {
        assert_eq!(sanitize_name("Nguyen Van A"), "Nguyen_Van_A");
    }

    #[test]
    fn whitespace_runs_collapse_before_underscoring() {
        assert_eq!(sanitize_name("a   b"), "a_b");
        assert_eq!(sanitize_name("a \t b"), "a_b");
    }

    #[test]
    fn forbidden_runs_merge_into_one_separator() {
        assert_eq!(sanitize_name("CON:FILE/NAME"), "CON_FILE_NAME");
        assert_eq!(sanitize_name(r#"a\\//b"#), "a_b");
        assert_eq!(sanitize_name("x<>|y"), "x_y");
    }

    #[test]
    fn output_never_contains_forbidden_characters() {
        let nasty = r#"inv\ite/t:o*pa?r"ty<at>8|pm"#;
        let clean = sanitize_name(nasty);
        for c in ['\\', '/', ':', '*', '?', '"', '<', '>', '|', '\r', '\n', '\t', ' '] {
            assert!(!clean.contains(c), "{clean:?} still contains {c:?}");
        }
    }

    #[test]
    fn degenerate_inputs_fall_back_to_untitled() {
        assert_eq!(sanitize_name(""), FALLBACK_NAME);
        assert_eq!(sanitize_name("   "), FALLBACK_NAME);
        assert_eq!(sanitize_name("\t\r\n"), FALLBACK_NAME);
        assert_eq!(sanitize_name("///"), FALLBACK_NAME);
    }

    #[test]
    fn length_is_bounded_at_120_chars() {
        let long = "x".repeat(500);
        assert_eq!(sanitize_name(&long).chars().count(), MAX_NAME_CHARS);

        // Multi-byte characters count as one each and are never split.
        let viet = "Đặng".repeat(60); // 240 chars
        let out = sanitize_name(&viet);
        assert_eq!(out.chars().count(), MAX_NAME_CHARS);
    }

    #[test]
    fn sanitizing_twice_is_a_fixed_point() {
        for raw in ["Nguyen Van A", "CON:FILE/NAME", "  a   b  ", "", "Đặng Thị Hoa"] {
            let once = sanitize_name(raw);
            assert_eq!(sanitize_name(&once), once, "not a fixed point for {raw:?}");
        }
    }

    #[test]
    fn leading_and_trailing_whitespace_never_becomes_underscores() {
        assert_eq!(sanitize_name("  Tran Binh  "), "Tran_Binh");
        assert_eq!(sanitize_name("\n\tLe Chi\t\n"), "Le_Chi");
    }

    #[test]
    fn unicode_names_pass_through() {
        assert_eq!(sanitize_name("Trần Đức Lương"), "Trần_Đức_Lương");
    }
}
