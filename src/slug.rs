//! URL-safe identifiers derived from display names.
//!
//! Novel directories are named by the slug of the novel's display name:
//!
//! - `"The Wandering Inn"` → `the-wandering-inn`
//! - `"Élan Vital"` → `elan-vital`
//! - `"   "` → `untitled`
//!
//! The mapping is lossy. Two different names can produce the same slug, and
//! resolving that is left to the caller.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Maximum slug length in code points.
pub const MAX_SLUG_LEN: usize = 50;

/// Returned when nothing usable survives normalization.
pub const FALLBACK_SLUG: &str = "untitled";

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s").unwrap());
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9_-]+").unwrap());
static SEPARATOR_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_]{2,}").unwrap());

fn is_separator(c: char) -> bool {
    c == '-' || c == '_'
}

/// Derive a slug from `name`.
///
/// Accents are folded to their base letters. The result is lowercased, and
/// whitespace becomes hyphens. Anything outside `[a-z0-9_-]` is dropped, and
/// runs of separators collapse into one hyphen. The slug is capped at
/// [`MAX_SLUG_LEN`] code points. Never returns an empty string.
pub fn slugify(name: &str) -> String {
    let folded: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect();
    let lower = folded.to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lower, "-");
    let cleaned = DISALLOWED.replace_all(&hyphenated, "");
    let collapsed = SEPARATOR_RUN.replace_all(&cleaned, "-");
    let mut slug = collapsed.trim_matches(is_separator).to_string();

    if slug.chars().count() > MAX_SLUG_LEN {
        let truncated: String = slug.chars().take(MAX_SLUG_LEN).collect();
        slug = truncated.trim_end_matches(is_separator).to_string();
    }

    if slug.is_empty() {
        return FALLBACK_SLUG.to_string();
    }
    slug
}
