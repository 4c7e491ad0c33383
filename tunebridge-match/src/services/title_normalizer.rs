//! Title normalization
//!
//! Strips decorative and promotional text from a raw video title. Every rule
//! removes or trims; nothing is rewritten. Rules run in this order:
//! 1. Trailing promotional suffix ("official video", "lyrics", "hd", ...)
//! 2. Trailing channel brand (`- vevo`, `- topic`)
//! 3. Quote characters (straight and curly)
//! 4. Whitespace collapse + trim
//! 5. Every `(...)` / `[...]` span, regardless of content
//! 6. Whitespace collapse + trim of separators `{space, - : | ~}`
//! 7. Promotional keywords anywhere, then one more separator trim
//!
//! The rule chain is repeated until the title stops changing, so
//! `normalize(normalize(x)) == normalize(x)`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters trimmed from both ends after bracket and keyword removal
pub const SEPARATORS: &[char] = &[' ', '-', ':', '|', '~'];

static TRAILING_PROMO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\s*(?:official\s*(?:video|audio|lyric video|music video)?|lyrics?|hd|4k|mv|visualizer)\s*$",
    )
    .expect("trailing promo pattern")
});

static TRAILING_BRAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*-\s*(?:vevo|topic)\s*$").expect("trailing brand pattern"));

static QUOTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["'“”‘’„«»]"#).expect("quote pattern"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

static BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(.*?\)|\[.*?\]").expect("bracketed span pattern"));

static KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)official\s*(?:video|audio|lyric video|music video)?|lyrics?|hd|4k|mv|visualizer|topic",
    )
    .expect("keyword pattern")
});

/// Normalize a raw title. Total and pure; may return an empty string.
pub fn normalize(raw: &str) -> String {
    let mut current = normalize_pass(raw);
    // Each changing pass either shortens the title or turns non-space
    // whitespace into spaces, so this converges.
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_pass(raw: &str) -> String {
    let title = TRAILING_PROMO.replace(raw, "");
    let title = TRAILING_BRAND.replace(&title, "");
    let title = QUOTES.replace_all(&title, "");
    let title = collapse_whitespace(&title);
    let title = BRACKETED.replace_all(&title, "");
    let title = trim_separators(&collapse_whitespace(&title));
    let title = KEYWORDS.replace_all(&title, "");
    trim_separators(&collapse_whitespace(&title))
}

fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").trim().to_string()
}

fn trim_separators(s: &str) -> String {
    s.trim_matches(SEPARATORS).trim().to_string()
}
