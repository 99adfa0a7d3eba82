use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalizes a raw ingredient fragment into a comparable key.
///
/// Steps, in order: lower-case, strip diacritics (NFKD fold, drop combining
/// marks), remove parenthesized/bracketed sub-content, drop characters outside
/// {word characters, whitespace, hyphen}, collapse whitespace, trim.
pub struct Normalizer {
    bracketed: Regex,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            // Lazy match so adjacent groups are removed independently.
            bracketed: Regex::new(r"[(\[].*?[)\]]").expect("Invalid bracket pattern"),
        }
    }

    /// Returns the canonical form, or `None` when nothing survives
    /// normalization. Absent is the only error signal; malformed input never
    /// panics.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        if raw.is_empty() {
            return None;
        }

        let lowered = raw.to_lowercase();
        let folded: String = lowered
            .nfkd()
            .filter(|c| !is_combining_mark(*c))
            .collect();
        let stripped = self.bracketed.replace_all(&folded, "");

        // Keep word characters, whitespace and hyphens; drop the rest
        // (stray unmatched brackets included).
        let kept: String = stripped
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
            .collect();

        let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            None
        } else {
            Some(collapsed)
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
