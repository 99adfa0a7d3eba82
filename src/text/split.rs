use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};

use super::Normalizer;

/// En dash and em dash; either introduces trailing detail text that is
/// dropped from a fragment.
const DASHES: &[char] = &['\u{2013}', '\u{2014}'];

/// Segments a raw ingredient-list string into normalized ingredient names.
///
/// Commas inside parentheses do not split: nested sub-lists such as
/// `"flavour (contains: sulphites, 2%)"` stay attached to their fragment and
/// are removed later by the normalizer. The regex engine has no lookaround,
/// so the comma scan tracks parenthesis depth directly.
pub struct Splitter {
    normalizer: Normalizer,
    lang_prefix: Regex,
    pct_paren: Regex,
    pct_bare: Regex,
}

impl Splitter {
    pub fn new() -> Self {
        Self {
            normalizer: Normalizer::new(),
            // Locale tags like "en:" or "fr-be:" at the start of a fragment.
            lang_prefix: RegexBuilder::new(r"^[a-z]{2,3}(?:-[a-z]{2,8})?\s*:\s*")
                .case_insensitive(true)
                .build()
                .expect("Invalid language prefix pattern"),
            pct_paren: Regex::new(r"\s*\(\s*\d+(?:\.\d+)?\s*%\s*\)\s*$")
                .expect("Invalid percentage pattern"),
            pct_bare: Regex::new(r"\s*\d+(?:\.\d+)?\s*%\s*$")
                .expect("Invalid percentage pattern"),
        }
    }

    /// Produces the set of normalized ingredient names for a raw ingredient
    /// list. Order is irrelevant and duplicates collapse; an empty or
    /// whitespace-only input yields an empty set.
    pub fn split(&self, ingredients_text: &str) -> BTreeSet<String> {
        let mut names = BTreeSet::new();

        for fragment in split_outside_parens(ingredients_text) {
            let fragment = fragment.trim();
            let fragment = self.lang_prefix.replace(fragment, "");
            let fragment = match fragment.split(DASHES).next() {
                Some(head) => head.trim(),
                None => "",
            };
            let fragment = self.pct_paren.replace(fragment, "");
            let fragment = self.pct_bare.replace(fragment.trim(), "");

            if let Some(name) = self.normalizer.normalize(fragment.trim()) {
                names.insert(name);
            }
        }

        names
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Split on commas at parenthesis depth zero.
fn split_outside_parens(text: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                fragments.push(&text[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    fragments.push(&text[start..]);
    fragments
}
