//! Static domain tables: the closed allergen catalog, the ingredient keyword
//! table, and the dietary preference profiles.
//!
//! All tables are fixed domain data known before any record is processed.
//! `Catalog::new()` compiles the keyword patterns once at startup; the
//! resulting value is immutable and passed by reference into every component.

use regex::{Regex, RegexBuilder};

/// The 14 declarable allergens. Every identifier outside this set is ignored
/// when reconciling explicit source tags.
pub const KNOWN_ALLERGENS: [&str; 14] = [
    "en:milk",
    "en:eggs",
    "en:fish",
    "en:crustaceans",
    "en:molluscs",
    "en:peanuts",
    "en:nuts",
    "en:soybeans",
    "en:gluten",
    "en:celery",
    "en:mustard",
    "en:sesame-seeds",
    "en:sulphur-dioxide-and-sulphites",
    "en:lupin",
];

/// Whole-word keyword patterns mapping ingredient text to allergen
/// identifiers. Overlapping patterns are an unordered union of independent
/// checks: every matching pattern contributes, and results collapse to a set.
const ALLERGEN_KEYWORDS: &[(&str, &str)] = &[
    (r"\bmilk\b", "en:milk"),
    (r"\bbutter\b", "en:milk"),
    (r"\bcheese\b", "en:milk"),
    (r"\bcream\b", "en:milk"),
    (r"\byogurt\b", "en:milk"),
    (r"\bcasein(?:ate)?\b", "en:milk"),
    (r"\bwhey\b", "en:milk"),
    (r"\blactose\b", "en:milk"),
    (r"\begg(?:s)?\b", "en:eggs"),
    (r"\bovalbumin\b", "en:eggs"),
    (r"\blysozyme\b", "en:eggs"),
    (r"\balbumin\b", "en:eggs"),
    (r"\bfish\b", "en:fish"),
    (r"\bsalmon\b", "en:fish"),
    (r"\btuna\b", "en:fish"),
    (r"\bcod\b", "en:fish"),
    (r"\banchovy\b", "en:fish"),
    (r"\btrout\b", "en:fish"),
    (r"\bhaddock\b", "en:fish"),
    (r"\bshrimp\b", "en:crustaceans"),
    (r"\bprawn(?:s)?\b", "en:crustaceans"),
    (r"\bcrab\b", "en:crustaceans"),
    (r"\blobster\b", "en:crustaceans"),
    (r"\bcrayfish\b", "en:crustaceans"),
    (r"\bkrill\b", "en:crustaceans"),
    (r"\bmollusc(?:s)?\b", "en:molluscs"),
    (r"\bmussel(?:s)?\b", "en:molluscs"),
    (r"\boyster(?:s)?\b", "en:molluscs"),
    (r"\bsquid\b", "en:molluscs"),
    (r"\boctopus\b", "en:molluscs"),
    (r"\bsnail(?:s)?\b", "en:molluscs"),
    (r"\bclam(?:s)?\b", "en:molluscs"),
    (r"\bscallop(?:s)?\b", "en:molluscs"),
    (r"\bpeanut(?:s)?\b", "en:peanuts"),
    (r"\barachis\b", "en:peanuts"),
    (r"\bnut(?:s)?\b", "en:nuts"),
    (r"\balmond(?:s)?\b", "en:nuts"),
    (r"\bhazelnut(?:s)?\b", "en:nuts"),
    (r"\bwalnut(?:s)?\b", "en:nuts"),
    (r"\bcashew(?:s)?\b", "en:nuts"),
    (r"\bpecan(?:s)?\b", "en:nuts"),
    (r"\bbrazil nut(?:s)?\b", "en:nuts"),
    (r"\bpistachio(?:s)?\b", "en:nuts"),
    (r"\bmacadamia(?:s)?\b", "en:nuts"),
    (r"\bqueensland nut(?:s)?\b", "en:nuts"),
    (r"\bsoy\b", "en:soybeans"),
    (r"\bsoya\b", "en:soybeans"),
    (r"\blecithin\b", "en:soybeans"),
    (r"\btofu\b", "en:soybeans"),
    (r"\bedamame\b", "en:soybeans"),
    (r"\bmiso\b", "en:soybeans"),
    (r"\btempeh\b", "en:soybeans"),
    (r"\bbean curd\b", "en:soybeans"),
    (r"\bwheat\b", "en:gluten"),
    (r"\bgluten\b", "en:gluten"),
    (r"\bbarley\b", "en:gluten"),
    (r"\brye\b", "en:gluten"),
    (r"\boat(?:s)?\b", "en:gluten"),
    (r"\bspelt\b", "en:gluten"),
    (r"\bkamut\b", "en:gluten"),
    (r"\bkhorasan wheat\b", "en:gluten"),
    (r"\bsemolina\b", "en:gluten"),
    (r"\bdurum\b", "en:gluten"),
    (r"\bcouscous\b", "en:gluten"),
    (r"\btriticale\b", "en:gluten"),
    (r"\bflour\b", "en:gluten"),
    (r"\bcelery\b", "en:celery"),
    (r"\bceleriac\b", "en:celery"),
    (r"\bmustard\b", "en:mustard"),
    (r"\bsesame\b", "en:sesame-seeds"),
    (r"\btahini\b", "en:sesame-seeds"),
    (r"\bsulphite(?:s)?\b", "en:sulphur-dioxide-and-sulphites"),
    (r"\bsulfite(?:s)?\b", "en:sulphur-dioxide-and-sulphites"),
    (r"\bsulphur dioxide\b", "en:sulphur-dioxide-and-sulphites"),
    (r"\bsulfur dioxide\b", "en:sulphur-dioxide-and-sulphites"),
    (r"\be22[0-8]\b", "en:sulphur-dioxide-and-sulphites"),
    (r"\blupin(?:s)?\b", "en:lupin"),
];

/// A compiled keyword pattern paired with the allergen it implies.
pub struct AllergenRule {
    pattern: Regex,
    allergen: &'static str,
}

impl AllergenRule {
    /// Whole-word, case-insensitive test against a normalized ingredient name.
    pub fn matches(&self, ingredient: &str) -> bool {
        self.pattern.is_match(ingredient)
    }

    pub fn allergen(&self) -> &'static str {
        self.allergen
    }
}

/// A dietary preference with its positive label synonyms and the identifiers
/// an ingredient-implied allergen may conflict with.
///
/// Conflict sets may name identifiers outside the 14-allergen catalog
/// (en:meat, en:honey, ...); those act purely as lookup keys and never become
/// Allergen nodes.
pub struct DietProfile {
    pub id: &'static str,
    pub positive_labels: &'static [&'static str],
    pub conflicts: &'static [&'static str],
}

impl DietProfile {
    /// True if the given allergen/category identifier conflicts with this diet.
    pub fn conflicts_with(&self, identifier: &str) -> bool {
        self.conflicts.contains(&identifier)
    }

    /// True if a cleaned label tag declares the product suitable for this diet.
    pub fn label_applies(&self, tag: &str) -> bool {
        self.positive_labels.contains(&tag)
    }
}

/// The 4 dietary preferences, emitted as DietaryPreference nodes.
pub const DIET_PROFILES: [DietProfile; 4] = [
    DietProfile {
        id: "vegan",
        positive_labels: &["en:vegan", "vegan"],
        conflicts: &[
            "en:non-vegan",
            "en:milk",
            "en:eggs",
            "en:fish",
            "en:crustaceans",
            "en:molluscs",
            "en:meat",
            "en:dairy",
            "en:honey",
            "en:collagen",
            "en:gelatin",
            "en:cheese",
        ],
    },
    DietProfile {
        id: "vegetarian",
        positive_labels: &["en:vegetarian", "vegetarian"],
        conflicts: &[
            "en:non-vegetarian",
            "en:fish",
            "en:crustaceans",
            "en:molluscs",
            "en:meat",
            "en:collagen",
            "en:gelatin",
        ],
    },
    DietProfile {
        id: "gluten_free",
        positive_labels: &["en:gluten-free", "gluten-free", "sans gluten"],
        conflicts: &["en:gluten"],
    },
    DietProfile {
        id: "lactose_free",
        positive_labels: &["en:lactose-free", "lactose-free", "sans lactose"],
        conflicts: &["en:milk", "en:lactose"],
    },
];

/// Immutable lookup tables with the keyword patterns compiled.
pub struct Catalog {
    rules: Vec<AllergenRule>,
}

impl Catalog {
    /// Compile the static keyword table. The patterns are fixed domain data;
    /// a failure to compile is a programmer error.
    pub fn new() -> Self {
        let rules = ALLERGEN_KEYWORDS
            .iter()
            .map(|(pattern, allergen)| AllergenRule {
                pattern: RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .expect("Invalid allergen keyword pattern"),
                allergen,
            })
            .collect();
        Self { rules }
    }

    pub fn allergens(&self) -> &'static [&'static str] {
        &KNOWN_ALLERGENS
    }

    pub fn diets(&self) -> &'static [DietProfile] {
        &DIET_PROFILES
    }

    pub fn rules(&self) -> &[AllergenRule] {
        &self.rules
    }

    pub fn is_known_allergen(&self, identifier: &str) -> bool {
        KNOWN_ALLERGENS.contains(&identifier)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
