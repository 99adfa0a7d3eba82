//! Keyword-driven inference over normalized ingredient names: which allergens
//! an ingredient implies, and which dietary preferences it conflicts with.

use std::collections::BTreeSet;

use crate::catalog::Catalog;

/// The set of allergen identifiers a normalized ingredient name implies.
///
/// Every matching keyword pattern contributes; distinct patterns mapping to
/// the same allergen collapse into one entry ("wheat flour" implies en:gluten
/// through both the wheat and flour patterns). Pure function of the name and
/// the static table.
pub fn allergens_for(catalog: &Catalog, ingredient: &str) -> BTreeSet<&'static str> {
    catalog
        .rules()
        .iter()
        .filter(|rule| rule.matches(ingredient))
        .map(|rule| rule.allergen())
        .collect()
}

/// The set of dietary preferences a normalized ingredient name conflicts
/// with, derived transitively through the allergen keyword table.
pub fn diet_conflicts_for(catalog: &Catalog, ingredient: &str) -> BTreeSet<&'static str> {
    let implied = allergens_for(catalog, ingredient);
    catalog
        .diets()
        .iter()
        .filter(|diet| implied.iter().any(|allergen| diet.conflicts_with(allergen)))
        .map(|diet| diet.id)
        .collect()
}
