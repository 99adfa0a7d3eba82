//! Reconciles a product's explicit allergen/trace/label tags with the
//! ingredient-derived inferences computed for the same product.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::catalog::Catalog;

/// Normalize a tag field into a set of lower-cased, trimmed tags.
///
/// Accepts the three shapes source records use: absent, a list of strings,
/// or a single comma-joined string. Any other shape (and non-string list
/// entries) is treated as empty rather than an error.
pub fn tag_set(field: Option<&Value>) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    match field {
        Some(Value::Array(items)) => {
            for item in items {
                if let Value::String(s) = item {
                    insert_clean(&mut tags, s);
                }
            }
        }
        Some(Value::String(joined)) => {
            for part in joined.split(',') {
                insert_clean(&mut tags, part);
            }
        }
        _ => {}
    }
    tags
}

fn insert_clean(tags: &mut BTreeSet<String>, raw: &str) {
    let cleaned = raw.trim().to_lowercase();
    if !cleaned.is_empty() {
        tags.insert(cleaned);
    }
}

/// Filter a cleaned tag set down to identifiers in the closed allergen
/// catalog. Unknown tags never become nodes and never drive emission.
pub fn known_allergen_tags(catalog: &Catalog, tags: &BTreeSet<String>) -> BTreeSet<&'static str> {
    catalog
        .allergens()
        .iter()
        .copied()
        .filter(|allergen| tags.contains(*allergen))
        .collect()
}

/// Explicit allergens that no ingredient of the product accounts for. These
/// are the ones that get a synthesized proxy ingredient.
pub fn unexplained_allergens<'a>(
    explicit: &BTreeSet<&'a str>,
    derived: &BTreeSet<&str>,
) -> BTreeSet<&'a str> {
    explicit
        .iter()
        .copied()
        .filter(|allergen| !derived.contains(*allergen))
        .collect()
}

/// Proxy ingredient identifier for an explicit allergen with no traceable
/// ingredient cause. Scoped to the product: never reused across products,
/// even when two products share the synthesizing allergen.
pub fn proxy_ingredient_name(allergen: &str, product_code: &str) -> String {
    format!("{}_source_for_{}", allergen, product_code)
}

/// Dietary preferences whose positive label synonyms overlap the product's
/// cleaned label tags. Suitability is taken at face value from labels alone;
/// ingredient-derived conflicts do not veto it (documented limitation).
pub fn suitable_diets(catalog: &Catalog, labels: &BTreeSet<String>) -> BTreeSet<&'static str> {
    catalog
        .diets()
        .iter()
        .filter(|diet| labels.iter().any(|label| diet.label_applies(label)))
        .map(|diet| diet.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_set_absent() {
        assert!(tag_set(None).is_empty());
        assert!(tag_set(Some(&Value::Null)).is_empty());
    }

    #[test]
    fn test_tag_set_list_shape() {
        let value = json!(["en:milk", " EN:Nuts ", ""]);
        let tags = tag_set(Some(&value));
        assert_eq!(
            tags.into_iter().collect::<Vec<_>>(),
            vec!["en:milk", "en:nuts"]
        );
    }

    #[test]
    fn test_tag_set_comma_joined_shape() {
        let value = json!("en:milk, en:soybeans ,en:gluten");
        let tags = tag_set(Some(&value));
        assert_eq!(
            tags.into_iter().collect::<Vec<_>>(),
            vec!["en:gluten", "en:milk", "en:soybeans"]
        );
    }

    #[test]
    fn test_tag_set_unexpected_shapes_are_empty() {
        assert!(tag_set(Some(&json!(42))).is_empty());
        assert!(tag_set(Some(&json!({"en:milk": true}))).is_empty());
        // Non-string entries inside a list are skipped, not fatal.
        let mixed = json!(["en:milk", 7, null]);
        assert_eq!(tag_set(Some(&mixed)).len(), 1);
    }

    #[test]
    fn test_known_allergen_tags_filters_catalog() {
        let catalog = Catalog::new();
        let tags: BTreeSet<String> = ["en:milk", "en:kiwi", "en:gluten"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let known = known_allergen_tags(&catalog, &tags);
        assert_eq!(known.into_iter().collect::<Vec<_>>(), vec!["en:gluten", "en:milk"]);
    }

    #[test]
    fn test_unexplained_allergens() {
        let explicit: BTreeSet<&str> = ["en:milk", "en:nuts"].into_iter().collect();
        let derived: BTreeSet<&str> = ["en:milk"].into_iter().collect();
        let unexplained = unexplained_allergens(&explicit, &derived);
        assert_eq!(unexplained.into_iter().collect::<Vec<_>>(), vec!["en:nuts"]);
    }

    #[test]
    fn test_proxy_ingredient_name() {
        assert_eq!(
            proxy_ingredient_name("en:milk", "123"),
            "en:milk_source_for_123"
        );
    }

    #[test]
    fn test_suitable_diets_from_labels() {
        let catalog = Catalog::new();
        let labels: BTreeSet<String> = ["en:vegan", "sans gluten", "en:organic"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let diets = suitable_diets(&catalog, &labels);
        assert_eq!(diets.into_iter().collect::<Vec<_>>(), vec!["gluten_free", "vegan"]);
    }

    #[test]
    fn test_suitable_diets_no_overlap() {
        let catalog = Catalog::new();
        let labels: BTreeSet<String> = ["en:organic"].iter().map(|s| s.to_string()).collect();
        assert!(suitable_diets(&catalog, &labels).is_empty());
    }
}
