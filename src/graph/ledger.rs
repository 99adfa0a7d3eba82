use std::collections::{HashMap, HashSet};

use super::NodeLabel;

/// Process-lifetime record of node identifiers already written, per node
/// kind. First write wins; membership only grows and is discarded at process
/// end.
///
/// The pipeline is single-threaded, so plain sets suffice. A parallel
/// implementation must make the check-then-insert atomic per
/// (kind, identifier) — e.g. a lock-striped presence map — or duplicate node
/// rows become possible.
#[derive(Debug, Default)]
pub struct Ledger {
    seen: HashMap<NodeLabel, HashSet<String>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true exactly once per (kind, identifier): the caller emits the
    /// node row on true and skips it on false.
    pub fn first_sighting(&mut self, label: NodeLabel, id: &str) -> bool {
        let kind = self.seen.entry(label).or_default();
        if kind.contains(id) {
            false
        } else {
            kind.insert(id.to_string());
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sighting_once_per_identifier() {
        let mut ledger = Ledger::new();
        assert!(ledger.first_sighting(NodeLabel::Ingredient, "salt"));
        assert!(!ledger.first_sighting(NodeLabel::Ingredient, "salt"));
        assert!(ledger.first_sighting(NodeLabel::Ingredient, "sugar"));
    }

    #[test]
    fn test_identifiers_are_scoped_per_kind() {
        let mut ledger = Ledger::new();
        assert!(ledger.first_sighting(NodeLabel::Allergen, "en:milk"));
        // Same identifier under a different kind is a distinct node.
        assert!(ledger.first_sighting(NodeLabel::Ingredient, "en:milk"));
        assert!(!ledger.first_sighting(NodeLabel::Allergen, "en:milk"));
    }
}
