//! Graph row model and emission: node labels, relationship types, the
//! 9-column bulk-loader row shape, the dedup ledger, and the streaming
//! emitter that turns product records into rows.

mod emit;
mod ledger;

pub use emit::{relationalize, GraphEmitter, RunStats};
pub use ledger::Ledger;

/// Bulk-loader header row. Column order and spelling are load-bearing.
pub const HEADER: [&str; 9] = [
    "LineType",
    "ID",
    "Name",
    "Label",
    "RelationshipType",
    "FromID",
    "FromLabel",
    "ToID",
    "ToLabel",
];

/// Node kinds in the output graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeLabel {
    Product,
    Ingredient,
    Allergen,
    DietaryPreference,
}

impl NodeLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeLabel::Product => "Product",
            NodeLabel::Ingredient => "Ingredient",
            NodeLabel::Allergen => "Allergen",
            NodeLabel::DietaryPreference => "DietaryPreference",
        }
    }
}

/// Typed relationships between nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelType {
    HasIngredient,
    IsAllergen,
    ConflictsWithDiet,
    MayContainAllergen,
    IsSuitableFor,
}

impl RelType {
    pub fn as_str(self) -> &'static str {
        match self {
            RelType::HasIngredient => "HAS_INGREDIENT",
            RelType::IsAllergen => "IS_ALLERGEN",
            RelType::ConflictsWithDiet => "CONFLICTS_WITH_DIET",
            RelType::MayContainAllergen => "MAY_CONTAIN_ALLERGEN",
            RelType::IsSuitableFor => "IS_SUITABLE_FOR",
        }
    }
}

/// One output row, either of the two shapes the bulk loader accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Node {
        id: String,
        name: String,
        label: NodeLabel,
    },
    Relationship {
        rel_type: RelType,
        from_id: String,
        from_label: NodeLabel,
        to_id: String,
        to_label: NodeLabel,
    },
}

impl Row {
    pub fn node(id: impl Into<String>, name: impl Into<String>, label: NodeLabel) -> Self {
        Row::Node {
            id: id.into(),
            name: name.into(),
            label,
        }
    }

    pub fn relationship(
        rel_type: RelType,
        from_id: impl Into<String>,
        from_label: NodeLabel,
        to_id: impl Into<String>,
        to_label: NodeLabel,
    ) -> Self {
        Row::Relationship {
            rel_type,
            from_id: from_id.into(),
            from_label,
            to_id: to_id.into(),
            to_label,
        }
    }

    /// The row flattened into the 9 output columns; unused columns are empty.
    pub fn columns(&self) -> [&str; 9] {
        match self {
            Row::Node { id, name, label } => {
                ["Node", id, name, label.as_str(), "", "", "", "", ""]
            }
            Row::Relationship {
                rel_type,
                from_id,
                from_label,
                to_id,
                to_label,
            } => [
                "Relationship",
                "",
                "",
                "",
                rel_type.as_str(),
                from_id,
                from_label.as_str(),
                to_id,
                to_label.as_str(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_and_reltype_strings() {
        assert_eq!(NodeLabel::DietaryPreference.as_str(), "DietaryPreference");
        assert_eq!(RelType::MayContainAllergen.as_str(), "MAY_CONTAIN_ALLERGEN");
        assert_eq!(RelType::IsSuitableFor.as_str(), "IS_SUITABLE_FOR");
    }

    #[test]
    fn test_node_row_columns() {
        let row = Row::node("123", "Oat Drink", NodeLabel::Product);
        assert_eq!(
            row.columns(),
            ["Node", "123", "Oat Drink", "Product", "", "", "", "", ""]
        );
    }

    #[test]
    fn test_relationship_row_columns() {
        let row = Row::relationship(
            RelType::HasIngredient,
            "123",
            NodeLabel::Product,
            "oats",
            NodeLabel::Ingredient,
        );
        assert_eq!(
            row.columns(),
            [
                "Relationship",
                "",
                "",
                "",
                "HAS_INGREDIENT",
                "123",
                "Product",
                "oats",
                "Ingredient"
            ]
        );
    }
}
