use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::classify;
use crate::error::Result;
use crate::reconcile;
use crate::sink::RowSink;
use crate::source::ProductRecord;
use crate::text::Splitter;

use super::{Ledger, NodeLabel, RelType, Row};

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Records that produced rows.
    pub processed: usize,
    /// Records rejected for a missing, blank, or non-string product code.
    pub rejected: usize,
    /// Records skipped by the opt-in content filter.
    pub skipped_no_content: usize,
    pub nodes_written: u64,
    pub relationships_written: u64,
}

/// Streams node and relationship rows for product records.
///
/// Node rows are deduplicated through the ledger per (kind, identifier),
/// first write wins; Product nodes and all relationship rows are written
/// unconditionally. Within a record, an ingredient's node row always
/// precedes the relationship rows that reference it.
pub struct GraphEmitter<'a, S: RowSink> {
    catalog: &'a Catalog,
    splitter: Splitter,
    ledger: Ledger,
    sink: &'a mut S,
    stats: RunStats,
}

impl<'a, S: RowSink> GraphEmitter<'a, S> {
    pub fn new(catalog: &'a Catalog, sink: &'a mut S) -> Self {
        Self {
            catalog,
            splitter: Splitter::new(),
            ledger: Ledger::new(),
            sink,
            stats: RunStats::default(),
        }
    }

    /// Write the closed Allergen and DietaryPreference catalogs. These are
    /// dependency-free and go out eagerly, before any product-derived row.
    pub fn emit_catalog_nodes(&mut self) -> Result<()> {
        for allergen in self.catalog.allergens() {
            if self.ledger.first_sighting(NodeLabel::Allergen, allergen) {
                self.write(Row::node(*allergen, "", NodeLabel::Allergen))?;
            }
        }
        log::info!("Wrote {} predefined Allergen nodes", self.catalog.allergens().len());

        for diet in self.catalog.diets() {
            if self.ledger.first_sighting(NodeLabel::DietaryPreference, diet.id) {
                self.write(Row::node(diet.id, "", NodeLabel::DietaryPreference))?;
            }
        }
        log::info!(
            "Wrote {} predefined DietaryPreference nodes",
            self.catalog.diets().len()
        );
        Ok(())
    }

    /// Process one record to completion. Records without a usable product
    /// code are rejected: counted, logged, no rows emitted.
    pub fn process_record(&mut self, record: &ProductRecord) -> Result<()> {
        let Some(code) = record.code() else {
            self.stats.rejected += 1;
            log::warn!("Skipping record with missing or invalid product code");
            return Ok(());
        };
        let code = code.to_string();

        // Product codes are not deduplicated: a repeated input code repeats
        // the node row.
        self.write(Row::node(
            code.clone(),
            record.display_name(),
            NodeLabel::Product,
        ))?;

        let ingredients = match record.ingredients_text() {
            Some(text) => self.splitter.split(text),
            None => BTreeSet::new(),
        };

        let mut derived: BTreeSet<&str> = BTreeSet::new();
        for ingredient in &ingredients {
            if self.ledger.first_sighting(NodeLabel::Ingredient, ingredient) {
                self.write(Row::node(ingredient.clone(), "", NodeLabel::Ingredient))?;
            }
            self.write(Row::relationship(
                RelType::HasIngredient,
                code.clone(),
                NodeLabel::Product,
                ingredient.clone(),
                NodeLabel::Ingredient,
            ))?;

            let implied = classify::allergens_for(self.catalog, ingredient);
            for allergen in &implied {
                self.write(Row::relationship(
                    RelType::IsAllergen,
                    ingredient.clone(),
                    NodeLabel::Ingredient,
                    *allergen,
                    NodeLabel::Allergen,
                ))?;
            }
            for diet in classify::diet_conflicts_for(self.catalog, ingredient) {
                self.write(Row::relationship(
                    RelType::ConflictsWithDiet,
                    ingredient.clone(),
                    NodeLabel::Ingredient,
                    diet,
                    NodeLabel::DietaryPreference,
                ))?;
            }
            derived.extend(implied);
        }

        // Explicit allergen tags with no ingredient explanation get a
        // synthesized proxy ingredient scoped to this product.
        let explicit = reconcile::known_allergen_tags(
            self.catalog,
            &reconcile::tag_set(record.allergens_tags()),
        );
        for allergen in reconcile::unexplained_allergens(&explicit, &derived) {
            let proxy = reconcile::proxy_ingredient_name(allergen, &code);
            if self.ledger.first_sighting(NodeLabel::Ingredient, &proxy) {
                self.write(Row::node(proxy.clone(), "", NodeLabel::Ingredient))?;
            }
            self.write(Row::relationship(
                RelType::HasIngredient,
                code.clone(),
                NodeLabel::Product,
                proxy.clone(),
                NodeLabel::Ingredient,
            ))?;
            self.write(Row::relationship(
                RelType::IsAllergen,
                proxy,
                NodeLabel::Ingredient,
                allergen,
                NodeLabel::Allergen,
            ))?;
        }

        // Trace tags connect product to allergen directly, no ingredient.
        for allergen in
            reconcile::known_allergen_tags(self.catalog, &reconcile::tag_set(record.traces_tags()))
        {
            self.write(Row::relationship(
                RelType::MayContainAllergen,
                code.clone(),
                NodeLabel::Product,
                allergen,
                NodeLabel::Allergen,
            ))?;
        }

        // Label-declared suitability is taken at face value; ingredient
        // conflicts do not veto it.
        for diet in reconcile::suitable_diets(self.catalog, &reconcile::tag_set(record.labels_tags()))
        {
            self.write(Row::relationship(
                RelType::IsSuitableFor,
                code.clone(),
                NodeLabel::Product,
                diet,
                NodeLabel::DietaryPreference,
            ))?;
        }

        self.stats.processed += 1;
        Ok(())
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Flush the sink and hand back the run counters.
    pub fn finish(self) -> Result<RunStats> {
        self.sink.finish()?;
        Ok(self.stats)
    }

    fn write(&mut self, row: Row) -> Result<()> {
        match &row {
            Row::Node { .. } => self.stats.nodes_written += 1,
            Row::Relationship { .. } => self.stats.relationships_written += 1,
        }
        self.sink.write_row(&row)
    }
}

/// Run the full pipeline over a record sequence: catalog nodes first, then
/// every record in order. A source or sink error aborts the run; rejected
/// records do not.
pub fn relationalize<S, I>(
    catalog: &Catalog,
    records: I,
    sink: &mut S,
    require_content: bool,
) -> Result<RunStats>
where
    S: RowSink,
    I: IntoIterator<Item = Result<ProductRecord>>,
{
    let mut emitter = GraphEmitter::new(catalog, sink);
    emitter.emit_catalog_nodes()?;

    let mut seen: usize = 0;
    for record in records {
        let record = record?;
        if require_content && !record.has_content() {
            emitter.stats.skipped_no_content += 1;
            continue;
        }
        emitter.process_record(&record)?;
        seen += 1;
        if seen % 10_000 == 0 {
            log::info!("Processed {} records", seen);
        }
    }

    emitter.finish()
}
