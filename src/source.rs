//! Loosely-typed product records and the newline-delimited JSON source.
//!
//! The engine only requires a sequence of records; any datastore that can be
//! iterated as loosely-typed documents fits the seam. The bundled source
//! reads a JSONL export, one product object per line.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{FoodgraphError, Result};

/// Display-name fallback chain, most specific first.
const NAME_FIELDS: [&str; 4] = [
    "product_name_en",
    "product_name",
    "generic_name_en",
    "generic_name",
];

/// A single product record with loosely-typed fields. Field access never
/// fails; missing or wrongly-typed fields read as absent.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    fields: Map<String, Value>,
}

impl ProductRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Wraps a JSON value; only objects qualify as records.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }

    /// The identifying product code. `None` when missing, not a string, or
    /// blank; such records are rejected by the engine.
    pub fn code(&self) -> Option<&str> {
        self.str_field("code")
    }

    /// Display name resolved through the 4-field fallback chain, ending in
    /// `Product <code>` so a Product node never carries an empty name.
    pub fn display_name(&self) -> String {
        for key in NAME_FIELDS {
            if let Some(name) = self.str_field(key) {
                return name.to_string();
            }
        }
        format!("Product {}", self.code().unwrap_or_default())
    }

    /// Raw ingredient list text; the English variant wins when both exist.
    pub fn ingredients_text(&self) -> Option<&str> {
        self.str_field("ingredients_text_en")
            .or_else(|| self.str_field("ingredients_text"))
    }

    pub fn allergens_tags(&self) -> Option<&Value> {
        self.fields.get("allergens_tags")
    }

    pub fn traces_tags(&self) -> Option<&Value> {
        self.fields.get("traces_tags")
    }

    pub fn labels_tags(&self) -> Option<&Value> {
        self.fields.get("labels_tags")
    }

    /// True when the record carries anything the engine can relationalize:
    /// ingredient text or at least one non-empty tag field. Used by the
    /// opt-in content filter.
    pub fn has_content(&self) -> bool {
        if self.ingredients_text().is_some() {
            return true;
        }
        [self.allergens_tags(), self.traces_tags(), self.labels_tags()]
            .into_iter()
            .flatten()
            .any(non_empty_field)
    }
}

fn non_empty_field(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.trim().is_empty(),
        _ => false,
    }
}

/// Streams `ProductRecord`s from a newline-delimited JSON file. Blank lines
/// are skipped; a line that is not a JSON object is a source error.
pub struct JsonlSource {
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl JsonlSource {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }
}

impl Iterator for JsonlSource {
    type Item = Result<ProductRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_no += 1;

            match line {
                Err(e) => return Some(Err(e.into())),
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => {
                    let parsed = serde_json::from_str::<Value>(&line).map_err(|e| {
                        FoodgraphError::Source(format!("line {}: invalid JSON: {}", self.line_no, e))
                    });
                    return Some(parsed.and_then(|value| {
                        ProductRecord::from_value(value).ok_or_else(|| {
                            FoodgraphError::Source(format!(
                                "line {}: expected a JSON object",
                                self.line_no
                            ))
                        })
                    }));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn record(value: Value) -> ProductRecord {
        ProductRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_code_requires_nonempty_string() {
        assert_eq!(record(json!({"code": "123"})).code(), Some("123"));
        assert_eq!(record(json!({"code": "  "})).code(), None);
        assert_eq!(record(json!({"code": 123})).code(), None);
        assert_eq!(record(json!({})).code(), None);
    }

    #[test]
    fn test_display_name_fallback_chain() {
        let r = record(json!({
            "code": "1",
            "product_name": "Local Name",
            "generic_name_en": "Generic"
        }));
        assert_eq!(r.display_name(), "Local Name");

        let r = record(json!({"code": "1", "generic_name": "Only Generic"}));
        assert_eq!(r.display_name(), "Only Generic");

        let r = record(json!({"code": "42", "product_name": ""}));
        assert_eq!(r.display_name(), "Product 42");
    }

    #[test]
    fn test_ingredients_text_prefers_english() {
        let r = record(json!({
            "ingredients_text": "lait",
            "ingredients_text_en": "milk"
        }));
        assert_eq!(r.ingredients_text(), Some("milk"));

        let r = record(json!({"ingredients_text": "lait"}));
        assert_eq!(r.ingredients_text(), Some("lait"));

        let r = record(json!({"ingredients_text_en": ""}));
        assert_eq!(r.ingredients_text(), None);
    }

    #[test]
    fn test_has_content() {
        assert!(record(json!({"code": "1", "ingredients_text": "milk"})).has_content());
        assert!(record(json!({"code": "1", "labels_tags": ["en:vegan"]})).has_content());
        assert!(record(json!({"code": "1", "traces_tags": "en:nuts"})).has_content());
        assert!(!record(json!({"code": "1"})).has_content());
        assert!(!record(json!({"code": "1", "allergens_tags": []})).has_content());
        assert!(!record(json!({"code": "1", "labels_tags": 7})).has_content());
    }

    #[test]
    fn test_jsonl_source_reads_records_and_skips_blank_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("products.jsonl");
        fs::write(
            &path,
            "{\"code\": \"1\"}\n\n{\"code\": \"2\", \"ingredients_text\": \"milk\"}\n",
        )
        .unwrap();

        let records: Vec<_> = JsonlSource::open(&path)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].code(), Some("1"));
        assert_eq!(records[1].ingredients_text(), Some("milk"));
    }

    #[test]
    fn test_jsonl_source_invalid_json_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("products.jsonl");
        fs::write(&path, "{\"code\": \"1\"}\nnot json\n").unwrap();

        let mut source = JsonlSource::open(&path).unwrap();
        assert!(source.next().unwrap().is_ok());
        let err = source.next().unwrap().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_jsonl_source_non_object_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("products.jsonl");
        fs::write(&path, "[1, 2]\n").unwrap();

        let mut source = JsonlSource::open(&path).unwrap();
        let err = source.next().unwrap().unwrap_err();
        assert!(err.to_string().contains("expected a JSON object"));
    }

    #[test]
    fn test_jsonl_source_missing_file() {
        assert!(JsonlSource::open(Path::new("does/not/exist.jsonl")).is_err());
    }
}
