//! Catalog items and their ingestion records
use crate::encoder::{encode_item, Color, Size};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// A product as stored in the search backend.
///
/// Fields beyond color, size and price (name, image, ...) are kept verbatim
/// and returned to clients as part of the result metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(default = "new_item_id")]
    pub id: String,
    pub color: Color,
    pub size: Size,
    pub price: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

/// A record ready to be upserted: id, encoded vector and full metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertRecord {
    pub id: String,
    pub vector: Vec<f32>,
    pub metadata: serde_json::Value,
}

impl CatalogItem {
    pub fn new(color: Color, size: Size, price: f64) -> Self {
        Self {
            id: new_item_id(),
            color,
            size,
            price,
            extra: serde_json::Map::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, key: &str, value: serde_json::Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(Error::InvalidItem(format!(
                "{} has invalid price {}",
                self.id, self.price
            )));
        }
        Ok(())
    }

    /// Encode as `[color code, size code, price]` with the whole item as metadata.
    pub fn to_record(&self) -> Result<UpsertRecord> {
        self.validate()?;
        Ok(UpsertRecord {
            id: self.id.clone(),
            vector: encode_item(self.color, self.size, self.price as f32).to_vec(),
            metadata: serde_json::to_value(self)?,
        })
    }
}

/// Parse a JSON array of catalog items.
pub fn parse_catalog(json: &str) -> Result<Vec<CatalogItem>> {
    let items: Vec<CatalogItem> = serde_json::from_str(json)?;
    for item in &items {
        item.validate()?;
    }
    Ok(items)
}

/// Read and parse a catalog file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<CatalogItem>> {
    let json = std::fs::read_to_string(path)?;
    parse_catalog(&json)
}
