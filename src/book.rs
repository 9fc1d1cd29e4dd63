//! The persisted book format (§6): serialized with `serde_json`, hashed with
//! `sha2`/`hex`, grounded on the teacher's `pack::manifest::Manifest` shape
//! (a version tag, content hash, and a `BTreeMap` of keyed entries).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use crate::order::Direction;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionSource {
    Cv,
    Yolo,
    Sam,
    Vlm,
    Manual,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelRecord {
    pub id: String,
    pub bbox: [i64; 4],
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub index: usize,
    pub size: [u32; 2],
    pub panels: Vec<PanelRecord>,
    pub order: Vec<String>,
    pub order_confidence: Option<f64>,
    pub source: DetectionSource,
    pub user_override: bool,
    pub gutters: Option<[i64; 2]>,
    pub processing_time: Option<f64>,
}

/// A user correction to one panel's bbox or to a whole page's order,
/// keyed as `"<page_index>|<panel_id>"` in `BookData::overrides`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Override {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[i64; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub reading_direction: Direction,
    pub created: String,
    pub tool_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookData {
    pub version: u32,
    pub book_hash: String,
    pub pages: Vec<Page>,
    #[serde(default)]
    pub overrides: BTreeMap<String, Override>,
    pub metadata: Metadata,
}

impl BookData {
    /// Assembles a book from its pages, computing `book_hash` over the
    /// concatenation of each page's size and index.
    pub fn new(pages: Vec<Page>, metadata: Metadata) -> Self {
        let book_hash = hash_pages(&pages);
        Self {
            version: FORMAT_VERSION,
            book_hash,
            pages,
            overrides: BTreeMap::new(),
            metadata,
        }
    }

    pub fn page(&self, index: usize) -> crate::error::Result<&Page> {
        self.pages.get(index).ok_or(crate::error::Error::PageNotFound(index))
    }
}

fn hash_pages(pages: &[Page]) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    for page in pages {
        hasher.update(page.index.to_le_bytes());
        hasher.update(page.size[0].to_le_bytes());
        hasher.update(page.size[1].to_le_bytes());
    }
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> BookData {
        let page = Page {
            index: 0,
            size: [800, 600],
            panels: vec![PanelRecord {
                id: "p-0".to_string(),
                bbox: [0, 0, 800, 600],
                confidence: 0.9,
            }],
            order: vec!["p-0".to_string()],
            order_confidence: Some(1.0),
            source: DetectionSource::Cv,
            user_override: false,
            gutters: None,
            processing_time: Some(0.01),
        };
        BookData::new(
            vec![page],
            Metadata {
                reading_direction: Direction::Ltr,
                created: "2026-01-01T00:00:00Z".to_string(),
                tool_version: "0.1.0".to_string(),
            },
        )
    }

    #[test]
    fn round_trip_is_byte_identical() {
        let book = sample_book();
        let serialized = serde_json::to_string(&book).unwrap();
        let parsed: BookData = serde_json::from_str(&serialized).unwrap();
        let reserialized = serde_json::to_string(&parsed).unwrap();
        assert_eq!(serialized, reserialized);
    }

    #[test]
    fn book_hash_has_expected_shape() {
        let book = sample_book();
        assert!(book.book_hash.starts_with("sha256:"));
        assert_eq!(book.book_hash.len(), "sha256:".len() + 64);
    }
}
