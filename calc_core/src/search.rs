//! Keyword search over the calculator catalog.
//!
//! Each query token is matched (case-insensitively, by substring) against an
//! entry's fields and weighted:
//!
//! | field | weight |
//! |---|---|
//! | title or id | 3 |
//! | keyword | 2 |
//! | category | 1 |
//! | description | 1 |
//!
//! Hits are ordered by total score, then catalog order.

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::debug;

use crate::registry::{all_calculator_meta, CatalogEntry};

const TITLE_WEIGHT: u32 = 3;
const KEYWORD_WEIGHT: u32 = 2;
const CATEGORY_WEIGHT: u32 = 1;
const DESCRIPTION_WEIGHT: u32 = 1;

/// Lowercased searchable text for one catalog entry.
struct IndexedEntry {
    entry: CatalogEntry,
    title: String,
    keywords: Vec<String>,
    category: String,
    description: String,
}

impl IndexedEntry {
    fn new(entry: CatalogEntry) -> Self {
        Self {
            title: format!("{} {}", entry.title, entry.id).to_lowercase(),
            keywords: entry.keywords.iter().map(|k| k.to_lowercase()).collect(),
            category: entry
                .category
                .map(|c| c.display_name().to_lowercase())
                .unwrap_or_default(),
            description: entry.description.to_lowercase(),
            entry,
        }
    }

    fn score(&self, tokens: &[String]) -> u32 {
        tokens
            .iter()
            .map(|token| {
                let mut score = 0;
                if self.title.contains(token.as_str()) {
                    score += TITLE_WEIGHT;
                }
                if self.keywords.iter().any(|k| k.contains(token.as_str())) {
                    score += KEYWORD_WEIGHT;
                }
                if self.category.contains(token.as_str()) {
                    score += CATEGORY_WEIGHT;
                }
                if self.description.contains(token.as_str()) {
                    score += DESCRIPTION_WEIGHT;
                }
                score
            })
            .sum()
    }
}

static INDEX: Lazy<Vec<IndexedEntry>> = Lazy::new(|| {
    let index: Vec<IndexedEntry> = all_calculator_meta().into_iter().map(IndexedEntry::new).collect();
    debug!(entries = index.len(), "Built search index");
    index
});

/// One search result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub entry: CatalogEntry,
    pub score: u32,
}

/// Split a query into lowercase search tokens.
fn tokenize(query: &str) -> Vec<String> {
    query
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Search the catalog. A blank query returns nothing.
///
/// ```rust
/// use calc_core::registry::CalculatorId;
/// use calc_core::search::search;
///
/// let hits = search("sheetrock ceiling");
/// assert_eq!(hits[0].entry.id, CalculatorId::Drywall);
/// assert!(search("   ").is_empty());
/// ```
pub fn search(query: &str) -> Vec<SearchHit> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit> = INDEX
        .iter()
        .filter_map(|indexed| {
            let score = indexed.score(&tokens);
            (score > 0).then(|| SearchHit {
                entry: indexed.entry.clone(),
                score,
            })
        })
        .collect();
    // stable: equal scores keep catalog order
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CalculatorId;

    fn ids(hits: &[SearchHit]) -> Vec<CalculatorId> {
        hits.iter().map(|h| h.entry.id).collect()
    }

    #[test]
    fn test_title_beats_keyword() {
        // "concrete" is the concrete title (3) + "Concrete & Masonry" category (1)
        let hits = search("concrete");
        assert_eq!(hits[0].entry.id, CalculatorId::Concrete);
        assert_eq!(hits[0].score, 4);
        // brick is in the same category only
        assert!(ids(&hits).contains(&CalculatorId::Brick));
    }

    #[test]
    fn test_keyword_only() {
        let hits = search("sheetrock");
        assert_eq!(ids(&hits), vec![CalculatorId::Drywall]);
        assert_eq!(hits[0].score, KEYWORD_WEIGHT);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        // driveway is a keyword of concrete, gravel and asphalt
        let hits = search("driveway");
        assert_eq!(
            ids(&hits),
            vec![CalculatorId::Concrete, CalculatorId::Gravel, CalculatorId::Asphalt]
        );
    }

    #[test]
    fn test_case_insensitive_and_multi_token() {
        let hits = search("PAINT Primer");
        assert_eq!(hits[0].entry.id, CalculatorId::Paint);
        assert!(hits[0].score >= TITLE_WEIGHT + KEYWORD_WEIGHT);
    }

    #[test]
    fn test_no_match() {
        assert!(search("swimming pool").is_empty());
        assert!(search("").is_empty());
    }
}
