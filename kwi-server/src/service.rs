//! Keyword search orchestration
//!
//! Every search is logged, then answered from the keyword cache. A cache
//! miss synthesizes the seed's variants and stores them before answering.

use std::sync::Arc;

use kwi_common::csv::{to_csv, CsvRecord};
use kwi_common::models::{Keyword, SearchHistory};
use kwi_common::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::store::{KeywordStore, SearchHistoryStore};
use crate::synth::MetricsSynthesizer;

/// Search result: exact match plus every related record (overview included)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSearchResult {
    pub overview: Keyword,
    pub related: Vec<Keyword>,
}

/// Search history listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryResponse {
    pub searches: Vec<SearchHistory>,
}

/// Keyword search service
#[derive(Debug)]
pub struct KeywordService {
    keywords: Arc<KeywordStore>,
    history: Arc<SearchHistoryStore>,
    synthesizer: Arc<MetricsSynthesizer>,
}

impl KeywordService {
    pub fn new(
        keywords: Arc<KeywordStore>,
        history: Arc<SearchHistoryStore>,
        synthesizer: Arc<MetricsSynthesizer>,
    ) -> Self {
        Self {
            keywords,
            history,
            synthesizer,
        }
    }

    pub fn keywords(&self) -> &KeywordStore {
        &self.keywords
    }

    pub fn history(&self) -> &SearchHistoryStore {
        &self.history
    }

    /// Log the search and return overview + related records
    ///
    /// Blank keywords are rejected before anything is logged.
    pub async fn search_keywords(&self, keyword: &str, user_id: Option<i64>) -> Result<KeywordSearchResult> {
        if keyword.trim().is_empty() {
            return Err(Error::InvalidInput("Valid keyword is required".to_string()));
        }

        self.history.append(keyword, user_id).await;

        let lookup = self
            .keywords
            .get_or_insert_with(keyword, || self.synthesizer.generate(keyword))
            .await?;
        if lookup.is_hit() {
            debug!("Cache hit for '{}' (id {})", keyword, lookup.overview().id);
        } else {
            info!(
                "Cache miss for '{}': stored {} synthesized keywords",
                keyword,
                lookup.inserted()
            );
        }

        let related = self.keywords.find_related(keyword).await;
        Ok(KeywordSearchResult {
            overview: lookup.into_overview(),
            related,
        })
    }

    /// All searches, newest first
    pub async fn get_search_history(&self) -> SearchHistoryResponse {
        SearchHistoryResponse {
            searches: self.history.list().await,
        }
    }

    /// Searches by one user, newest first
    pub async fn get_user_search_history(&self, user_id: i64) -> SearchHistoryResponse {
        SearchHistoryResponse {
            searches: self.history.list_for_user(user_id).await,
        }
    }

    /// Related records for `keyword` as CSV
    ///
    /// Runs a full search first, so the export is logged as a search too.
    pub async fn export_keywords(&self, keyword: &str) -> Result<String> {
        let result = self.search_keywords(keyword, None).await?;
        let csv = keywords_to_csv(&result.related)?;
        info!("Exported {} keywords for '{}'", result.related.len(), keyword);
        Ok(csv)
    }
}

/// Flat export row for one keyword
pub fn export_record(keyword: &Keyword) -> CsvRecord {
    CsvRecord::new()
        .field("Keyword", keyword.keyword.as_str())
        .field("Search Volume", keyword.volume)
        .field("Competition", keyword.competition)
        .field("CPC ($)", keyword.cpc)
        .field("Difficulty", keyword.difficulty)
        .field("Intent", keyword.intent.as_str())
        .field("Relevance", keyword.relevance)
        .field("Countries", keyword.countries_summary())
}

/// Serialize keywords for export; `NoData` when there is nothing to export
pub fn keywords_to_csv(keywords: &[Keyword]) -> Result<String> {
    if keywords.is_empty() {
        return Err(Error::NoData("No keyword data available for export".to_string()));
    }
    let records: Vec<CsvRecord> = keywords.iter().map(export_record).collect();
    Ok(to_csv(&records))
}
