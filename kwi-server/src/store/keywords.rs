//! Keyword repository and relatedness matching
//!
//! Keywords are keyed by lowercased text. `find_related` is a bidirectional
//! substring test: a stored keyword is related to a query when either
//! contains the other, ignoring case.

use std::collections::{BTreeMap, HashMap};

use kwi_common::models::{Keyword, NewKeyword};
use kwi_common::{Error, Result};
use tokio::sync::RwLock;
use tracing::debug;

fn normalize(keyword: &str) -> String {
    keyword.to_lowercase()
}

/// Result of an insert-if-absent lookup
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// Keyword already stored; nothing generated
    Hit(Keyword),
    /// Keyword was missing; candidates were generated and stored
    Miss { overview: Keyword, inserted: usize },
}

impl CacheLookup {
    pub fn overview(&self) -> &Keyword {
        match self {
            CacheLookup::Hit(keyword) => keyword,
            CacheLookup::Miss { overview, .. } => overview,
        }
    }

    pub fn into_overview(self) -> Keyword {
        match self {
            CacheLookup::Hit(keyword) => keyword,
            CacheLookup::Miss { overview, .. } => overview,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, CacheLookup::Hit(_))
    }

    /// Records stored by this lookup (0 on a hit)
    pub fn inserted(&self) -> usize {
        match self {
            CacheLookup::Hit(_) => 0,
            CacheLookup::Miss { inserted, .. } => *inserted,
        }
    }
}

#[derive(Debug, Default)]
struct KeywordTable {
    /// Records in id (insertion) order
    records: BTreeMap<u64, Keyword>,
    /// Normalized text -> id of the first record with that text
    by_name: HashMap<String, u64>,
    last_id: u64,
}

impl KeywordTable {
    fn find_by_name(&self, keyword: &str) -> Option<&Keyword> {
        self.by_name
            .get(&normalize(keyword))
            .and_then(|id| self.records.get(id))
    }

    fn insert(&mut self, new: NewKeyword) -> Keyword {
        self.last_id += 1;
        let id = self.last_id;
        self.by_name.entry(normalize(&new.keyword)).or_insert(id);

        let keyword = new.into_keyword(id);
        self.records.insert(id, keyword.clone());
        keyword
    }
}

/// In-memory keyword repository
#[derive(Debug, Default)]
pub struct KeywordStore {
    table: RwLock<KeywordTable>,
}

impl KeywordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive exact match
    pub async fn find_by_name(&self, keyword: &str) -> Option<Keyword> {
        self.table.read().await.find_by_name(keyword).cloned()
    }

    /// Every stored keyword containing, or contained in, `keyword` (ignoring case)
    ///
    /// Results are in insertion order.
    pub async fn find_related(&self, keyword: &str) -> Vec<Keyword> {
        let query = normalize(keyword);
        let table = self.table.read().await;
        table
            .records
            .values()
            .filter(|k| {
                let stored = normalize(&k.keyword);
                stored.contains(&query) || query.contains(&stored)
            })
            .cloned()
            .collect()
    }

    /// Store one record under the next sequential id
    ///
    /// No uniqueness check happens here; use `get_or_insert_with` to fill
    /// the cache without duplicates.
    pub async fn insert(&self, new: NewKeyword) -> Keyword {
        self.table.write().await.insert(new)
    }

    /// Return the stored record for `keyword`, generating and storing
    /// candidates first when it is missing
    ///
    /// Lookup, generation and insert run under one write lock, so concurrent
    /// callers for the same keyword generate at most once. Candidates whose
    /// text is already stored are skipped.
    pub async fn get_or_insert_with<F>(&self, keyword: &str, generate: F) -> Result<CacheLookup>
    where
        F: FnOnce() -> Result<Vec<NewKeyword>>,
    {
        if let Some(existing) = self.table.read().await.find_by_name(keyword) {
            return Ok(CacheLookup::Hit(existing.clone()));
        }

        let mut table = self.table.write().await;
        // Another writer may have filled it between the locks
        if let Some(existing) = table.find_by_name(keyword) {
            return Ok(CacheLookup::Hit(existing.clone()));
        }

        let mut inserted = 0;
        for candidate in generate()? {
            if table.find_by_name(&candidate.keyword).is_some() {
                debug!("Skipping already stored keyword '{}'", candidate.keyword);
                continue;
            }
            table.insert(candidate);
            inserted += 1;
        }

        let overview = table.find_by_name(keyword).cloned().ok_or_else(|| {
            Error::Internal(format!("No record generated for keyword '{}'", keyword))
        })?;

        Ok(CacheLookup::Miss { overview, inserted })
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.table.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Number of stored records whose text equals `keyword` ignoring case
    pub async fn count_named(&self, keyword: &str) -> usize {
        let query = normalize(keyword);
        self.table
            .read()
            .await
            .records
            .values()
            .filter(|k| normalize(&k.keyword) == query)
            .count()
    }
}
