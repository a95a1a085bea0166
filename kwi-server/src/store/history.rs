//! Append-only search history log

use kwi_common::models::SearchHistory;
use kwi_common::time;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct HistoryLog {
    entries: Vec<SearchHistory>,
    last_id: u64,
}

/// In-memory search history
///
/// Unbounded; no deduplication. Listings are newest first, with id as the
/// tie-breaker for entries sharing a timestamp.
#[derive(Debug, Default)]
pub struct SearchHistoryStore {
    log: RwLock<HistoryLog>,
}

impl SearchHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a search as typed, stamped with the server clock
    pub async fn append(&self, keyword: &str, user_id: Option<i64>) -> SearchHistory {
        let mut log = self.log.write().await;
        log.last_id += 1;
        let entry = SearchHistory {
            id: log.last_id,
            keyword: keyword.to_string(),
            timestamp: time::now(),
            user_id,
        };
        log.entries.push(entry.clone());
        entry
    }

    /// All searches, newest first
    pub async fn list(&self) -> Vec<SearchHistory> {
        self.collect(|_| true).await
    }

    /// Searches logged for `user_id`, newest first
    pub async fn list_for_user(&self, user_id: i64) -> Vec<SearchHistory> {
        self.collect(|entry| entry.user_id == Some(user_id)).await
    }

    pub async fn len(&self) -> usize {
        self.log.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn collect<F>(&self, keep: F) -> Vec<SearchHistory>
    where
        F: Fn(&SearchHistory) -> bool,
    {
        let mut entries: Vec<SearchHistory> = self
            .log
            .read()
            .await
            .entries
            .iter()
            .filter(|entry| keep(entry))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        entries
    }
}
