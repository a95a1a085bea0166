//! Sorting and volume filtering for related-keyword listings

use kwi_common::models::Keyword;
use serde::Deserialize;

/// Column to order related keywords by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Volume,
    Competition,
    Cpc,
    /// Keep store order
    Relevance,
}

/// Optional listing controls (query string of the data endpoint)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelatedView {
    pub sort_by: Option<SortKey>,
    pub min_volume: Option<u32>,
}

impl RelatedView {
    /// Drop records below `min_volume`, then sort descending by `sort_by`
    ///
    /// The sort is stable, so ties keep store order.
    pub fn apply(&self, mut related: Vec<Keyword>) -> Vec<Keyword> {
        if let Some(min_volume) = self.min_volume {
            related.retain(|k| k.volume >= min_volume);
        }
        match self.sort_by {
            Some(SortKey::Volume) => related.sort_by(|a, b| b.volume.cmp(&a.volume)),
            Some(SortKey::Competition) => related.sort_by(|a, b| b.competition.total_cmp(&a.competition)),
            Some(SortKey::Cpc) => related.sort_by(|a, b| b.cpc.total_cmp(&a.cpc)),
            Some(SortKey::Relevance) | None => {}
        }
        related
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwi_common::models::NewKeyword;

    fn sample() -> Vec<Keyword> {
        vec![
            NewKeyword::new("a", 500, 0.9, 2.0, vec![]).into_keyword(1),
            NewKeyword::new("b", 9000, 0.2, 8.5, vec![]).into_keyword(2),
            NewKeyword::new("c", 3000, 0.5, 4.0, vec![]).into_keyword(3),
        ]
    }

    fn names(keywords: &[Keyword]) -> Vec<&str> {
        keywords.iter().map(|k| k.keyword.as_str()).collect()
    }

    #[test]
    fn test_default_view_is_identity() {
        let result = RelatedView::default().apply(sample());
        assert_eq!(names(&result), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_descending() {
        let by = |key| RelatedView { sort_by: Some(key), min_volume: None }.apply(sample());
        assert_eq!(names(&by(SortKey::Volume)), vec!["b", "c", "a"]);
        assert_eq!(names(&by(SortKey::Competition)), vec!["a", "c", "b"]);
        assert_eq!(names(&by(SortKey::Cpc)), vec!["b", "c", "a"]);
        assert_eq!(names(&by(SortKey::Relevance)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_min_volume_filter() {
        let view = RelatedView {
            sort_by: Some(SortKey::Volume),
            min_volume: Some(3000),
        };
        assert_eq!(names(&view.apply(sample())), vec!["b", "c"]);
    }
}
