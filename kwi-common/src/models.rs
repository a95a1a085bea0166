//! Keyword, search history and waitlist models
//!
//! Keyword records are created once on a cache miss and never mutated.
//! Ids are assigned by the owning store, so the insert-side types
//! (`NewKeyword`, `NewWaitlistEntry`) carry no id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

// ========================================
// Keyword Types
// ========================================

/// Presumed searcher goal for a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Informational,
    Commercial,
    Transactional,
    Navigational,
}

impl Intent {
    /// All intents, in sampling order
    pub const ALL: [Intent; 4] = [
        Intent::Informational,
        Intent::Commercial,
        Intent::Transactional,
        Intent::Navigational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Informational => "informational",
            Intent::Commercial => "commercial",
            Intent::Transactional => "transactional",
            Intent::Navigational => "navigational",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Share of search volume attributed to one country (0-100)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryShare {
    pub country: String,
    pub percentage: u32,
}

impl CountryShare {
    pub fn new(country: impl Into<String>, percentage: u32) -> Self {
        Self {
            country: country.into(),
            percentage,
        }
    }
}

pub const DEFAULT_DIFFICULTY: u32 = 50;
pub const DEFAULT_INTENT: Intent = Intent::Informational;
pub const DEFAULT_RELEVANCE: u32 = 70;

/// Country distribution used when an insert leaves `countries` unset
pub fn default_countries() -> Vec<CountryShare> {
    vec![
        CountryShare::new("United States", 60),
        CountryShare::new("United Kingdom", 15),
        CountryShare::new("Canada", 10),
        CountryShare::new("Australia", 8),
        CountryShare::new("Other", 7),
    ]
}

/// Stored keyword record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub id: u64,
    pub keyword: String,
    pub volume: u32,
    /// 0.0-1.0, two decimal places
    pub competition: f64,
    /// Cost per click in dollars, two decimal places
    pub cpc: f64,
    /// Recent search-volume index points, oldest first
    pub trend: Vec<u32>,
    pub difficulty: u32,
    pub intent: Intent,
    pub relevance: u32,
    pub countries: Vec<CountryShare>,
}

impl Keyword {
    /// Countries flattened as `"Name: pct%, Name: pct%"`
    pub fn countries_summary(&self) -> String {
        self.countries
            .iter()
            .map(|c| format!("{}: {}%", c.country, c.percentage))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Keyword insert record (no id yet)
///
/// Optional metrics fall back to the documented defaults on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewKeyword {
    pub keyword: String,
    pub volume: u32,
    pub competition: f64,
    pub cpc: f64,
    pub trend: Vec<u32>,
    #[serde(default)]
    pub difficulty: Option<u32>,
    #[serde(default)]
    pub intent: Option<Intent>,
    #[serde(default)]
    pub relevance: Option<u32>,
    #[serde(default)]
    pub countries: Option<Vec<CountryShare>>,
}

impl NewKeyword {
    /// Minimal insert record with every optional metric unset
    pub fn new(keyword: impl Into<String>, volume: u32, competition: f64, cpc: f64, trend: Vec<u32>) -> Self {
        Self {
            keyword: keyword.into(),
            volume,
            competition,
            cpc,
            trend,
            difficulty: None,
            intent: None,
            relevance: None,
            countries: None,
        }
    }

    /// Assign an id and fill unset metrics with defaults
    pub fn into_keyword(self, id: u64) -> Keyword {
        Keyword {
            id,
            keyword: self.keyword,
            volume: self.volume,
            competition: self.competition,
            cpc: self.cpc,
            trend: self.trend,
            difficulty: self.difficulty.unwrap_or(DEFAULT_DIFFICULTY),
            intent: self.intent.unwrap_or(DEFAULT_INTENT),
            relevance: self.relevance.unwrap_or(DEFAULT_RELEVANCE),
            countries: self.countries.unwrap_or_else(default_countries),
        }
    }
}

// ========================================
// Search History Types
// ========================================

/// One logged search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistory {
    pub id: u64,
    /// Keyword as typed by the user (not normalized)
    pub keyword: String,
    pub timestamp: DateTime<Utc>,
    /// Opaque user label from the session layer; `None` for anonymous searches
    pub user_id: Option<i64>,
}

// ========================================
// Waitlist Types
// ========================================

/// Stored waitlist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Waitlist signup request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWaitlistEntry {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
}

impl NewWaitlistEntry {
    /// Validate signup fields
    ///
    /// Name needs at least 2 characters; email must look like `local@domain.tld`.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().chars().count() < 2 {
            return Err(Error::InvalidInput(
                "Name must be at least 2 characters".to_string(),
            ));
        }
        if !is_valid_email(&self.normalized_email()) {
            return Err(Error::InvalidInput(
                "Please enter a valid email address".to_string(),
            ));
        }
        Ok(())
    }

    /// Email with surrounding whitespace removed; used for storage and
    /// duplicate checks
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_string()
    }

    /// Company with blank values collapsed to `None`
    pub fn normalized_company(&self) -> Option<String> {
        self.company
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_serializes_lowercase() {
        let json = serde_json::to_string(&Intent::Transactional).unwrap();
        assert_eq!(json, "\"transactional\"");

        let parsed: Intent = serde_json::from_str("\"navigational\"").unwrap();
        assert_eq!(parsed, Intent::Navigational);
    }

    #[test]
    fn test_into_keyword_applies_defaults() {
        let keyword = NewKeyword::new("seo", 1000, 0.5, 2.25, vec![50, 60, 70, 80, 90]).into_keyword(7);

        assert_eq!(keyword.id, 7);
        assert_eq!(keyword.difficulty, 50);
        assert_eq!(keyword.intent, Intent::Informational);
        assert_eq!(keyword.relevance, 70);
        assert_eq!(keyword.countries, default_countries());
        let total: u32 = keyword.countries.iter().map(|c| c.percentage).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_into_keyword_keeps_explicit_metrics() {
        let mut new = NewKeyword::new("seo", 1000, 0.5, 2.25, vec![50; 5]);
        new.difficulty = Some(12);
        new.intent = Some(Intent::Commercial);
        new.relevance = Some(99);
        new.countries = Some(vec![CountryShare::new("Other", 100)]);

        let keyword = new.into_keyword(1);
        assert_eq!(keyword.difficulty, 12);
        assert_eq!(keyword.intent, Intent::Commercial);
        assert_eq!(keyword.relevance, 99);
        assert_eq!(keyword.countries.len(), 1);
    }

    #[test]
    fn test_countries_summary() {
        let keyword = NewKeyword::new("seo", 1, 0.1, 2.0, vec![]).into_keyword(1);
        assert_eq!(
            keyword.countries_summary(),
            "United States: 60%, United Kingdom: 15%, Canada: 10%, Australia: 8%, Other: 7%"
        );
    }

    #[test]
    fn test_search_history_uses_camel_case() {
        let entry = SearchHistory {
            id: 1,
            keyword: "SEO".to_string(),
            timestamp: Utc::now(),
            user_id: Some(3),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["userId"], 3);
        assert!(value.get("user_id").is_none());
    }

    #[test]
    fn test_waitlist_validation() {
        let mut entry = NewWaitlistEntry {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            company: None,
        };
        assert!(entry.validate().is_ok());

        entry.name = " A ".to_string();
        assert!(matches!(entry.validate(), Err(Error::InvalidInput(_))));

        entry.name = "Ada".to_string();
        for bad in ["", "ada", "ada@", "@example.com", "ada@example", "a da@example.com", "a@b@c.com"] {
            entry.email = bad.to_string();
            assert!(entry.validate().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_normalized_email_trims() {
        let entry = NewWaitlistEntry {
            name: "Ada".to_string(),
            email: "  ada@example.com\t".to_string(),
            company: None,
        };
        assert!(entry.validate().is_ok());
        assert_eq!(entry.normalized_email(), "ada@example.com");
    }

    #[test]
    fn test_normalized_company() {
        let mut entry = NewWaitlistEntry {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            company: Some("   ".to_string()),
        };
        assert_eq!(entry.normalized_company(), None);

        entry.company = Some(" Acme ".to_string());
        assert_eq!(entry.normalized_company().as_deref(), Some("Acme"));
    }
}
