//! Synthetic keyword metrics
//!
//! Produces a plausible set of related-keyword records for a seed phrase:
//! the seed itself, then randomly chosen prefix, suffix and question
//! variants. Each variant family samples its metrics from its own ranges.
//! Output size is 1..=21 and varies run to run unless the random source
//! is fixed.

use std::ops::RangeInclusive;
use std::sync::Mutex;

use kwi_common::models::{CountryShare, Intent, NewKeyword};
use kwi_common::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

pub const PREFIXES: [&str; 6] = ["best", "top", "affordable", "cheap", "premium", "professional"];

pub const SUFFIXES: [&str; 10] = [
    "services",
    "tools",
    "software",
    "platform",
    "agency",
    "companies",
    "tips",
    "guide",
    "strategies",
    "examples",
];

pub const TREND_POINTS: usize = 5;

/// Upper bound on records produced for one seed
pub const MAX_RECORDS: usize = 1 + PREFIXES.len() + SUFFIXES.len() + 4;

const PREFIX_PROBABILITY: f64 = 0.5;
const SUFFIX_PROBABILITY: f64 = 0.4;
const PHRASE_PROBABILITY: f64 = 0.5;

const COMPETITION: RangeInclusive<f64> = 0.1..=1.0;
const CPC: RangeInclusive<f64> = 2.0..=9.0;
const TREND: RangeInclusive<u32> = 50..=100;

/// Metric ranges for one variant family
#[derive(Debug, Clone)]
pub struct VariantProfile {
    pub volume: RangeInclusive<u32>,
    pub difficulty: RangeInclusive<u32>,
    pub relevance: RangeInclusive<u32>,
    /// `None` samples uniformly from all intents
    pub fixed_intent: Option<Intent>,
    /// Percentage range per country, in output order
    pub countries: [(&'static str, RangeInclusive<u32>); 5],
}

impl VariantProfile {
    pub fn seed() -> Self {
        Self {
            volume: 5000..=30000,
            difficulty: 20..=80,
            relevance: 60..=100,
            fixed_intent: None,
            countries: [
                ("United States", 30..=60),
                ("United Kingdom", 10..=25),
                ("Canada", 5..=15),
                ("Australia", 5..=10),
                ("Other", 5..=20),
            ],
        }
    }

    pub fn prefixed() -> Self {
        Self {
            volume: 1000..=15000,
            difficulty: 30..=90,
            relevance: 50..=95,
            fixed_intent: None,
            countries: [
                ("United States", 25..=55),
                ("United Kingdom", 10..=20),
                ("Canada", 5..=15),
                ("Australia", 5..=15),
                ("Other", 10..=25),
            ],
        }
    }

    pub fn suffixed() -> Self {
        Self {
            volume: 800..=12000,
            difficulty: 25..=85,
            relevance: 55..=90,
            fixed_intent: None,
            countries: [
                ("United States", 20..=50),
                ("United Kingdom", 8..=18),
                ("Canada", 8..=16),
                ("Australia", 7..=14),
                ("Other", 12..=28),
            ],
        }
    }

    /// Question and phrase templates are always informational
    pub fn phrase() -> Self {
        Self {
            volume: 500..=8000,
            difficulty: 15..=70,
            relevance: 60..=85,
            fixed_intent: Some(Intent::Informational),
            countries: [
                ("United States", 30..=55),
                ("United Kingdom", 10..=20),
                ("Canada", 5..=15),
                ("Australia", 5..=12),
                ("Other", 8..=25),
            ],
        }
    }

    /// Sample one record for `keyword`
    ///
    /// Country percentages are sampled independently and are not
    /// normalized to 100.
    pub fn sample<R: Rng + ?Sized>(&self, keyword: String, rng: &mut R) -> NewKeyword {
        let trend = (0..TREND_POINTS).map(|_| rng.gen_range(TREND)).collect();
        let intent = match self.fixed_intent {
            Some(intent) => intent,
            None => Intent::ALL[rng.gen_range(0..Intent::ALL.len())],
        };

        NewKeyword {
            keyword,
            volume: rng.gen_range(self.volume.clone()),
            competition: round2(rng.gen_range(COMPETITION)),
            cpc: round2(rng.gen_range(CPC)),
            trend,
            difficulty: Some(rng.gen_range(self.difficulty.clone())),
            intent: Some(intent),
            relevance: Some(rng.gen_range(self.relevance.clone())),
            countries: Some(
                self.countries
                    .iter()
                    .map(|(name, range)| CountryShare::new(*name, rng.gen_range(range.clone())))
                    .collect(),
            ),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Question/phrase variants of a seed
pub fn phrase_variants(seed: &str) -> [String; 4] {
    [
        format!("how to use {}", seed),
        format!("{} for beginners", seed),
        format!("{} vs competition", seed),
        format!("why {} is important", seed),
    ]
}

/// Generate candidate records for `seed` using `rng`
///
/// The first record is always the seed itself. Blank seeds are rejected.
pub fn generate_with<R: Rng + ?Sized>(seed: &str, rng: &mut R) -> Result<Vec<NewKeyword>> {
    if seed.trim().is_empty() {
        return Err(Error::InvalidInput(
            "Cannot synthesize metrics for an empty keyword".to_string(),
        ));
    }

    let mut records = Vec::with_capacity(MAX_RECORDS);
    records.push(VariantProfile::seed().sample(seed.to_string(), rng));

    let prefixed = VariantProfile::prefixed();
    for prefix in PREFIXES {
        if rng.gen_bool(PREFIX_PROBABILITY) {
            records.push(prefixed.sample(format!("{} {}", prefix, seed), rng));
        }
    }

    let suffixed = VariantProfile::suffixed();
    for suffix in SUFFIXES {
        if rng.gen_bool(SUFFIX_PROBABILITY) {
            records.push(suffixed.sample(format!("{} {}", seed, suffix), rng));
        }
    }

    let phrase = VariantProfile::phrase();
    for variant in phrase_variants(seed) {
        if rng.gen_bool(PHRASE_PROBABILITY) {
            records.push(phrase.sample(variant, rng));
        }
    }

    Ok(records)
}

/// Metrics synthesizer with an injectable random source
pub struct MetricsSynthesizer {
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl MetricsSynthesizer {
    /// Synthesizer drawing from `rng`
    pub fn new<R: RngCore + Send + 'static>(rng: R) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
        }
    }

    /// Synthesizer seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Generate candidate records for `seed`
    pub fn generate(&self, seed: &str) -> Result<Vec<NewKeyword>> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| Error::Internal("Random source lock poisoned".to_string()))?;
        generate_with(seed, &mut **rng)
    }
}

impl std::fmt::Debug for MetricsSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsSynthesizer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use std::collections::HashSet;

    fn in_range<T: PartialOrd>(value: T, range: &RangeInclusive<T>) -> bool {
        range.contains(&value)
    }

    fn assert_profile(record: &NewKeyword, profile: &VariantProfile) {
        assert!(in_range(record.volume, &profile.volume), "volume {} for {}", record.volume, record.keyword);
        assert!(in_range(record.competition, &COMPETITION));
        assert!(in_range(record.cpc, &CPC));
        assert_eq!(record.trend.len(), TREND_POINTS);
        assert!(record.trend.iter().all(|p| TREND.contains(p)));
        assert!(in_range(record.difficulty.unwrap(), &profile.difficulty));
        assert!(in_range(record.relevance.unwrap(), &profile.relevance));
        if let Some(intent) = profile.fixed_intent {
            assert_eq!(record.intent, Some(intent));
        }

        let countries = record.countries.as_ref().unwrap();
        assert_eq!(countries.len(), 5);
        for (share, (name, range)) in countries.iter().zip(profile.countries.iter()) {
            assert_eq!(share.country, *name);
            assert!(range.contains(&share.percentage));
        }

        // Two decimal places
        assert_eq!(record.competition, round2(record.competition));
        assert_eq!(record.cpc, round2(record.cpc));
    }

    fn profile_for(seed: &str, keyword: &str) -> VariantProfile {
        if keyword == seed {
            VariantProfile::seed()
        } else if phrase_variants(seed).iter().any(|p| p == keyword) {
            VariantProfile::phrase()
        } else if PREFIXES.iter().any(|p| keyword == format!("{} {}", p, seed)) {
            VariantProfile::prefixed()
        } else if SUFFIXES.iter().any(|s| keyword == format!("{} {}", seed, s)) {
            VariantProfile::suffixed()
        } else {
            panic!("unexpected keyword {:?}", keyword)
        }
    }

    #[test]
    fn test_first_record_is_seed() {
        let mut rng = StdRng::seed_from_u64(1);
        for seed in ["seo", "content marketing", "SEO Tools"] {
            let records = generate_with(seed, &mut rng).unwrap();
            assert_eq!(records[0].keyword, seed);
            assert!((1..=MAX_RECORDS).contains(&records.len()));
        }
    }

    #[test]
    fn test_records_fall_in_family_ranges() {
        let seed = "email marketing";
        for s in 0..50 {
            let mut rng = StdRng::seed_from_u64(s);
            for record in generate_with(seed, &mut rng).unwrap() {
                assert_profile(&record, &profile_for(seed, &record.keyword));
            }
        }
    }

    #[test]
    fn test_generated_keywords_are_distinct() {
        let mut rng = StdRng::seed_from_u64(99);
        let records = generate_with("widgets", &mut rng).unwrap();
        let names: HashSet<_> = records.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(names.len(), records.len());
    }

    #[test]
    fn test_same_seed_same_output() {
        let a = generate_with("widgets", &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate_with("widgets", &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_variant_count_varies_across_runs() {
        let sizes: HashSet<usize> = (0..40)
            .map(|s| generate_with("widgets", &mut StdRng::seed_from_u64(s)).unwrap().len())
            .collect();
        assert!(sizes.len() > 1);
    }

    #[test]
    fn test_zero_source_emits_every_variant_at_range_minimum() {
        // An all-zero source accepts every Bernoulli draw and samples each range's low end
        let mut rng = StepRng::new(0, 0);
        let records = generate_with("seo", &mut rng).unwrap();

        assert_eq!(records.len(), MAX_RECORDS);
        assert_eq!(records[1].keyword, "best seo");
        assert_eq!(records[7].keyword, "seo services");
        assert_eq!(records[17].keyword, "how to use seo");
        assert_eq!(records[20].keyword, "why seo is important");

        let seed = &records[0];
        assert_eq!(seed.volume, 5000);
        assert_eq!(seed.competition, 0.1);
        assert_eq!(seed.cpc, 2.0);
        assert_eq!(seed.trend, vec![50; TREND_POINTS]);
        assert_eq!(seed.difficulty, Some(20));
        assert_eq!(seed.intent, Some(Intent::Informational));
        assert_eq!(seed.relevance, Some(60));
        let percentages: Vec<u32> = seed.countries.as_ref().unwrap().iter().map(|c| c.percentage).collect();
        assert_eq!(percentages, vec![30, 10, 5, 5, 5]);

        let phrase = &records[18];
        assert_eq!(phrase.keyword, "seo for beginners");
        assert_eq!(phrase.volume, 500);
        assert_eq!(phrase.difficulty, Some(15));
    }

    #[test]
    fn test_phrases_always_informational() {
        let seed = "crm";
        let phrases = phrase_variants(seed);
        for s in 0..30 {
            let records = generate_with(seed, &mut StdRng::seed_from_u64(s)).unwrap();
            for record in records.iter().filter(|r| phrases.contains(&r.keyword)) {
                assert_eq!(record.intent, Some(Intent::Informational));
            }
        }
    }

    #[test]
    fn test_empty_seed_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(generate_with("", &mut rng), Err(Error::InvalidInput(_))));
        assert!(matches!(generate_with("   ", &mut rng), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_synthesizer_uses_injected_source() {
        let synth = MetricsSynthesizer::new(StepRng::new(0, 0));
        let records = synth.generate("seo").unwrap();
        assert_eq!(records.len(), MAX_RECORDS);
        assert_eq!(records[0].volume, 5000);
    }
}
