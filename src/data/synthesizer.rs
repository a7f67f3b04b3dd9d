// ============================================================
// Layer 4 — Example Synthesizer
// ============================================================
// Expands each curated site into four training examples that
// share its URL and category but phrase the title differently:
//
//   1. the real page title
//   2. "Welcome to {host}"
//   3. "{host} - Home"
//   4. "Visit {host}"
//
// where {host} is the URL with its "scheme://" prefix removed,
// e.g. "https://www.atlassian.com/software/jira" →
//      "www.atlassian.com/software/jira".
//
// Output is deterministic: seeds in input order, variants in
// the order above. A seed that cannot be expanded is a
// configuration error and aborts the run before training.

use thiserror::Error;

use crate::domain::category::Taxonomy;
use crate::domain::example::{SiteSeed, TrainingExample};

/// Number of examples generated per seed.
pub const VARIANTS_PER_SEED: usize = 4;

/// Configuration errors in the seed list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("seed url '{url}' has no scheme separator '://'")]
    MissingScheme { url: String },

    #[error("seed '{title}' uses category '{category}' which is not in the taxonomy")]
    UnknownCategory { title: String, category: String },
}

/// Strip the "scheme://" prefix from a URL.
pub fn host_of(url: &str) -> Result<&str, SeedError> {
    url.split_once("://")
        .map(|(_, rest)| rest)
        .ok_or_else(|| SeedError::MissingScheme { url: url.to_string() })
}

pub struct ExampleSynthesizer<'a> {
    taxonomy: &'a Taxonomy,
}

impl<'a> ExampleSynthesizer<'a> {
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// Expand every seed into its variants.
    /// Fails on the first malformed seed.
    pub fn synthesize(&self, seeds: &[SiteSeed]) -> Result<Vec<TrainingExample>, SeedError> {
        let mut examples = Vec::with_capacity(seeds.len() * VARIANTS_PER_SEED);

        for seed in seeds {
            if !self.taxonomy.contains(&seed.category) {
                return Err(SeedError::UnknownCategory {
                    title:    seed.title.clone(),
                    category: seed.category.clone(),
                });
            }

            let host = host_of(&seed.url)?;
            let titles = [
                seed.title.clone(),
                format!("Welcome to {host}"),
                format!("{host} - Home"),
                format!("Visit {host}"),
            ];

            examples.extend(
                titles
                    .into_iter()
                    .map(|title| TrainingExample::new(title, seed.url.as_str(), seed.category.as_str())),
            );
        }

        tracing::debug!("Synthesized {} examples from {} seeds", examples.len(), seeds.len());
        Ok(examples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(url: &str) -> SiteSeed {
        SiteSeed::new("Example Domain", url, "learning")
    }

    #[test]
    fn test_four_variants_in_order() {
        let t = Taxonomy::default();
        let out = ExampleSynthesizer::new(&t)
            .synthesize(&[seed("https://example.com")])
            .unwrap();
        let titles: Vec<&str> = out.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Example Domain",
                "Welcome to example.com",
                "example.com - Home",
                "Visit example.com",
            ]
        );
        assert!(out.iter().all(|e| e.url == "https://example.com" && e.category == "learning"));
    }

    #[test]
    fn test_output_size_and_seed_order() {
        let t = Taxonomy::default();
        let seeds = vec![seed("https://a.com"), seed("http://b.org"), seed("https://c.net/path")];
        let out = ExampleSynthesizer::new(&t).synthesize(&seeds).unwrap();
        assert_eq!(out.len(), 3 * VARIANTS_PER_SEED);
        assert_eq!(out[4].title, "Example Domain");
        assert_eq!(out[4].url, "http://b.org");
        assert_eq!(out[11].title, "Visit c.net/path");
    }

    #[test]
    fn test_host_keeps_path() {
        assert_eq!(
            host_of("https://www.atlassian.com/software/jira").unwrap(),
            "www.atlassian.com/software/jira"
        );
    }

    #[test]
    fn test_missing_scheme_is_error() {
        let t = Taxonomy::default();
        let err = ExampleSynthesizer::new(&t)
            .synthesize(&[seed("example.com")])
            .unwrap_err();
        assert_eq!(err, SeedError::MissingScheme { url: "example.com".to_string() });
    }

    #[test]
    fn test_unknown_category_is_error() {
        let t = Taxonomy::default();
        let bad = SiteSeed::new("Cooking", "https://food.example", "recipes");
        let err = ExampleSynthesizer::new(&t).synthesize(&[bad]).unwrap_err();
        assert!(matches!(err, SeedError::UnknownCategory { .. }));
    }

    #[test]
    fn test_empty_seed_list() {
        let t = Taxonomy::default();
        assert!(ExampleSynthesizer::new(&t).synthesize(&[]).unwrap().is_empty());
    }
}
