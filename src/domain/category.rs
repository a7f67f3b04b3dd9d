// ============================================================
// Layer 3 — Category Taxonomy
// ============================================================
// The fixed set of website categories the classifier can
// predict, each with a list of representative keywords.
//
// The taxonomy is built once per process (Taxonomy::default)
// and passed by reference to every component that needs the
// label set, so training and inference always agree on it.
//
// The keywords are not used by the neural model. They drive
// the rule-based KeywordClassifier used when no trained
// model is available.

use serde::{Deserialize, Serialize};

/// Catch-all label for pages that match nothing else.
pub const OTHER: &str = "other";

/// One category label and the keywords that hint at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    pub label:    String,
    pub keywords: Vec<String>,
}

impl CategoryDef {
    pub fn new(label: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            label:    label.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// The immutable category taxonomy, in declaration order.
///
/// Declaration order matters only to the keyword rules
/// (first matching category wins). Anything that assigns
/// indices uses `sorted_labels()` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    categories: Vec<CategoryDef>,
}

impl Taxonomy {
    pub fn new(categories: Vec<CategoryDef>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[CategoryDef] {
        &self.categories
    }

    pub fn contains(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c.label == label)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Labels sorted lexicographically. Position = class index.
    pub fn sorted_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.categories.iter().map(|c| c.label.clone()).collect();
        labels.sort();
        labels.dedup();
        labels
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new(vec![
            CategoryDef::new("learning", &[
                "coursera", "udemy", "github", "stackoverflow", "leetcode", "edu", "learn",
                "study", "course", "tutorial", "documentation", "docs", "wiki", "knowledge",
                "research", "academic",
            ]),
            CategoryDef::new("shopping", &[
                "taobao", "tmall", "jd.com", "amazon", "shop", "store", "mall", "price", "buy",
                "cart", "product", "item", "order", "payment", "shipping",
            ]),
            CategoryDef::new("work", &[
                "jira", "confluence", "gitlab", "jenkins", "work", "project", "task", "meeting",
                "team", "company", "enterprise", "business", "office", "corporate", "management",
            ]),
            CategoryDef::new("social", &[
                "weibo", "twitter", "facebook", "instagram", "social", "friend", "message",
                "chat", "community", "share", "connect", "network", "group", "forum",
                "discussion",
            ]),
            CategoryDef::new("entertainment", &[
                "bilibili", "youtube", "netflix", "game", "video", "music", "movie", "play",
                "fun", "entertainment", "stream", "watch", "show", "series", "anime",
            ]),
            CategoryDef::new("news", &[
                "news", "sina", "bbc", "cnn", "report", "media", "press", "journal", "article",
                "headline", "update", "breaking", "current", "events", "daily",
            ]),
            CategoryDef::new("development", &[
                "github", "stackoverflow", "npm", "python", "javascript", "code", "programming",
                "developer", "api", "framework", "library", "tool", "debug", "test", "deploy",
            ]),
            CategoryDef::new(OTHER, &[]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_taxonomy_has_eight_categories() {
        let t = Taxonomy::default();
        assert_eq!(t.len(), 8);
        assert!(t.contains(OTHER));
    }

    #[test]
    fn test_sorted_labels_are_lexicographic() {
        let labels = Taxonomy::default().sorted_labels();
        assert_eq!(
            labels,
            vec![
                "development", "entertainment", "learning", "news",
                "other", "shopping", "social", "work",
            ]
        );
    }

    #[test]
    fn test_sorted_labels_ignore_declaration_order() {
        let a = Taxonomy::new(vec![CategoryDef::new("b", &[]), CategoryDef::new("a", &[])]);
        let b = Taxonomy::new(vec![CategoryDef::new("a", &[]), CategoryDef::new("b", &[])]);
        assert_eq!(a.sorted_labels(), b.sorted_labels());
    }
}
