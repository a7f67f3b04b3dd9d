// ============================================================
// Layer 4 — Text Normalizer
// ============================================================
// Turns a page's (title, url) pair into the single cleaned
// string the vocabulary and encoder work on.
//
// Steps (applied in order):
//   1. Join title and url with one space
//   2. Lowercase
//   3. Replace every character that is not a letter, digit
//      or whitespace with a space
//   4. Collapse whitespace runs into one space
//   5. Trim both ends
//
// What counts as a "letter" is controlled by CharRule:
//   - Unicode (default): any alphanumeric character survives,
//                        so CJK titles keep their words.
//   - Ascii            : only a-z and 0-9 survive. Non-ASCII
//                        letters are treated as punctuation, so
//                        a Chinese title contributes no tokens.
//
// Underscore is punctuation under both rules.
//
// The normalizer is total: every input, including the empty
// string, produces a (possibly empty) output.

use serde::{Deserialize, Serialize};

/// Which characters are kept as word characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharRule {
    #[default]
    Unicode,
    Ascii,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    rule: CharRule,
}

impl Normalizer {
    pub fn new(rule: CharRule) -> Self {
        Self { rule }
    }

    /// Normalize a (title, url) pair.
    pub fn normalize(&self, title: &str, url: &str) -> String {
        self.clean(&format!("{title} {url}"))
    }

    /// Normalize one already-joined string.
    pub fn clean(&self, text: &str) -> String {
        // ── Step 1: lowercase + strip punctuation ─────────────────────────────
        let stripped: String = text
            .to_lowercase()
            .chars()
            .map(|c| if self.is_word_char(c) || c.is_whitespace() { c } else { ' ' })
            .collect();

        // ── Step 2: collapse and trim whitespace ──────────────────────────────
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn is_word_char(&self, c: char) -> bool {
        match self.rule {
            CharRule::Ascii   => c.is_ascii_alphanumeric(),
            CharRule::Unicode => c.is_alphanumeric(),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation_and_lowercases() {
        let n = Normalizer::default();
        let out = n.normalize("Hello, World!", "http://x.com");
        assert_eq!(out, "hello world http x com");
        assert!(out.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '));
        assert!(!out.contains("  "));
    }

    #[test]
    fn test_idempotent() {
        let n = Normalizer::default();
        let once = n.normalize("GitHub: Let's build from here", "https://github.com");
        assert_eq!(n.normalize(&once, ""), once);
        assert_eq!(n.clean(&once), once);
    }

    #[test]
    fn test_empty_inputs() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("", ""), "");
        assert_eq!(n.normalize("   ", "\t\n"), "");
    }

    #[test]
    fn test_underscore_is_punctuation() {
        let n = Normalizer::default();
        assert_eq!(n.clean("snake_case"), "snake case");
    }

    #[test]
    fn test_ascii_rule_drops_cjk_tokens() {
        // The Chinese title vanishes entirely; only URL tokens remain.
        let n = Normalizer::new(CharRule::Ascii);
        assert_eq!(n.normalize("淘宝网 - 淘！我喜欢", "https://www.taobao.com"), "https www taobao com");
    }

    #[test]
    fn test_default_rule_keeps_cjk_title_words() {
        let n = Normalizer::default();
        assert_eq!(
            n.normalize("淘宝网 - 淘！我喜欢", "https://www.taobao.com"),
            "淘宝网 淘 我喜欢 https www taobao com"
        );
    }

    #[test]
    fn test_unicode_rule_keeps_cjk_tokens() {
        let n = Normalizer::new(CharRule::Unicode);
        assert_eq!(n.normalize("新浪网 - 新闻中心", "https://news.sina.com.cn"), "新浪网 新闻中心 https news sina com cn");
    }
}
