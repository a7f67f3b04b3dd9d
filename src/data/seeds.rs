// ============================================================
// Layer 4 — Curated Site Seeds
// ============================================================
// The hand-picked websites the training corpus is generated
// from. Titles are the real page titles, including the
// non-English ones, so the corpus reflects what a browser
// actually reports for these tabs.

use crate::domain::example::SiteSeed;
use crate::domain::traits::SeedSource;

/// (title, url, category)
const SEEDS: &[(&str, &str, &str)] = &[
    // learning
    ("Coursera - Online Courses & Credentials From Top Educators", "https://www.coursera.org", "learning"),
    ("edX | Free Online Courses by Harvard, MIT, & more", "https://www.edx.org", "learning"),
    ("Stack Overflow - Where Developers Learn & Share", "https://stackoverflow.com", "learning"),
    ("GitHub: Let's build from here", "https://github.com", "learning"),
    ("LeetCode - The World's Leading Online Programming Learning Platform", "https://leetcode.com", "learning"),
    // shopping
    ("淘宝网 - 淘！我喜欢", "https://www.taobao.com", "shopping"),
    ("京东(JD.COM)-正品低价、品质保障、配送及时、轻松购物！", "https://www.jd.com", "shopping"),
    ("Amazon.com. Spend less. Smile more.", "https://www.amazon.com", "shopping"),
    ("天猫精选-天猫Tmall.com-理想生活上天猫", "https://www.tmall.com", "shopping"),
    // work
    ("Jira | Issue & Project Tracking Software | Atlassian", "https://www.atlassian.com/software/jira", "work"),
    ("Confluence | Your Remote-Friendly Team Workspace", "https://www.atlassian.com/software/confluence", "work"),
    ("GitLab: DevOps Platform", "https://gitlab.com", "work"),
    ("Jenkins – Open source automation server", "https://www.jenkins.io", "work"),
    // social
    ("微博 – 随时随地发现新鲜事", "https://weibo.com", "social"),
    ("Twitter. It's what's happening", "https://twitter.com", "social"),
    ("Facebook - Log In or Sign Up", "https://www.facebook.com", "social"),
    ("Instagram", "https://www.instagram.com", "social"),
    // entertainment
    ("哔哩哔哩 (゜-゜)つロ 干杯~-bilibili", "https://www.bilibili.com", "entertainment"),
    ("YouTube", "https://www.youtube.com", "entertainment"),
    ("Netflix - Watch TV Shows Online, Watch Movies Online", "https://www.netflix.com", "entertainment"),
    ("Steam Community", "https://steamcommunity.com", "entertainment"),
    // news
    ("新浪网 - 新闻中心", "https://news.sina.com.cn", "news"),
    ("BBC - Homepage", "https://www.bbc.com", "news"),
    ("CNN - Breaking News, Latest News and Videos", "https://www.cnn.com", "news"),
    ("Reuters | Breaking International News & Views", "https://www.reuters.com", "news"),
    // development
    ("npm | Home", "https://www.npmjs.com", "development"),
    ("Python.org", "https://www.python.org", "development"),
    ("MDN Web Docs", "https://developer.mozilla.org", "development"),
    ("Docker: Accelerated Container Application Development", "https://www.docker.com", "development"),
];

/// The built-in seed list.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeedCatalog;

impl SeedSource for SeedCatalog {
    fn seeds(&self) -> Vec<SiteSeed> {
        SEEDS
            .iter()
            .map(|&(title, url, category)| SiteSeed::new(title, url, category))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Taxonomy;

    #[test]
    fn test_catalog_size() {
        assert_eq!(SeedCatalog.seeds().len(), 29);
    }

    #[test]
    fn test_every_seed_category_is_in_taxonomy() {
        let taxonomy = Taxonomy::default();
        for seed in SeedCatalog.seeds() {
            assert!(taxonomy.contains(&seed.category), "unknown category {}", seed.category);
        }
    }
}
