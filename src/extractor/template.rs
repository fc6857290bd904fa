use crate::extractor::cleaner::RemovalRule;

/// Where to find things on a page layout.
///
/// Each field lists selectors in priority order; the first one that matches
/// wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTemplate {
    pub name: String,
    /// Substring every supported page URL contains.
    pub url_pattern: String,
    pub title: Vec<String>,
    pub author: Vec<String>,
    pub publish_time: Vec<String>,
    pub content: Vec<String>,
    pub removals: Vec<RemovalRule>,
}

impl PageTemplate {
    /// Official-account article layout served from `mp.weixin.qq.com`.
    pub fn wechat() -> Self {
        Self {
            name: "wechat".to_string(),
            url_pattern: "mp.weixin.qq.com/s".to_string(),
            title: selectors(&["#activity-name", ".rich_media_title"]),
            author: selectors(&["#js_name", ".rich_media_meta_nickname"]),
            publish_time: selectors(&["#publish_time", ".rich_media_meta_text"]),
            content: selectors(&["#js_content", ".rich_media_content"]),
            removals: RemovalRule::defaults(),
        }
    }

    pub fn matches_url(&self, url: &str) -> bool {
        url.contains(&self.url_pattern)
    }
}

impl Default for PageTemplate {
    fn default() -> Self {
        Self::wechat()
    }
}

fn selectors(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
