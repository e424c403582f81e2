//! Site configuration (site.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
///
/// Every piece of site-owner identity lives here and is injected into the
/// metadata/structured-data generators; nothing is hardcoded at the call
/// sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,

    // URL
    pub url: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub assets_dir: String,

    // Owner identity
    #[serde(default)]
    pub author: AuthorConfig,

    // Artifacts
    #[serde(default)]
    pub sitemap: SitemapConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Stanza".to_string(),
            description: String::new(),
            language: "en".to_string(),

            url: "https://example.com".to_string(),

            content_dir: "content/posts".to_string(),
            public_dir: "public".to_string(),
            assets_dir: "content/assets".to_string(),

            author: AuthorConfig::default(),
            sitemap: SitemapConfig::default(),
            feed: FeedConfig::default(),
            highlight: HighlightConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Site-owner identity used as the default author and for JSON-LD
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    pub job_title: String,
    pub github: String,
    pub twitter: String,
    pub linkedin: String,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            job_title: "Software Engineer".to_string(),
            github: String::new(),
            twitter: String::new(),
            linkedin: String::new(),
        }
    }
}

impl AuthorConfig {
    /// Social profile URLs that are actually configured
    pub fn profiles(&self) -> Vec<String> {
        [&self.github, &self.twitter, &self.linkedin]
            .into_iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect()
    }
}

/// Sitemap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Include the blog index and per-post entries
    pub include_blog: bool,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self { include_blog: true }
    }
}

/// Atom feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Maximum number of entries in the feed
    pub limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { limit: 20 }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_numbers: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_numbers: false,
        }
    }
}
