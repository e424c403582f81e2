//! Sitemap building
//!
//! `build_entries` is a pure function over the configuration and post
//! list; `to_xml` serializes the entries into a sitemaps.org document.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::BlogPost;
use crate::helpers::date::parse_date_string;
use crate::helpers::url::full_url_for;

/// Change frequency hint for crawlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFreq {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

/// A single sitemap URL entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    /// Omitted when the source date string does not parse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<NaiveDate>,
    pub change_frequency: ChangeFreq,
    pub priority: f32,
}

/// Build the sitemap entries for the site
///
/// The fixed pages are always present. Blog entries (index plus one per
/// published post) are gated by `sitemap.include_blog`. A post date that
/// does not parse yields an entry without a lastmod rather than a
/// failure.
pub fn build_entries(config: &SiteConfig, posts: &[BlogPost]) -> Vec<SitemapEntry> {
    let today = Local::now().date_naive();

    let mut entries = vec![
        SitemapEntry {
            url: full_url_for(config, "/"),
            last_modified: Some(today),
            change_frequency: ChangeFreq::Monthly,
            priority: 1.0,
        },
        SitemapEntry {
            url: full_url_for(config, "/about"),
            last_modified: Some(today),
            change_frequency: ChangeFreq::Monthly,
            priority: 0.9,
        },
        SitemapEntry {
            url: full_url_for(config, "/contact"),
            last_modified: Some(today),
            change_frequency: ChangeFreq::Monthly,
            priority: 0.7,
        },
    ];

    if config.sitemap.include_blog {
        entries.push(SitemapEntry {
            url: full_url_for(config, "/blog"),
            last_modified: Some(today),
            change_frequency: ChangeFreq::Weekly,
            priority: 0.8,
        });
        for post in posts.iter().filter(|p| p.published) {
            entries.push(SitemapEntry {
                url: full_url_for(config, &post.path()),
                last_modified: parse_date_string(&post.date),
                change_frequency: ChangeFreq::Weekly,
                priority: 0.6,
            });
        }
    }

    entries
}

/// Serialize entries into a sitemaps.org `<urlset>` document
pub fn to_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(1024);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
        if let Some(lastmod) = entry.last_modified {
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                lastmod.format("%Y-%m-%d")
            ));
        }
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.change_frequency.as_str()
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Escape special XML characters
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostFrontMatter;

    fn test_config(include_blog: bool) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        config.sitemap.include_blog = include_blog;
        config
    }

    fn test_post(slug: &str, date: &str) -> BlogPost {
        let fm: PostFrontMatter =
            serde_yaml::from_str(&format!("title: {}\ndate: \"{}\"", slug, date)).unwrap();
        BlogPost::from_front_matter(slug, fm, "body")
    }

    #[test]
    fn test_fixed_entries_without_blog() {
        let posts = vec![test_post("a", "2024-01-01"), test_post("b", "2024-02-01")];
        let entries = build_entries(&test_config(false), &posts);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].url, "https://example.com/");
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[1].url, "https://example.com/about");
        assert_eq!(entries[2].url, "https://example.com/contact");
    }

    #[test]
    fn test_blog_entries_when_enabled() {
        let posts = vec![test_post("a", "2024-01-01"), test_post("b", "2024-02-01")];
        let entries = build_entries(&test_config(true), &posts);
        // home + about + contact + blog index + 2 posts
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[3].url, "https://example.com/blog");
        assert_eq!(entries[3].change_frequency, ChangeFreq::Weekly);
        assert_eq!(entries[4].url, "https://example.com/blog/a");
        assert_eq!(entries[4].priority, 0.6);
        assert_eq!(
            entries[4].last_modified.map(|d| d.to_string()),
            Some("2024-01-01".to_string())
        );
    }

    #[test]
    fn test_unpublished_posts_skipped() {
        let fm: PostFrontMatter =
            serde_yaml::from_str("title: Draft\npublished: false").unwrap();
        let draft = BlogPost::from_front_matter("draft", fm, "body");
        let entries = build_entries(&test_config(true), &[draft]);
        assert_eq!(entries.len(), 4);
    }

    #[test]
    fn test_invalid_date_does_not_crash() {
        let posts = vec![test_post("odd", "invalid-date")];
        let entries = build_entries(&test_config(true), &posts);
        let post_entry = entries.last().unwrap();
        assert_eq!(post_entry.url, "https://example.com/blog/odd");
        assert!(post_entry.last_modified.is_none());
        // XML generation completes and simply omits the lastmod
        let xml = to_xml(&entries);
        assert!(xml.contains("<loc>https://example.com/blog/odd</loc>"));
    }

    #[test]
    fn test_xml_structure() {
        let entries = build_entries(&test_config(false), &[]);
        let xml = to_xml(&entries);
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<urlset"));
        assert_eq!(xml.matches("<url>").count(), 3);
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml(r#""quoted""#), "&quot;quoted&quot;");
    }
}
