//! Page and post metadata generators

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::BlogPost;
use crate::helpers::url::full_url_for;

/// Metadata for a blog post page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostMetadata {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub author: String,
    pub published_time: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Metadata for a generic site page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Build the metadata object for a blog post
///
/// The author falls back to the site owner; the cover image, when
/// present, is made absolute against the base URL.
pub fn blog_post_metadata(config: &SiteConfig, post: &BlogPost) -> BlogPostMetadata {
    BlogPostMetadata {
        title: post.title.clone(),
        description: post.excerpt.clone(),
        keywords: post.tags.join(", "),
        author: post
            .author
            .clone()
            .unwrap_or_else(|| config.author.name.clone()),
        published_time: post.date.clone(),
        url: full_url_for(config, &post.path()),
        image: post
            .cover_image
            .as_deref()
            .map(|img| full_url_for(config, img)),
    }
}

/// Build the metadata object for a non-post page
pub fn page_metadata(
    config: &SiteConfig,
    title: &str,
    description: &str,
    path: &str,
) -> PageMetadata {
    PageMetadata {
        title: title.to_string(),
        description: description.to_string(),
        url: full_url_for(config, path),
        kind: "website".to_string(),
    }
}

/// Canonical URL for a path
///
/// Plain concatenation; the path passes through verbatim, including
/// trailing slashes and query strings.
pub fn canonical_url(config: &SiteConfig, path: &str) -> String {
    format!("{}{}", config.url, path)
}
