//! The blog post model

use serde::{Deserialize, Serialize};

use super::PostFrontMatter;
use crate::helpers::date::today_string;

/// A normalized blog post
///
/// `date` stays the raw frontmatter string; collections order posts by
/// plain string comparison, which holds as long as the content uses
/// ISO-formatted dates. Parsing to a calendar date happens downstream
/// where a real date is needed (sitemap lastmod, content checks).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// Unique identifier derived from the filename
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date string
    pub date: String,

    /// Short summary shown in listings
    pub excerpt: String,

    /// Raw body text after the frontmatter is stripped
    pub content: String,

    /// Post tags
    pub tags: Vec<String>,

    /// Whether the post is published
    pub published: bool,

    /// Post author, when it differs from the site owner
    pub author: Option<String>,

    /// Cover image path, relative to the site root
    pub cover_image: Option<String>,

    /// Post category
    pub category: Option<String>,
}

impl BlogPost {
    /// Build a post from parsed frontmatter and body content,
    /// applying the field defaults
    pub fn from_front_matter(slug: &str, fm: PostFrontMatter, body: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: fm.title.clone().unwrap_or_else(|| "Untitled".to_string()),
            date: fm.date.clone().unwrap_or_else(today_string),
            excerpt: fm.excerpt_or_summary(),
            content: body.to_string(),
            tags: fm.tags,
            published: fm.published,
            author: fm.author,
            cover_image: fm.cover_image,
            category: fm.category,
        }
    }

    /// URL path of the post page, without the site root
    pub fn path(&self) -> String {
        format!("/blog/{}", self.slug)
    }

    /// Case-insensitive tag membership test
    pub fn has_tag(&self, tag: &str) -> bool {
        let needle = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_matter(yaml: &str) -> PostFrontMatter {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let post = BlogPost::from_front_matter("hello", PostFrontMatter::default(), "body");
        assert_eq!(post.title, "Untitled");
        assert_eq!(post.excerpt, "");
        assert!(post.tags.is_empty());
        assert!(post.published);
        assert!(post.author.is_none());
        // Defaulted date is a plain ISO day
        assert_eq!(post.date.len(), 10);
    }

    #[test]
    fn test_fields_carried_over() {
        let fm = front_matter(
            "title: Shipping\ndate: \"2024-03-01\"\nexcerpt: out the door\ntags: [release]\nauthor: Guest\ncategory: news",
        );
        let post = BlogPost::from_front_matter("shipping", fm, "Hello");
        assert_eq!(post.title, "Shipping");
        assert_eq!(post.date, "2024-03-01");
        assert_eq!(post.excerpt, "out the door");
        assert_eq!(post.tags, vec!["release"]);
        assert_eq!(post.author.as_deref(), Some("Guest"));
        assert_eq!(post.category.as_deref(), Some("news"));
        assert_eq!(post.content, "Hello");
    }

    #[test]
    fn test_path() {
        let post = BlogPost::from_front_matter("my-post", PostFrontMatter::default(), "");
        assert_eq!(post.path(), "/blog/my-post");
    }

    #[test]
    fn test_has_tag_case_insensitive() {
        let fm = front_matter("title: T\ntags: [DevOps]");
        let post = BlogPost::from_front_matter("t", fm, "");
        assert!(post.has_tag("devops"));
        assert!(post.has_tag("DEVOPS"));
        assert!(!post.has_tag("dev"));
    }
}
