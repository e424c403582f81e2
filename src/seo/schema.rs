//! schema.org JSON-LD builders

use serde_json::{json, Value};

use crate::config::SiteConfig;
use crate::content::BlogPost;
use crate::helpers::url::full_url_for;

/// JSON-LD `BlogPosting` object for a post
///
/// The system tracks a single date per post, so `dateModified` mirrors
/// `datePublished`.
pub fn blog_post_structured_data(config: &SiteConfig, post: &BlogPost) -> Value {
    let mut data = json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": post.title,
        "description": post.excerpt,
        "datePublished": post.date,
        "dateModified": post.date,
        "url": full_url_for(config, &post.path()),
        "author": {
            "@type": "Person",
            "name": post
                .author
                .clone()
                .unwrap_or_else(|| config.author.name.clone()),
        },
        "publisher": {
            "@type": "Person",
            "name": config.author.name,
        },
    });

    if !post.tags.is_empty() {
        data["keywords"] = json!(post.tags.join(", "));
    }
    if let Some(image) = &post.cover_image {
        data["image"] = json!(full_url_for(config, image));
    }

    data
}

/// JSON-LD `WebSite` object for the site itself
pub fn website_structured_data(config: &SiteConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": config.title,
        "description": config.description,
        "url": format!("{}/", config.base_url()),
        "author": {
            "@type": "Person",
            "name": config.author.name,
        },
    })
}

/// JSON-LD `Person` object for the site owner
pub fn person_structured_data(config: &SiteConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Person",
        "name": config.author.name,
        "jobTitle": config.author.job_title,
        "url": format!("{}/", config.base_url()),
        "sameAs": config.author.profiles(),
    })
}
