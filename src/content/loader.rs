//! Post store - loads and queries posts from the content directory
//!
//! Every operation re-reads the filesystem; nothing is cached between
//! calls.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use super::{BlogPost, PostFrontMatter};
use crate::Site;

/// Extensions recognized as post sources, in lookup order
const EXTENSIONS: [&str; 2] = ["mdx", "md"];

/// Loads and queries posts from a content directory
pub struct PostStore {
    dir: PathBuf,
}

impl PostStore {
    /// Create a store for a site's content directory
    pub fn new(site: &Site) -> Self {
        Self {
            dir: site.content_dir.clone(),
        }
    }

    /// Create a store over an explicit directory
    pub fn open<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// List every available slug
    ///
    /// A missing content directory yields no slugs rather than an error.
    /// Order follows directory enumeration; callers that need a sorted
    /// view get it from the collection queries. A slug present with both
    /// extensions appears once.
    pub fn list_slugs(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        let mut slugs: Vec<String> = Vec::new();
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let is_post = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| EXTENSIONS.contains(&e))
                .unwrap_or(false);
            if !is_post {
                continue;
            }
            if let Some(slug) = path.file_stem().and_then(|s| s.to_str()) {
                if !slugs.iter().any(|s| s == slug) {
                    slugs.push(slug.to_string());
                }
            }
        }
        slugs
    }

    /// Path of the source file backing a slug, `.mdx` preferred
    pub fn source_path(&self, slug: &str) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", slug, ext)))
            .find(|p| p.is_file())
    }

    /// Load a single post by slug, or `None` when it cannot be loaded
    ///
    /// Tries `<slug>.mdx` first and falls back to `<slug>.md` when the
    /// read fails. Read and parse failures are logged and surfaced as
    /// `None`; one bad file never aborts a listing.
    pub fn load_post(&self, slug: &str) -> Option<BlogPost> {
        let mut last_err: Option<std::io::Error> = None;

        for ext in EXTENSIONS {
            let path = self.dir.join(format!("{}.{}", slug, ext));
            match fs::read_to_string(&path) {
                Ok(raw) => match PostFrontMatter::parse(&raw) {
                    Ok((fm, body)) => return Some(BlogPost::from_front_matter(slug, fm, body)),
                    Err(e) => {
                        tracing::warn!("Failed to parse post {:?}: {}", path, e);
                        return None;
                    }
                },
                Err(e) => last_err = Some(e),
            }
        }

        if let Some(e) = last_err {
            tracing::warn!("Failed to read post {}: {}", slug, e);
        }
        None
    }

    /// All published posts, sorted by date descending
    ///
    /// Dates are compared as strings; consistent ISO formatting in the
    /// content keeps this equivalent to calendar order.
    pub fn all_posts(&self) -> Vec<BlogPost> {
        let mut posts: Vec<BlogPost> = self
            .list_slugs()
            .iter()
            .filter_map(|slug| self.load_post(slug))
            .filter(|p| p.published)
            .collect();

        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts
    }

    /// Published posts carrying the given tag, case-insensitively
    pub fn posts_by_tag(&self, tag: &str) -> Vec<BlogPost> {
        self.all_posts()
            .into_iter()
            .filter(|p| p.has_tag(tag))
            .collect()
    }

    /// Every distinct tag across published posts, lexicographically sorted
    pub fn all_tags(&self) -> Vec<String> {
        let tags: BTreeSet<String> = self
            .all_posts()
            .into_iter()
            .flat_map(|p| p.tags)
            .collect();
        tags.into_iter().collect()
    }
}
