//! stanza: a static blog content engine
//!
//! This crate implements the content pipeline of a personal marketing/blog
//! site: markdown/MDX posts with YAML frontmatter are loaded from a content
//! directory, normalized into [`content::BlogPost`] values, and turned into
//! the build artifacts the site needs (content manifest, SEO metadata,
//! JSON-LD structured data, sitemap, Atom feed, search index).

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod seo;

use anyhow::Result;
use std::path::Path;

/// The main site handle: configuration plus resolved directories
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding the post source files
    pub content_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new site handle from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("site.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        })
    }

    /// Generate the build artifacts
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
