//! Generator module - writes the build artifacts to the public directory

pub mod sitemap;

use anyhow::Result;
use std::collections::BTreeMap;
use std::fs;
use walkdir::WalkDir;

use serde_json::{json, Value};

use crate::content::{BlogPost, MarkdownRenderer, PostStore};
use crate::helpers::date::parse_date_string;
use crate::helpers::url::{encode_url, full_url_for};
use crate::seo;
use crate::Site;

use self::sitemap::escape_xml;

/// Build-time artifact generator
pub struct Generator {
    site: Site,
    store: PostStore,
    renderer: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Self {
        let store = PostStore::new(site);
        let renderer = MarkdownRenderer::new(&site.config.highlight);
        Self {
            site: site.clone(),
            store,
            renderer,
        }
    }

    /// Generate every artifact
    pub fn generate(&self) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;

        let posts = self.store.all_posts();
        tracing::info!("Loaded {} published posts", posts.len());

        self.write_manifest(&posts)?;
        self.write_post_bundles(&posts)?;
        self.write_tag_index(&posts)?;
        self.write_search_index(&posts)?;
        self.write_site_meta()?;
        self.write_sitemap(&posts)?;
        self.write_atom_feed(&posts)?;
        self.copy_assets()?;

        Ok(())
    }

    /// Write the fixed-page metadata and the site-level JSON-LD
    fn write_site_meta(&self) -> Result<()> {
        let config = &self.site.config;

        let pages = [
            ("Home", "/"),
            ("About", "/about"),
            ("Blog", "/blog"),
            ("Contact", "/contact"),
        ];
        let mut page_meta: Vec<Value> = Vec::with_capacity(pages.len());
        for (title, path) in pages {
            page_meta.push(json!({
                "metadata": serde_json::to_value(seo::page_metadata(
                    config,
                    title,
                    &config.description,
                    path,
                ))?,
                "canonical": seo::canonical_url(config, path),
            }));
        }

        let site_meta = json!({
            "pages": page_meta,
            "structuredData": {
                "website": seo::website_structured_data(config),
                "person": seo::person_structured_data(config),
            },
        });

        let output_path = self.site.public_dir.join("api").join("site.json");
        fs::write(&output_path, serde_json::to_string_pretty(&site_meta)?)?;
        tracing::info!("Generated api/site.json");
        Ok(())
    }

    /// Write the content manifest the page layer consumes
    fn write_manifest(&self, posts: &[BlogPost]) -> Result<()> {
        let manifest: Vec<Value> = posts
            .iter()
            .map(|p| {
                json!({
                    "slug": p.slug,
                    "title": p.title,
                    "date": p.date,
                    "excerpt": p.excerpt,
                    "tags": p.tags,
                    "author": p.author,
                    "coverImage": p.cover_image,
                    "category": p.category,
                    "url": full_url_for(&self.site.config, &p.path()),
                    "html": self.renderer.render(&p.content),
                })
            })
            .collect();

        let api_dir = self.site.public_dir.join("api");
        fs::create_dir_all(&api_dir)?;
        let output_path = api_dir.join("posts.json");
        fs::write(&output_path, serde_json::to_string_pretty(&manifest)?)?;
        tracing::info!("Generated api/posts.json");
        Ok(())
    }

    /// Write per-post bundles: the post plus its head metadata and JSON-LD
    fn write_post_bundles(&self, posts: &[BlogPost]) -> Result<()> {
        let bundle_dir = self.site.public_dir.join("api").join("posts");
        fs::create_dir_all(&bundle_dir)?;

        for post in posts {
            let bundle = json!({
                "post": serde_json::to_value(post)?,
                "metadata": serde_json::to_value(seo::blog_post_metadata(
                    &self.site.config,
                    post,
                ))?,
                "structuredData": seo::blog_post_structured_data(&self.site.config, post),
            });

            let output_path = bundle_dir.join(format!("{}.json", post.slug));
            fs::write(&output_path, serde_json::to_string_pretty(&bundle)?)?;
        }

        tracing::info!("Generated {} post bundles", posts.len());
        Ok(())
    }

    /// Write the tag index with post counts and filter links
    fn write_tag_index(&self, posts: &[BlogPost]) -> Result<()> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for post in posts {
            for tag in &post.tags {
                *counts.entry(tag.clone()).or_insert(0) += 1;
            }
        }

        let tags: Vec<Value> = counts
            .into_iter()
            .map(|(name, count)| {
                json!({
                    "name": name,
                    "count": count,
                    "url": format!("/blog?tag={}", encode_url(&name)),
                })
            })
            .collect();

        let output_path = self.site.public_dir.join("api").join("tags.json");
        fs::write(&output_path, serde_json::to_string_pretty(&tags)?)?;
        tracing::info!("Generated api/tags.json");
        Ok(())
    }

    /// Write the client-side search index
    fn write_search_index(&self, posts: &[BlogPost]) -> Result<()> {
        let search_data: Vec<Value> = posts
            .iter()
            .map(|p| {
                json!({
                    "title": p.title,
                    "url": p.path(),
                    "content": strip_html(&self.renderer.render(&p.content)),
                    "date": p.date,
                    "tags": p.tags,
                })
            })
            .collect();

        let output_path = self.site.public_dir.join("search.json");
        fs::write(&output_path, serde_json::to_string_pretty(&search_data)?)?;
        tracing::info!("Generated search.json");
        Ok(())
    }

    /// Write sitemap.xml
    fn write_sitemap(&self, posts: &[BlogPost]) -> Result<()> {
        let entries = sitemap::build_entries(&self.site.config, posts);
        let xml = sitemap::to_xml(&entries);

        let output_path = self.site.public_dir.join("sitemap.xml");
        fs::write(&output_path, xml)?;
        tracing::info!("Generated sitemap.xml with {} entries", entries.len());
        Ok(())
    }

    /// Write the Atom feed of recent posts
    fn write_atom_feed(&self, posts: &[BlogPost]) -> Result<()> {
        let config = &self.site.config;
        let base_url = config.base_url();

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
        feed.push('\n');
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!(
            "  <link href=\"{}/atom.xml\" rel=\"self\"/>\n",
            base_url
        ));
        feed.push_str(&format!("  <link href=\"{}/\"/>\n", base_url));
        feed.push_str(&format!(
            "  <updated>{}</updated>\n",
            chrono::Utc::now().to_rfc3339()
        ));
        feed.push_str(&format!("  <id>{}/</id>\n", base_url));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.author.name)
        ));

        for post in posts.iter().take(config.feed.limit) {
            let url = full_url_for(config, &post.path());
            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", url));
            feed.push_str(&format!("    <id>{}</id>\n", url));
            feed.push_str(&format!(
                "    <published>{}</published>\n",
                atom_timestamp(&post.date)
            ));
            feed.push_str(&format!(
                "    <updated>{}</updated>\n",
                atom_timestamp(&post.date)
            ));

            let html = self.renderer.render(&post.content);
            let absolute = convert_relative_urls_to_absolute(&html, base_url);
            let clean = strip_invalid_xml_chars(&absolute);
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                clean
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        let output_path = self.site.public_dir.join("atom.xml");
        fs::write(&output_path, feed)?;
        tracing::info!("Generated atom.xml");
        Ok(())
    }

    /// Copy static assets into the public directory
    fn copy_assets(&self) -> Result<()> {
        let assets_dir = self.site.base_dir.join(&self.site.config.assets_dir);
        if !assets_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(&assets_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(&assets_dir)?;
            let dest = self.site.public_dir.join("assets").join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            tracing::debug!("Copied asset: {:?}", dest);
        }

        Ok(())
    }
}

/// Timestamp for Atom elements; a date that does not parse passes
/// through as-is so feed generation never fails on bad content
fn atom_timestamp(date: &str) -> String {
    match parse_date_string(date) {
        Some(d) => format!("{}T00:00:00Z", d.format("%Y-%m-%d")),
        None => date.to_string(),
    }
}

/// Strip HTML tags from content
fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Convert relative href/src URLs in HTML content to absolute URLs
fn convert_relative_urls_to_absolute(content: &str, base_url: &str) -> String {
    content
        .replace("href=\"/", &format!("href=\"{}/", base_url))
        .replace("src=\"/", &format!("src=\"{}/", base_url))
        .replace("href='/", &format!("href='{}/", base_url))
        .replace("src='/", &format!("src='{}/", base_url))
}

/// Strip control characters XML 1.0 does not allow
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::path::Path;

    fn write_post(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn test_site(base: &Path) -> Site {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        Site {
            content_dir: base.join(&config.content_dir),
            public_dir: base.join(&config.public_dir),
            config,
            base_dir: base.to_path_buf(),
        }
    }

    #[test]
    fn test_generate_writes_artifacts() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("content/posts");
        fs::create_dir_all(&posts_dir).unwrap();
        write_post(
            &posts_dir,
            "hello.md",
            "---\ntitle: Hello\ndate: \"2024-01-15\"\ntags: [rust]\n---\n# Hi\n",
        );
        write_post(
            &posts_dir,
            "draft.md",
            "---\ntitle: Draft\npublished: false\n---\nbody\n",
        );

        let site = test_site(tmp.path());
        Generator::new(&site).generate().unwrap();

        let public = tmp.path().join("public");
        assert!(public.join("api/posts.json").exists());
        assert!(public.join("api/posts/hello.json").exists());
        assert!(public.join("api/tags.json").exists());
        assert!(public.join("api/site.json").exists());
        assert!(public.join("search.json").exists());
        assert!(public.join("sitemap.xml").exists());
        assert!(public.join("atom.xml").exists());

        // Unpublished posts stay out of every artifact
        assert!(!public.join("api/posts/draft.json").exists());
        let manifest = fs::read_to_string(public.join("api/posts.json")).unwrap();
        assert!(manifest.contains("Hello"));
        assert!(!manifest.contains("Draft"));

        let sitemap = fs::read_to_string(public.join("sitemap.xml")).unwrap();
        assert_eq!(sitemap.matches("<url>").count(), 5);
        assert!(sitemap.contains("<loc>https://example.com/blog/hello</loc>"));
    }

    #[test]
    fn test_post_bundle_contains_seo_sections() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("content/posts");
        fs::create_dir_all(&posts_dir).unwrap();
        write_post(
            &posts_dir,
            "hello.md",
            "---\ntitle: Hello\ndate: \"2024-01-15\"\n---\nBody\n",
        );

        let site = test_site(tmp.path());
        Generator::new(&site).generate().unwrap();

        let raw = fs::read_to_string(
            tmp.path().join("public/api/posts/hello.json"),
        )
        .unwrap();
        let bundle: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(bundle["post"]["slug"], "hello");
        assert_eq!(bundle["metadata"]["title"], "Hello");
        assert_eq!(bundle["structuredData"]["@type"], "BlogPosting");
    }

    #[test]
    fn test_feed_limit_respected() {
        let tmp = tempfile::tempdir().unwrap();
        let posts_dir = tmp.path().join("content/posts");
        fs::create_dir_all(&posts_dir).unwrap();
        for i in 0..5 {
            write_post(
                &posts_dir,
                &format!("post-{}.md", i),
                &format!("---\ntitle: Post {}\ndate: \"2024-01-0{}\"\n---\nbody\n", i, i + 1),
            );
        }

        let mut site = test_site(tmp.path());
        site.config.feed.limit = 2;
        Generator::new(&site).generate().unwrap();

        let feed = fs::read_to_string(tmp.path().join("public/atom.xml")).unwrap();
        assert_eq!(feed.matches("<entry>").count(), 2);
    }

    #[test]
    fn test_atom_timestamp() {
        assert_eq!(atom_timestamp("2024-01-15"), "2024-01-15T00:00:00Z");
        assert_eq!(atom_timestamp("invalid-date"), "invalid-date");
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>there</b></p>"), "Hello there");
    }

    #[test]
    fn test_convert_relative_urls() {
        let html = r#"<a href="/about">x</a> <img src="/img.png">"#;
        let out = convert_relative_urls_to_absolute(html, "https://example.com");
        assert!(out.contains(r#"href="https://example.com/about""#));
        assert!(out.contains(r#"src="https://example.com/img.png""#));
    }
}
