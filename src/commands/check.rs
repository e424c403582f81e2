//! Validate post frontmatter across the content directory
//!
//! The loader itself normalizes permissively; this command is the
//! opt-in hard gate. It reports every failing file and exits non-zero
//! when anything fails, without stopping at the first problem.

use anyhow::Result;
use serde_yaml::Value;
use std::fs;

use crate::content::{self, PostStore};
use crate::Site;

/// Check every content file against the frontmatter validator
pub fn run(site: &Site) -> Result<()> {
    let store = PostStore::new(site);
    let slugs = store.list_slugs();

    if slugs.is_empty() {
        println!("No content found in {:?}", site.content_dir);
        return Ok(());
    }

    let mut failures = 0usize;
    for slug in &slugs {
        let Some(path) = store.source_path(slug) else {
            continue;
        };
        let raw = fs::read_to_string(&path)?;

        match content::parse(&raw) {
            Err(e) => {
                failures += 1;
                println!("  FAIL {}: {}", slug, e);
            }
            Ok((data, _)) => {
                if content::validate(&Value::Mapping(data)) {
                    println!("  ok   {}", slug);
                } else {
                    failures += 1;
                    println!("  FAIL {}: frontmatter failed validation", slug);
                }
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} files failed validation", failures, slugs.len());
    }

    println!("All {} files passed.", slugs.len());
    Ok(())
}
