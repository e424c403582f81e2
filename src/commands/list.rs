//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::PostStore;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let store = PostStore::new(site);

    match content_type {
        "post" | "posts" => {
            let posts = store.all_posts();
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!("  {} - {} [{}]", post.date, post.title, post.slug);
            }
        }
        "tag" | "tags" => {
            let mut tags: HashMap<String, usize> = HashMap::new();
            for post in store.all_posts() {
                for tag in post.tags {
                    *tags.entry(tag).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}
