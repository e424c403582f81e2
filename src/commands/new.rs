//! Create a new post

use anyhow::Result;
use std::fs;

use crate::Site;

/// Scaffold a new post file under the content directory
pub fn run(site: &Site, title: &str) -> Result<()> {
    let now = chrono::Local::now();

    fs::create_dir_all(&site.content_dir)?;

    let slug = slug::slugify(title);
    let file_path = site.content_dir.join(format!("{}.md", slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        "---\ntitle: {}\ndate: \"{}\"\ntags: []\npublished: true\n---\n\n",
        title,
        now.format("%Y-%m-%d")
    );

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}
