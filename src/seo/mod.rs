//! SEO metadata and structured-data generation
//!
//! Pure mapping functions over posts and the site configuration; no I/O
//! and nothing here can fail at runtime. Missing optional fields degrade
//! to omitted keys rather than errors.

mod metadata;
mod schema;

pub use metadata::{
    blog_post_metadata, canonical_url, page_metadata, BlogPostMetadata, PageMetadata,
};
pub use schema::{
    blog_post_structured_data, person_structured_data, website_structured_data,
};
