//! Configuration module

mod site;

pub use site::AuthorConfig;
pub use site::FeedConfig;
pub use site::HighlightConfig;
pub use site::SiteConfig;
pub use site::SitemapConfig;
