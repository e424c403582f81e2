//! URL helper functions

use crate::config::SiteConfig;

/// Join a path onto the site's base URL, avoiding double slashes
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/about/") // -> "https://example.com/about/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.base_url();
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Percent-encode a path segment for use inside a URL
pub fn encode_url(segment: &str) -> String {
    percent_encoding::utf8_percent_encode(segment, percent_encoding::NON_ALPHANUMERIC).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com/".to_string();
        config
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/about/"),
            "https://example.com/about/"
        );
        assert_eq!(
            full_url_for(&config, "blog/post"),
            "https://example.com/blog/post"
        );
        assert_eq!(full_url_for(&config, ""), "https://example.com/");
    }

    #[test]
    fn test_encode_url() {
        assert_eq!(encode_url("rust lang"), "rust%20lang");
        assert_eq!(encode_url("c++"), "c%2B%2B");
    }
}
