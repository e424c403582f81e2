//! Frontmatter parsing and validation

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use thiserror::Error;

use crate::helpers::date::parse_date_string;

/// Errors produced while splitting frontmatter from a content file.
///
/// Malformed YAML inside a delimited block is fatal for that file; the
/// post loader decides whether to skip the file or abort.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("invalid YAML frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split YAML frontmatter from body content.
///
/// Returns the decoded key/value mapping and the remaining body. A file
/// without an opening `---` delimiter yields an empty mapping and the
/// original text unchanged, as does an opening delimiter that is never
/// closed. An empty block (only delimiters) yields an empty mapping.
pub fn parse(raw: &str) -> Result<(Mapping, &str), FrontMatterError> {
    let Some(rest) = raw.strip_prefix("---") else {
        return Ok((Mapping::new(), raw));
    };

    let Some(end_pos) = rest.find("\n---") else {
        return Ok((Mapping::new(), raw));
    };

    let block = &rest[..end_pos];
    let body = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

    if block.trim().is_empty() {
        return Ok((Mapping::new(), body));
    }

    let data: Mapping = serde_yaml::from_str(block)?;
    Ok((data, body))
}

/// Decide whether a decoded value is acceptable as post metadata.
///
/// A pure predicate: true only for a mapping with a non-empty `title`
/// string, a `date` (if present) that is a string parsing to a real
/// calendar date, and `tags` (if present) that is a sequence of strings.
/// Invalid input never errors, it is simply rejected.
pub fn validate(value: &Value) -> bool {
    let Some(map) = value.as_mapping() else {
        return false;
    };

    let title_ok = map
        .get("title")
        .and_then(Value::as_str)
        .map(|s| !s.trim().is_empty())
        .unwrap_or(false);
    if !title_ok {
        return false;
    }

    if let Some(date) = map.get("date") {
        match date.as_str() {
            Some(s) if parse_date_string(s).is_some() => {}
            _ => return false,
        }
    }

    if let Some(tags) = map.get("tags") {
        match tags.as_sequence() {
            Some(seq) if seq.iter().all(Value::is_string) => {}
            _ => return false,
        }
    }

    true
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Typed view of the frontmatter keys a post recognizes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostFrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub excerpt: Option<String>,
    pub summary: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    /// Posts are published unless explicitly marked otherwise
    #[serde(default = "default_published")]
    pub published: bool,
    pub author: Option<String>,
    #[serde(rename = "coverImage")]
    pub cover_image: Option<String>,
    pub category: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

fn default_published() -> bool {
    true
}

impl Default for PostFrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            date: None,
            excerpt: None,
            summary: None,
            tags: Vec::new(),
            published: true,
            author: None,
            cover_image: None,
            category: None,
            extra: HashMap::new(),
        }
    }
}

impl PostFrontMatter {
    /// Parse the typed frontmatter along with the body content
    pub fn parse(raw: &str) -> Result<(Self, &str), FrontMatterError> {
        let (data, body) = parse(raw)?;
        let fm: PostFrontMatter = serde_yaml::from_value(Value::Mapping(data))?;
        Ok((fm, body))
    }

    /// Excerpt with the `summary` fallback applied
    pub fn excerpt_or_summary(&self) -> String {
        self.excerpt
            .clone()
            .or_else(|| self.summary.clone())
            .unwrap_or_default()
    }
}
