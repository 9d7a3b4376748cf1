//! YAML front matter.
//!
//! A document may open with a block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: Scheduler notes
//! date: 2024-01-01
//! tags: [systems, linux]
//! ---
//! # Body starts here
//! ```
//!
//! Parsing never fails: a missing closing delimiter or malformed YAML yields
//! empty front matter and the raw text as body.

use serde_yaml::{Mapping, Value};

const DELIMITER: &str = "---";

/// Metadata fields found in a front matter block.
///
/// Every field is optional; defaults are applied later by
/// [`PostMetadata`](crate::PostMetadata).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub excerpt: Option<String>,
    pub read_time: Option<String>,
}

/// Front matter plus the remaining markdown body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedDocument {
    pub front_matter: FrontMatter,
    pub body: String,
}

/// Front matter block that could not be interpreted.
#[derive(Debug, thiserror::Error)]
enum FrontMatterError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("front matter is not a mapping")]
    NotAMapping,
}

/// Split raw document text into front matter and body.
#[must_use]
pub fn parse_front_matter(raw: &str) -> ParsedDocument {
    let Some((block, body)) = split_block(raw) else {
        return ParsedDocument {
            front_matter: FrontMatter::default(),
            body: raw.to_owned(),
        };
    };

    match parse_block(block) {
        Ok(front_matter) => ParsedDocument {
            front_matter,
            body: body.to_owned(),
        },
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring malformed front matter");
            ParsedDocument {
                front_matter: FrontMatter::default(),
                body: raw.to_owned(),
            }
        }
    }
}

/// Locate the delimited block. Returns `(yaml, body)`.
fn split_block(raw: &str) -> Option<(&str, &str)> {
    let mut lines = raw.split_inclusive('\n');
    let opening = lines.next()?;
    if opening.trim_end() != DELIMITER {
        return None;
    }

    let mut offset = opening.len();
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Some((&raw[opening.len()..offset], &raw[offset + line.len()..]));
        }
        offset += line.len();
    }

    tracing::debug!("Front matter has no closing delimiter");
    None
}

fn parse_block(block: &str) -> Result<FrontMatter, FrontMatterError> {
    if block.trim().is_empty() {
        return Ok(FrontMatter::default());
    }

    let map = match serde_yaml::from_str::<Value>(block)? {
        Value::Mapping(map) => map,
        Value::Null => return Ok(FrontMatter::default()),
        _ => return Err(FrontMatterError::NotAMapping),
    };

    Ok(FrontMatter {
        title: string_field(&map, &["title"]),
        date: string_field(&map, &["date"]),
        tags: tags_field(&map),
        excerpt: string_field(&map, &["excerpt"]),
        read_time: string_field(&map, &["readTime", "read_time"]),
    })
}

/// First key present with a scalar value, as a string.
fn string_field(map: &Mapping, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find_map(scalar_string)
}

fn tags_field(map: &Mapping) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let values = match map.get("tags") {
        Some(Value::Sequence(seq)) => seq.iter().filter_map(scalar_string).collect(),
        Some(value) => scalar_string(value).into_iter().collect(),
        None => Vec::new(),
    };
    for tag in values {
        let tag = tag.trim().to_owned();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
