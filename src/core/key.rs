//! Parser for compact link keys
//!
//! A link key is a pipe-delimited list of `key=value` assignments, for example
//! `id=Person|templated=true`. A segment without `=` is a bare value and is
//! assigned to the reserved [`ID_KEY`], so `Person|templated=true` is the same
//! key as the one above.

use crate::core::error::ParseError;
use indexmap::IndexMap;

/// Reserved key receiving bare values
pub const ID_KEY: &str = "id";

/// Separator between segments
pub const SEGMENT_SEPARATOR: char = '|';

/// Separator between a key and its value
pub const PAIR_SEPARATOR: char = '=';

/// Parse a link key into an ordered map of trimmed key/value pairs
///
/// Empty segments and empty `=` sub-segments are dropped. The whole parse
/// fails on the first ambiguity; no partial map is ever returned.
///
/// # Examples
///
/// ```
/// use hypermedia::core::key::parse_key;
///
/// let parts = parse_key("id=Hello|key=value").unwrap();
/// assert_eq!(parts["id"], "Hello");
/// assert_eq!(parts["key"], "value");
///
/// assert!(parse_key("Hello|Id2").is_err());
/// ```
pub fn parse_key(raw: &str) -> Result<IndexMap<String, String>, ParseError> {
    let mut parts: IndexMap<String, String> = IndexMap::new();
    let mut id_from_bare_value = false;

    for segment in raw
        .split(SEGMENT_SEPARATOR)
        .filter(|segment| !segment.trim().is_empty())
    {
        let pieces: Vec<&str> = segment
            .split(PAIR_SEPARATOR)
            .filter(|piece| !piece.is_empty())
            .collect();

        let (key, value, bare) = match pieces.as_slice() {
            [] => continue,
            [value] => (ID_KEY, value.trim(), true),
            [key, value] => (key.trim(), value.trim(), false),
            _ => {
                return Err(ParseError::TooManyParts {
                    segment: segment.to_string(),
                });
            }
        };

        if key.is_empty() {
            return Err(ParseError::BlankKey {
                segment: segment.to_string(),
            });
        }

        if let Some(existing) = parts.get(key) {
            if key != ID_KEY {
                return Err(ParseError::DuplicateKey {
                    key: key.to_string(),
                });
            }
            // Two explicit `id=` assignments are a plain duplicate; any bare
            // value involved means the id was aliased.
            if !bare && !id_from_bare_value {
                return Err(ParseError::DuplicateIdKey {
                    key: key.to_string(),
                });
            }
            return Err(ParseError::MultipleIdValues {
                key: ID_KEY.to_string(),
                first: existing.clone(),
                second: value.to_string(),
            });
        }

        if key == ID_KEY {
            id_from_bare_value = bare;
        }
        parts.insert(key.to_string(), value.to_string());
    }

    if parts.is_empty() {
        return Err(ParseError::Empty);
    }

    Ok(parts)
}

/// Format parts back into a link key
///
/// Pairs are written in iteration order as `key=value`, joined by `|`.
pub fn format_key<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    parts
        .into_iter()
        .map(|(key, value)| format!("{}{}{}", key, PAIR_SEPARATOR, value))
        .collect::<Vec<_>>()
        .join(&SEGMENT_SEPARATOR.to_string())
}
