//! The TEXT segment: delimiter-separated acquisition metadata.

use alloc::string::String;
use alloc::vec::Vec;

/// Ordered key/value metadata parsed from a TEXT segment.
///
/// Keys are stored verbatim, including the `$` prefix marking standard
/// keywords, and compared case-sensitively. Insertion order is preserved;
/// assigning a key already present overwrites its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDictionary {
    entries: Vec<(String, String)>,
}

impl TextDictionary {
    /// Tokenize a TEXT segment into a dictionary.
    ///
    /// The first byte of the segment names the delimiter; the remaining
    /// bytes split on every occurrence of it into alternating key and value
    /// tokens. A trailing key with no value is dropped. Returns `None` for
    /// segments too short to hold a delimiter and any content.
    ///
    /// FCS 3.0 allows a doubled delimiter to stand for a literal delimiter
    /// character inside a token. That escape is intentionally not applied
    /// here: with delimiter `/`, `/k//ey/value/` tokenizes to
    /// `{"k": "", "ey": "value"}`, not `{"k/ey": "value"}`. Consumers of
    /// existing documents depend on this shape.
    pub fn parse(r: &[u8]) -> Option<TextDictionary> {
        let (delimiter, rest) = match r {
            [delimiter, rest @ ..] if !rest.is_empty() => (*delimiter, rest),
            _ => return None,
        };

        let mut dictionary = TextDictionary::default();

        let mut tokens = rest.split(|b| *b == delimiter);
        while let (Some(key), Some(value)) = (tokens.next(), tokens.next()) {
            dictionary.set(
                String::from_utf8_lossy(key).into_owned(),
                String::from_utf8_lossy(value).into_owned(),
            );
        }

        Some(dictionary)
    }

    /// Look up the value stored for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a key and parse its value as a decimal integer.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key)?.trim().parse().ok()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A key as presented to result consumers, with the `$` marking
    /// standard keywords stripped.
    pub fn display_key(key: &str) -> &str {
        key.strip_prefix('$').unwrap_or(key)
    }

    fn set(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }
}
