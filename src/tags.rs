//! Series identity and tag canonicalization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The identity of one series: a metric name plus its tags sorted by key.
///
/// Two keys compare equal exactly when their names are equal and their tag
/// sets contain the same key/value pairs, regardless of the order in which
/// the tags were supplied. The name and tags are kept as separate fields so
/// that no combination of characters in a name, key or value can make two
/// different series collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesKey {
    name: String,
    tags: Vec<(String, String)>,
}

impl SeriesKey {
    /// Builds the canonical key for `name` and `tags`.
    ///
    /// Equivalent to [`canonicalize`].
    pub fn new<I, K, V>(name: &str, tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        canonicalize(name, tags)
    }

    /// Returns the metric name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the tag pairs, sorted by key.
    pub fn tags(&self) -> &[(String, String)] {
        &self.tags
    }

    /// Encodes the key as a flat byte string.
    ///
    /// Every string is preceded by its length as a little-endian `u64`, and
    /// the tag pairs are preceded by their count, so the encoding is
    /// injective: distinct keys never produce the same bytes.
    pub fn encode(&self) -> Vec<u8> {
        let tag_bytes: usize = self.tags.iter().map(|(k, v)| k.len() + v.len() + 16).sum();
        let mut out = Vec::with_capacity(self.name.len() + tag_bytes + 16);

        write_str(&mut out, &self.name);
        out.extend_from_slice(&(self.tags.len() as u64).to_le_bytes());
        for (key, value) in &self.tags {
            write_str(&mut out, key);
            write_str(&mut out, value);
        }
        out
    }
}

fn write_str(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(&(s.len() as u64).to_le_bytes());
    out.extend_from_slice(s.as_bytes());
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.tags.is_empty() {
            return Ok(());
        }
        f.write_str("{")?;
        for (i, (key, value)) in self.tags.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}={value:?}")?;
        }
        f.write_str("}")
    }
}

/// Turns a metric name and a tag set into a [`SeriesKey`].
///
/// Tags may be given as any iterator of key/value pairs: a `&HashMap`, a
/// `&BTreeMap`, or an array of `(&str, &str)`. If the same key appears more
/// than once, the last value wins, matching map insertion.
///
/// # Example
///
/// ```rust
/// use memseries::canonicalize;
///
/// let a = canonicalize("cpu", [("host", "a"), ("region", "us")]);
/// let b = canonicalize("cpu", [("region", "us"), ("host", "a")]);
/// assert_eq!(a, b);
/// ```
pub fn canonicalize<I, K, V>(name: &str, tags: I) -> SeriesKey
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let sorted: BTreeMap<String, String> = tags
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_owned(), v.as_ref().to_owned()))
        .collect();

    SeriesKey {
        name: name.to_owned(),
        tags: sorted.into_iter().collect(),
    }
}
