//! Documentation tags.
//!
//! Tags are documentation lines that configure generation, for example:
//!
//! ```text
//! // @microgen middleware, logging, grpc
//! // @force:grpc-server,logging
//! ```
//!
//! Each line is a marker, a key, and an optional argument list separated by
//! commas or whitespace (a `:` may introduce the list). Lines without the
//! marker are ordinary documentation and are ignored.

use indexmap::IndexMap;

const COMMENT_PREFIX: &str = "//";
const TAG_PREFIX: char = '@';

/// Marks the interface kitgen operates on; arguments select generator categories.
pub const MAIN_TAG: &str = "microgen";

/// Names categories whose artifacts are regenerated even if they already exist.
pub const FORCE_TAG: &str = "force";

/// Parsed documentation tags: key to argument list, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    entries: IndexMap<String, Vec<String>>,
}

impl Tags {
    /// Parse tags from raw documentation lines.
    ///
    /// Repeated keys accumulate their arguments.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut entries: IndexMap<String, Vec<String>> = IndexMap::new();
        for line in lines {
            if let Some((key, args)) = parse_line(line.as_ref()) {
                entries.entry(key).or_default().extend(args);
            }
        }
        Self { entries }
    }

    /// Check if a tag key is present.
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Arguments of a tag, empty if the tag is absent.
    pub fn args(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Check if the tag `key` carries the argument `arg`.
    pub fn contains(&self, key: &str, arg: &str) -> bool {
        self.args(key).iter().any(|a| a == arg)
    }

    /// Check if the tag `key` carries any of the given arguments.
    pub fn contains_any(&self, key: &str, args: &[&str]) -> bool {
        args.iter().any(|arg| self.contains(key, arg))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all tags in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

fn parse_line(line: &str) -> Option<(String, Vec<String>)> {
    let line = line.trim_start();
    // Accept both `// @key` and an already stripped `@key`.
    let rest = match line.strip_prefix(COMMENT_PREFIX) {
        Some(rest) => rest.trim_start(),
        None => line,
    };
    let body = rest.strip_prefix(TAG_PREFIX)?;

    let key_end = body
        .find(|c: char| c.is_whitespace() || c == ':')
        .unwrap_or(body.len());
    let key = &body[..key_end];
    if key.is_empty() {
        return None;
    }

    let tail = body[key_end..].trim_start();
    let tail = tail.strip_prefix(':').unwrap_or(tail);
    let args = tail
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect();

    Some((key.to_string(), args))
}
