//! Composite `method:pattern` keys and the method tokens they are built from.

use std::{
    borrow::Borrow,
    fmt::{self, Debug, Display},
    hash::{Hash, Hasher},
};

pub const GET: &str = "GET";
pub const PUT: &str = "PUT";
pub const POST: &str = "POST";
pub const DELETE: &str = "DELETE";
pub const OPTIONS: &str = "OPTIONS";

/// Method token of routes registered for every method.
pub const WILDCARD: &str = "*";

/// Joins the method token and the pattern inside a key.
pub const SEPARATOR: char = ':';

/// Identity of a registered route, eg. `GET:/items` or `*:/`.
///
/// Equality, hashing and borrowing all go through the composite string, so a
/// table keyed by `RouteKey` can be probed with a plain `&str`.
#[derive(Clone)]
pub struct RouteKey {
    key: Box<str>,
    method_len: usize,
}

impl RouteKey {
    pub(crate) fn new(method: &str, pattern: &str) -> Self {
        Self {
            key: format!("{}{}{}", method, SEPARATOR, pattern).into_boxed_str(),
            method_len: method.len(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn method(&self) -> &str {
        &self.key[..self.method_len]
    }

    pub fn pattern(&self) -> &str {
        &self.key[self.method_len + SEPARATOR.len_utf8()..]
    }

    /// Length of the composite string. Priority among prefix matches is
    /// decided by this value alone.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.key.len()
    }

    pub fn is_wildcard(&self) -> bool {
        self.method() == WILDCARD
    }

    /// Whether this key is a literal prefix of `method:path`.
    ///
    /// Wildcard keys compare against `*:path` instead. Method tokens never
    /// contain the separator, which makes this the same test as
    /// `format!("{method}:{path}").starts_with(self.as_str())`.
    pub fn is_prefix_of(&self, method: &str, path: &str) -> bool {
        let method = if self.is_wildcard() { WILDCARD } else { method };
        self.method() == method && path.starts_with(self.pattern())
    }
}

impl PartialEq for RouteKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for RouteKey {}

impl Hash for RouteKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with `str`'s hash for the `Borrow<str>` lookups
        self.key.hash(state)
    }
}

impl Borrow<str> for RouteKey {
    fn borrow(&self) -> &str {
        &self.key
    }
}

impl AsRef<str> for RouteKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

impl Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl Debug for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.key, f)
    }
}

impl PartialEq<str> for RouteKey {
    fn eq(&self, other: &str) -> bool {
        &*self.key == other
    }
}

impl PartialEq<&str> for RouteKey {
    fn eq(&self, other: &&str) -> bool {
        &*self.key == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_method_and_pattern() {
        let key = RouteKey::new(GET, "/items");
        assert_eq!(key.as_str(), "GET:/items");
        assert_eq!(key.method(), "GET");
        assert_eq!(key.pattern(), "/items");
        assert_eq!(key.len(), 10);
        assert!(!key.is_wildcard());

        let key = RouteKey::new(WILDCARD, "/");
        assert_eq!(key, "*:/");
        assert_eq!(key.pattern(), "/");
        assert!(key.is_wildcard());
    }

    #[test]
    fn pattern_may_contain_separator() {
        let key = RouteKey::new(PUT, "/a:b");
        assert_eq!(key.method(), "PUT");
        assert_eq!(key.pattern(), "/a:b");
    }

    #[test]
    fn prefix_is_literal_not_segment_aware() {
        let key = RouteKey::new(GET, "/a");
        assert!(key.is_prefix_of(GET, "/a"));
        assert!(key.is_prefix_of(GET, "/ab"));
        assert!(key.is_prefix_of(GET, "/a/b"));
        assert!(!key.is_prefix_of(GET, "/b"));
        assert!(!key.is_prefix_of(POST, "/a"));
    }

    #[test]
    fn wildcard_prefix_ignores_request_method() {
        let key = RouteKey::new(WILDCARD, "/a");
        assert!(key.is_prefix_of(GET, "/a/b"));
        assert!(key.is_prefix_of("PATCH", "/abc"));
        assert!(!key.is_prefix_of(GET, "/"));
    }

    #[test]
    fn prefix_agrees_with_string_prefix() {
        let keys = [
            RouteKey::new(GET, "/"),
            RouteKey::new(DELETE, "/x/y"),
            RouteKey::new(OPTIONS, "/x"),
        ];
        let requests = [(GET, "/x"), (DELETE, "/x/yz"), (OPTIONS, "/"), (GET, "")];

        for key in &keys {
            for (method, path) in requests {
                let joined = format!("{}:{}", method, path);
                assert_eq!(
                    key.is_prefix_of(method, path),
                    joined.starts_with(key.as_str()),
                    "{} against {}",
                    key,
                    joined
                );
            }
        }
    }
}
