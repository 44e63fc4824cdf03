//! Route storage and matching.
//!
//! A [`RouteTable`] maps `method:pattern` keys to handlers and keeps a second,
//! length-ordered list of the same keys. A request is first looked up
//! verbatim; failing that, the list is scanned longest key first and the
//! first key that is a literal prefix of the request wins.

use std::collections::HashMap;

use parking_lot::RwLock;
use thiserror::Error;

use crate::key::{RouteKey, SEPARATOR};

/// A registration that breaks the table's contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRoute {
    #[error("empty route pattern")]
    EmptyPattern,

    #[error("empty method token")]
    EmptyMethod,

    /// The method token contains the key separator
    #[error("method token `{0}` contains `:`")]
    MethodSeparator(Box<str>),
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The key was new
    Inserted,
    /// The key existed and its handler was overwritten
    Replaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Prefix,
}

#[derive(Debug, Clone)]
pub struct RouteEntry<H> {
    key: RouteKey,
    handler: H,
}

impl<H> RouteEntry<H> {
    pub fn key(&self) -> &RouteKey {
        &self.key
    }

    /// Method token used at registration (`*` for catch-all routes).
    pub fn method(&self) -> &str {
        self.key.method()
    }

    /// The pattern as registered.
    pub fn route(&self) -> &str {
        self.key.pattern()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }
}

#[derive(Debug, Clone)]
pub struct RouteMatch<H> {
    pub entry: RouteEntry<H>,
    pub kind: MatchKind,
}

pub struct RouteTable<H> {
    inner: RwLock<TableInner<H>>,
}

struct TableInner<H> {
    routes: HashMap<RouteKey, RouteEntry<H>>,

    // Same keys as `routes`, ordered by non-increasing length. Keys of equal
    // length stay in registration order.
    priority: Vec<RouteKey>,
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(TableInner {
                routes: HashMap::new(),
                priority: Vec::new(),
            }),
        }
    }

    /// Registers `handler` under `method:pattern`, overwriting any handler
    /// already stored for that key.
    pub fn register(
        &self,
        method: &str,
        pattern: &str,
        handler: H,
    ) -> Result<Registration, InvalidRoute> {
        if pattern.is_empty() {
            return Err(InvalidRoute::EmptyPattern);
        }
        if method.is_empty() {
            return Err(InvalidRoute::EmptyMethod);
        }
        if method.contains(SEPARATOR) {
            return Err(InvalidRoute::MethodSeparator(method.into()));
        }

        let key = RouteKey::new(method, pattern);
        let mut inner = self.inner.write();

        let entry = RouteEntry {
            key: key.clone(),
            handler,
        };
        if inner.routes.insert(key.clone(), entry).is_some() {
            tracing::debug!(%key, "replaced route handler");
            return Ok(Registration::Replaced);
        }

        let resorted = inner.push_priority(key.clone());
        tracing::debug!(%key, resorted, routes = inner.routes.len(), "registered route");
        Ok(Registration::Inserted)
    }

    /// Finds the entry serving `method` on `path`.
    ///
    /// An exact `method:path` entry always wins. Otherwise the longest key
    /// that is a literal prefix of the request is chosen, catch-all keys being
    /// compared against `*:path`.
    pub fn lookup(&self, method: &str, path: &str) -> Option<RouteMatch<H>>
    where
        H: Clone,
    {
        let inner = self.inner.read();

        let exact = format!("{}{}{}", method, SEPARATOR, path);
        if let Some(entry) = inner.routes.get(exact.as_str()) {
            tracing::trace!(key = %entry.key, "exact route match");
            return Some(RouteMatch {
                entry: entry.clone(),
                kind: MatchKind::Exact,
            });
        }

        let key = inner
            .priority
            .iter()
            .find(|key| key.is_prefix_of(method, path))?;
        tracing::trace!(%key, request = %exact, "prefix route match");

        inner.routes.get(key).map(|entry| RouteMatch {
            entry: entry.clone(),
            kind: MatchKind::Prefix,
        })
    }

    /// Handler serving `method` on `path`, or `None` when nothing matches.
    pub fn resolve(&self, method: &str, path: &str) -> Option<H>
    where
        H: Clone,
    {
        self.lookup(method, path).map(|found| found.entry.into_handler())
    }

    /// Entry registered under exactly `method:pattern`.
    pub fn get(&self, method: &str, pattern: &str) -> Option<RouteEntry<H>>
    where
        H: Clone,
    {
        let key = format!("{}{}{}", method, SEPARATOR, pattern);
        self.inner.read().routes.get(key.as_str()).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the keys in the order prefix matches are tried.
    pub fn priority(&self) -> Vec<RouteKey> {
        self.inner.read().priority.clone()
    }

    /// Snapshot of every entry, in priority order.
    pub fn entries(&self) -> Vec<RouteEntry<H>>
    where
        H: Clone,
    {
        let inner = self.inner.read();
        inner
            .priority
            .iter()
            .filter_map(|key| inner.routes.get(key).cloned())
            .collect()
    }
}

impl<H> TableInner<H> {
    /// Appends a new key, re-sorting only when it is longer than its
    /// predecessor. Returns whether a sort happened.
    fn push_priority(&mut self, key: RouteKey) -> bool {
        self.priority.push(key);

        let n = self.priority.len();
        if n < 2 || self.priority[n - 1].len() <= self.priority[n - 2].len() {
            return false;
        }

        // Stable, so equal lengths keep registration order
        self.priority.sort_by(|a, b| b.len().cmp(&a.len()));
        true
    }
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> std::fmt::Debug for RouteTable<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.inner.read().priority.iter()).finish()
    }
}
