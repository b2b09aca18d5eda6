//! Pagination window and filter expression parameters
//!
//! `QueryParams` is an immutable value object: continuation never mutates an
//! existing window, it derives a new one.

use std::collections::BTreeMap;

/// Maximum page size accepted by the remote API, and the default `limit`
pub const MAX_LIST_LIMIT: u64 = 100;

/// Pagination window plus arbitrary pass-through query options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    limit: u64,
    offset: u64,
    extra: BTreeMap<String, String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            limit: MAX_LIST_LIMIT,
            offset: 0,
            extra: BTreeMap::new(),
        }
    }
}

impl QueryParams {
    /// Create a window with the default limit and offset
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a window with a different limit
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Derive a window with a different offset
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Derive a window with an extra pass-through query option
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The window for the next page: identical to this one except the offset
    /// advances by the maximum page size.
    pub fn next_page(&self) -> Self {
        let mut next = self.clone();
        next.offset = self.offset + MAX_LIST_LIMIT;
        next
    }

    /// Render as query-string pairs
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("limit".to_string(), self.limit.to_string()),
            ("offset".to_string(), self.offset.to_string()),
        ];
        for (k, v) in &self.extra {
            query.push((k.clone(), v.clone()));
        }
        query
    }
}

/// An opaque filter expression, passed through verbatim as the `filter`
/// query parameter.
///
/// The expression syntax belongs to the remote API (`key=value` terms joined
/// with `;`); this type does not interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpr(String);

impl FilterExpr {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Join `key=value` terms into one expression
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = terms
            .into_iter()
            .map(|t| t.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(";");
        Self(joined)
    }

    pub fn raw(&self) -> &str {
        &self.0
    }
}
