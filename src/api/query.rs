//! Query-string construction.
//!
//! Filters become query parameters here: `None` fields are omitted, values
//! are percent-encoded and datetimes go out as RFC 3339.

use chrono::{DateTime, Utc};

use crate::models::timestamp;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// `skip`/`limit` window accepted by every list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    pub fn first(limit: u32) -> Self {
        Self { skip: 0, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Ordered list of query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query holding only the page window.
    pub fn page(page: Page) -> Self {
        Self::new()
            .push("skip", page.skip)
            .push("limit", page.limit)
    }

    pub fn push(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Push `value` only when it is present.
    pub fn push_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    pub fn push_time(self, key: &str, value: Option<DateTime<Utc>>) -> Self {
        self.push_opt(key, value.map(|t| timestamp::format(&t)))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Look up the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Encoded `k=v&k=v` string without the leading `?`.
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Form-encode `fields` as `application/x-www-form-urlencoded`.
pub fn form_encode(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Percent-encode one path segment.
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_page_query() {
        let query = Query::page(Page::new(20, 10));
        assert_eq!(query.encode(), "skip=20&limit=10");
        assert_eq!(Page::default().limit, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_absent_values_are_omitted() {
        let query = Query::new()
            .push_opt("status", Some("active"))
            .push_opt::<&str>("severity", None)
            .push_time("start_date", None);
        assert_eq!(query.encode(), "status=active");
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let query = Query::new().push("performed_by", "Li Wei & Co");
        assert_eq!(query.encode(), "performed_by=Li%20Wei%20%26%20Co");
    }

    #[test]
    fn test_datetimes_are_rfc3339() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        let query = Query::new().push_time("start_time", Some(at));
        assert_eq!(query.get("start_time"), Some("2024-03-01T08:30:00Z"));
        assert_eq!(query.encode(), "start_time=2024-03-01T08%3A30%3A00Z");
    }

    #[test]
    fn test_form_encode() {
        assert_eq!(
            form_encode(&[("username", "op@mine"), ("password", "p&ss word")]),
            "username=op%40mine&password=p%26ss%20word"
        );
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("SN/42 A"), "SN%2F42%20A");
    }
}
