//! Pagination and response envelope utilities for FreeScout API responses.
//!
//! The core API wraps collections in a HAL envelope
//! (`{"_embedded": {"conversations": [...]}, "page": {...}}`), while the
//! knowledge base module answers with `{"success": true, "data": ...}`.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FreeScoutError, Result};

/// A page of results from the FreeScout API.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages (if known).
    pub total: Option<u64>,
    /// Current page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub per_page: u32,
    /// Total number of pages (if reported).
    pub total_pages: Option<u32>,
    /// Whether there are more pages.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a new page from items and pagination info.
    ///
    /// Without a reported page count the result is treated as the only page.
    #[must_use]
    pub fn new(
        items: Vec<T>,
        page: u32,
        per_page: u32,
        total: Option<u64>,
        total_pages: Option<u32>,
    ) -> Self {
        let has_more = !items.is_empty() && page < total_pages.unwrap_or(1);
        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
            has_more,
        }
    }

    /// An empty final page.
    #[must_use]
    pub fn empty(page: u32, per_page: u32) -> Self {
        Self::new(Vec::new(), page, per_page, Some(0), Some(0))
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
            has_more: self.has_more,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Page block of a HAL collection response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HalPageInfo {
    /// Items per page.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub size: u32,
    /// Items across all pages.
    #[serde(default)]
    pub total_elements: u64,
    /// Number of pages.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub total_pages: u32,
    /// Current page number.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub number: u32,
}

/// HAL collection envelope used by the core API.
#[derive(Debug, Deserialize)]
pub(crate) struct HalCollection {
    /// PHP encodes an empty map as `[]`, so this stays untyped.
    #[serde(rename = "_embedded", default)]
    embedded: Value,
    #[serde(default)]
    page: Option<HalPageInfo>,
}

impl HalCollection {
    /// Take the embedded collection stored under `key`.
    ///
    /// A missing key yields an empty list.
    pub(crate) fn take_items<T: DeserializeOwned>(&mut self, key: &str) -> Result<Vec<T>> {
        match self.embedded.get_mut(key).map(Value::take) {
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    /// Convert into a [`Page`], using the request's paging as a fallback.
    pub(crate) fn into_page<T: DeserializeOwned>(
        mut self,
        key: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<T>> {
        let items = self.take_items(key)?;
        Ok(match self.page {
            Some(info) => Page::new(
                items,
                if info.number > 0 { info.number } else { page },
                if info.size > 0 { info.size } else { per_page },
                Some(info.total_elements),
                Some(info.total_pages),
            ),
            None => Page::new(items, page, per_page, None, None),
        })
    }
}

/// Pagination block of a knowledge base list response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KbPagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub per_page: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub current_page: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub total_pages: u32,
}

/// `{"success": ..., "data": ...}` envelope of the knowledge base module.
#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub(crate) struct KbEnvelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub pagination: Option<KbPagination>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> KbEnvelope<T> {
    /// Unwrap `data`, treating `success: false` as unavailability.
    pub(crate) fn into_data(self) -> Result<(T, Option<KbPagination>)> {
        if self.success == Some(false) {
            let reason = match (self.error, self.message) {
                (Some(e), Some(m)) => format!("{e}: {m}"),
                (Some(e), None) => e,
                (None, Some(m)) => m,
                (None, None) => "request was not successful".to_string(),
            };
            return Err(FreeScoutError::KbUnavailable(reason));
        }

        match self.data {
            Some(data) => Ok((data, self.pagination)),
            None => Err(FreeScoutError::KbUnavailable(
                "response carried no data".to_string(),
            )),
        }
    }
}

/// Accept `5`, `5.0` and `"5"` for page counters.
///
/// The knowledge base module echoes query parameters back as strings and
/// computes page counts with floating point.
fn lenient_u32<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.ceil() as u64))
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| de::Error::custom(format!("invalid page counter: {n}"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid page counter: {s:?}"))),
        other => Err(de::Error::custom(format!("invalid page counter: {other}"))),
    }
}
