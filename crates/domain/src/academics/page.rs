//! Paged listings

use serde::{Deserialize, Serialize};

/// One page of a server-side listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Total number of items across all pages
    #[serde(default)]
    pub total: u64,
    /// One-based page number
    #[serde(default = "default_page")]
    pub page: u32,
    /// Requested page size
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Returns an empty page for the given query.
    #[must_use]
    pub const fn empty(query: &PageQuery) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: query.page,
            page_size: query.page_size,
        }
    }

    /// Returns the number of pages needed to show every item.
    #[must_use]
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size))
    }

    /// Returns true if there is a page after this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.page_count()
    }
}

const fn default_page() -> u32 {
    1
}

const fn default_page_size() -> u32 {
    20
}

/// Paging and search parameters for listing endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// One-based page number
    pub page: u32,
    /// Items per page
    pub page_size: u32,
    /// Free-text filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl PageQuery {
    /// Creates a query for the given page.
    #[must_use]
    pub const fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            search: None,
        }
    }

    /// Adds a free-text filter.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(default_page(), default_page_size())
    }
}
