use serde::{Deserialize, Serialize};

use crate::domain::types::DEFAULT_PAGE_SIZE;

/// Pagination metadata reported by the backend alongside a page of contacts.
///
/// Values are never derived locally: they are replaced wholesale from each
/// successful response.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationInfo {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u32,
}

impl Default for PaginationInfo {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            total: 0,
            pages: 0,
        }
    }
}
