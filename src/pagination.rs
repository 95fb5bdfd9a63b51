use serde::Serialize;

use crate::domain::pagination::PaginationInfo;
use crate::domain::types::PAGE_SIZE_OPTIONS;

fn get_pages(
    total_pages: u32,
    current_page: u32,
    left_edge: u32,
    left_current: u32,
    right_current: u32,
    right_edge: u32,
) -> Vec<Option<u32>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page.saturating_add(1));
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current)
        .saturating_add(1)
        .min(last_page.saturating_add(1));

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Everything the pagination widget needs to render.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PaginationControl {
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
    pub total_items: u64,
    /// Page numbers to show; `None` marks a gap.
    pub pages: Vec<Option<u32>>,
    pub page_size_options: Vec<u32>,
    pub first_item: u64,
    pub last_item: u64,
    pub previous_page: Option<u32>,
    pub next_page: Option<u32>,
}

impl PaginationControl {
    pub fn new(info: &PaginationInfo) -> Self {
        // The backend's page is not trusted to lie within `1..=pages`.
        let current_page = info.page.clamp(1, info.pages.max(1));
        let pages = get_pages(info.pages, current_page, 2, 2, 4, 2);

        let (first_item, last_item) = if info.total == 0 {
            (0, 0)
        } else {
            let first = u64::from(current_page - 1) * u64::from(info.limit) + 1;
            let last = (u64::from(current_page) * u64::from(info.limit)).min(info.total);
            (first.min(info.total), last)
        };

        Self {
            current_page,
            total_pages: info.pages,
            page_size: info.limit,
            total_items: info.total,
            pages,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
            first_item,
            last_item,
            previous_page: (current_page > 1).then(|| current_page - 1),
            next_page: (current_page < info.pages).then(|| current_page + 1),
        }
    }

    /// The widget is only worth showing when there is more than one page.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }
}
