use serde::{Serialize, Serializer};

/// At most this many numbered buttons are shown around the current page
pub const MAX_PAGE_BUTTONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Number(usize),
    Gap,
}

impl Serialize for PageLink {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PageLink::Number(n) => serializer.serialize_u64(*n as u64),
            PageLink::Gap => serializer.serialize_str("..."),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
    pub links: Vec<PageLink>,
}

/// Slices one page out of `items`; `page` is 1-based and clamped.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(items.len());
    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        total_pages,
        total: items.len(),
        links: page_links(page, total_pages),
    }
}

/// Numbered buttons around `current`, always reaching the first and last
/// page, with gaps where pages are skipped.
pub fn page_links(current: usize, total_pages: usize) -> Vec<PageLink> {
    if total_pages == 0 {
        return Vec::new();
    }
    let mut start = current.saturating_sub(MAX_PAGE_BUTTONS / 2).max(1);
    let end = total_pages.min(start + MAX_PAGE_BUTTONS - 1);
    if end + 1 - start < MAX_PAGE_BUTTONS {
        start = (end + 1).saturating_sub(MAX_PAGE_BUTTONS).max(1);
    }

    let mut links = Vec::with_capacity(MAX_PAGE_BUTTONS + 4);
    if start > 1 {
        links.push(PageLink::Number(1));
        if start > 2 {
            links.push(PageLink::Gap);
        }
    }
    links.extend((start..=end).map(PageLink::Number));
    if end < total_pages {
        if end + 1 < total_pages {
            links.push(PageLink::Gap);
        }
        links.push(PageLink::Number(total_pages));
    }
    links
}
