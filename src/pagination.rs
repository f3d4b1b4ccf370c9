//! Client-side list pipeline shared by every list screen.
//!
//! A screen keeps one [`ListQueryState`]; [`paginate`] turns the fetched
//! items plus that state into a [`Page`]: free-text search, then
//! categorical filters, then a page window. The function is pure so a caller
//! can memoize it on `(items, state)`.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::dto::envelope::PaginationMeta;

/// Rows per page when a screen does not choose its own size.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => panic!("page size must be positive"),
};

/// Filter value meaning "no filtering on this field".
pub const ALL_FILTER: &str = "all";

/// Read access the pipeline needs from a list row.
pub trait ListItem {
    /// Field values matched by the search box (OR across fields).
    fn search_fields(&self) -> Vec<&str>;

    /// Value of the named categorical field, `None` when the row lacks it.
    fn category(&self, name: &str) -> Option<&str>;
}

impl<T: ListItem + ?Sized> ListItem for &T {
    fn search_fields(&self) -> Vec<&str> {
        (**self).search_fields()
    }

    fn category(&self, name: &str) -> Option<&str> {
        (**self).category(name)
    }
}

/// Mutable UI state behind a list screen.
///
/// Changing the search text or any filter resets the page to 1 so a page
/// index from the previous result set never reaches the next computation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredListQueryState")]
pub struct ListQueryState {
    search_text: String,
    filters: BTreeMap<String, String>,
    current_page: usize,
    page_size: NonZeroUsize,
}

/// Serialized form of [`ListQueryState`], checked on the way in.
#[derive(Deserialize)]
struct StoredListQueryState {
    #[serde(default)]
    search_text: String,
    #[serde(default)]
    filters: BTreeMap<String, String>,
    #[serde(default)]
    current_page: usize,
    #[serde(default = "default_page_size")]
    page_size: NonZeroUsize,
}

fn default_page_size() -> NonZeroUsize {
    DEFAULT_PAGE_SIZE
}

impl From<StoredListQueryState> for ListQueryState {
    fn from(stored: StoredListQueryState) -> Self {
        let mut state = Self::new(stored.page_size);
        state.search_text = stored.search_text;
        for (name, value) in stored.filters {
            state.set_filter(name, value);
        }
        state.set_page(stored.current_page);
        state
    }
}

impl Default for ListQueryState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListQueryState {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            search_text: String::new(),
            filters: BTreeMap::new(),
            current_page: 1,
            page_size,
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Trimmed search text, `None` when it is blank.
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search_text.trim();
        (!term.is_empty()).then_some(term)
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.search_text {
            self.search_text = text;
            self.current_page = 1;
        }
    }

    /// Selects a filter value; blank or [`ALL_FILTER`] clears the filter.
    pub fn set_filter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        let value = value.trim();

        let changed = if value.is_empty() || value == ALL_FILTER {
            self.filters.remove(&name).is_some()
        } else {
            self.filters.insert(name, value.to_string()).as_deref() != Some(value)
        };

        if changed {
            self.current_page = 1;
        }
    }

    pub fn clear_filter(&mut self, name: &str) {
        if self.filters.remove(name).is_some() {
            self.current_page = 1;
        }
    }

    /// Drops search text and every filter.
    pub fn reset(&mut self) {
        self.search_text.clear();
        self.filters.clear();
        self.current_page = 1;
    }

    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(String::as_str)
    }

    /// Filters that take part in the AND chain, ordered by name.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Moves to `page`; zero is treated as the first page.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        if page_size != self.page_size {
            self.page_size = page_size;
            self.current_page = 1;
        }
    }
}

/// Row predicate composed from a [`ListQueryState`].
#[derive(Clone, Debug)]
pub struct FilterPredicate<'s> {
    needle: Option<String>,
    filters: Vec<(&'s str, &'s str)>,
}

impl<'s> FilterPredicate<'s> {
    pub fn new(state: &'s ListQueryState) -> Self {
        Self {
            needle: state.search_term().map(str::to_lowercase),
            filters: state.active_filters().collect(),
        }
    }

    /// True when the predicate lets every row through.
    pub fn is_identity(&self) -> bool {
        self.needle.is_none() && self.filters.is_empty()
    }

    pub fn matches<T: ListItem + ?Sized>(&self, item: &T) -> bool {
        let search_ok = match &self.needle {
            None => true,
            Some(needle) => item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())),
        };

        search_ok
            && self
                .filters
                .iter()
                .all(|(name, value)| item.category(name) == Some(*value))
    }
}

/// Derived, read-only view of one page of a list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    /// Builds a page from a window that was already cut by the backend.
    pub fn from_server(items: Vec<T>, meta: &PaginationMeta, state: &ListQueryState) -> Self {
        let page_size = if meta.page_size > 0 {
            meta.page_size
        } else {
            state.page_size()
        };
        let total_pages = if meta.total_pages > 0 || meta.total_count == 0 {
            meta.total_pages
        } else {
            meta.total_count.div_ceil(page_size)
        };

        Self {
            items,
            total_items: meta.total_count,
            total_pages,
            current_page: meta.page.max(1),
            page_size,
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1 && self.total_pages > 0
    }

    /// Page numbers for the paginator strip, `None` marking a gap.
    pub fn links(&self) -> Vec<Option<usize>> {
        get_pages(self.total_pages, self.current_page, 2, 2, 4, 2)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_items: self.total_items,
            total_pages: self.total_pages,
            current_page: self.current_page,
            page_size: self.page_size,
        }
    }
}

impl<T: Clone> Page<&T> {
    pub fn cloned(self) -> Page<T> {
        self.map(Clone::clone)
    }
}

/// Applies search, filters and the page window in that order.
///
/// Rows keep the order they arrived in. A `current_page` past the last page
/// is not corrected here; it simply yields no rows.
pub fn paginate<'a, T: ListItem>(items: &'a [T], state: &ListQueryState) -> Page<&'a T> {
    let predicate = FilterPredicate::new(state);
    let filtered: Vec<&T> = items.iter().filter(|item| predicate.matches(*item)).collect();

    let page_size = state.page_size();
    let total_items = filtered.len();
    let total_pages = total_items.div_ceil(page_size);
    let current_page = state.current_page();

    let items = if total_pages == 0 {
        Vec::new()
    } else {
        filtered
            .into_iter()
            .skip(current_page.saturating_sub(1).saturating_mul(page_size))
            .take(page_size)
            .collect()
    };

    Page {
        items,
        total_items,
        total_pages,
        current_page,
        page_size,
    }
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }
    let current_page = current_page.clamp(1, last_page);

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current + 1)
        .min(last_page + 1);

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

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row {
        name: &'static str,
        status: &'static str,
    }

    impl ListItem for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name]
        }

        fn category(&self, name: &str) -> Option<&str> {
            (name == "status").then_some(self.status)
        }
    }

    #[test]
    fn set_filter_all_clears_the_filter() {
        let mut state = ListQueryState::default();
        state.set_filter("status", "open");
        assert_eq!(state.filter("status"), Some("open"));

        state.set_page(4);
        state.set_filter("status", ALL_FILTER);
        assert_eq!(state.filter("status"), None);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn unchanged_input_keeps_the_page() {
        let mut state = ListQueryState::default();
        state.set_search_text("lobby");
        state.set_filter("status", "open");
        state.set_page(3);

        state.set_search_text("lobby");
        state.set_filter("status", "open");
        state.clear_filter("priority");
        assert_eq!(state.current_page(), 3);
    }

    #[test]
    fn page_zero_is_first_page() {
        let mut state = ListQueryState::default();
        state.set_page(0);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn page_past_the_end_is_empty_not_clamped() {
        let rows = vec![
            Row { name: "a", status: "open" },
            Row { name: "b", status: "open" },
        ];
        let mut state = ListQueryState::new(NonZeroUsize::new(1).unwrap());
        state.set_page(5);

        let page = paginate(&rows, &state);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 5);
        assert!(page.items.is_empty());
    }

    #[test]
    fn missing_category_fails_the_filter() {
        let rows = vec![Row { name: "a", status: "open" }];
        let mut state = ListQueryState::default();
        state.set_filter("department", "security");

        assert_eq!(paginate(&rows, &state).total_items, 0);
    }

    #[test]
    fn stored_state_with_page_zero_starts_on_first_page() {
        let state: ListQueryState = serde_json::from_str(
            r#"{"search_text":"","filters":{"status":"all"},"current_page":0,"page_size":10}"#,
        )
        .unwrap();
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.filter("status"), None);

        let rows = vec![Row { name: "a", status: "open" }];
        let page = paginate(&rows, &state);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn links_keep_the_last_page_when_past_the_end() {
        let page = Page::<()> {
            items: Vec::new(),
            total_items: 30,
            total_pages: 3,
            current_page: 100,
            page_size: 10,
        };
        assert_eq!(page.links(), vec![Some(1), Some(2), Some(3)]);

        let page = Page::<()> {
            current_page: usize::MAX,
            ..page
        };
        assert_eq!(page.links(), vec![Some(1), Some(2), Some(3)]);
        assert_eq!(
            get_pages(5, usize::MAX, 2, 2, 4, 2),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5)]
        );
    }

    #[test]
    fn links_collapse_long_ranges() {
        assert_eq!(get_pages(0, 1, 2, 2, 4, 2), vec![]);
        assert_eq!(
            get_pages(3, 1, 2, 2, 4, 2),
            vec![Some(1), Some(2), Some(3)]
        );
        assert_eq!(
            get_pages(20, 10, 2, 2, 4, 2),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20)
            ]
        );
    }

    #[test]
    fn server_page_uses_backend_totals() {
        let meta = PaginationMeta {
            page: 2,
            page_size: 25,
            total_count: 60,
            total_pages: 0,
            has_next: true,
            has_prev: true,
        };
        let page = Page::from_server(vec![1, 2, 3], &meta, &ListQueryState::default());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.page_size, 25);
        assert!(page.has_next());
    }
}
