use std::ops::Range;

use crate::collection::{Listing, RenderFrame};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pagination {
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page_range(&self, len: usize) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(len);
        let end = (self.page * self.page_size).min(len);
        start..end
    }

    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DisplayState {
    Loading,
    Empty,
    Populated,
}

impl DisplayState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Empty => "empty",
            Self::Populated => "populated",
        }
    }
}

/// Filtered, sorted and paginated copy of an authoritative collection.
///
/// Rows remember their position in the authoritative collection; every sort
/// key falls back to that position on ties, so re-sorting the current rows
/// in place always agrees with a full re-derivation.
#[derive(Clone, Debug)]
pub struct DerivedView<T: Listing> {
    filter: T::Filter,
    sort: T::SortKey,
    pagination: Pagination,
    rows: Vec<(usize, T)>,
    derived: bool,
}

impl<T: Listing> DerivedView<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: T::Filter::default(),
            sort: T::SortKey::default(),
            pagination: Pagination::new(page_size),
            rows: Vec::new(),
            derived: false,
        }
    }

    pub fn filter(&self) -> &T::Filter {
        &self.filter
    }

    pub fn sort_key(&self) -> T::SortKey {
        self.sort
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn display(&self) -> DisplayState {
        if !self.derived {
            DisplayState::Loading
        } else if self.rows.is_empty() {
            DisplayState::Empty
        } else {
            DisplayState::Populated
        }
    }

    pub fn total_matching(&self) -> usize {
        self.rows.len()
    }

    /// Rebuilds the rows from `items` with the current filter and sort. The
    /// page is kept, clamped to the last page when rows disappeared.
    pub fn rederive(&mut self, items: &[T]) {
        self.rows = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.matches(&self.filter))
            .map(|(position, item)| (position, item.clone()))
            .collect();
        self.sort_rows();
        self.pagination.page = self
            .pagination
            .page
            .min(self.pagination.page_count(self.rows.len()));
        self.derived = true;
    }

    pub fn apply_filter(&mut self, filter: T::Filter, items: &[T]) {
        self.filter = filter;
        self.pagination.page = 1;
        self.rederive(items);
    }

    pub fn apply_sort(&mut self, key: T::SortKey) {
        self.sort = key;
        self.sort_rows();
    }

    /// Default filter and sort, first page.
    pub fn reset(&mut self, items: &[T]) {
        self.sort = T::SortKey::default();
        self.apply_filter(T::Filter::default(), items);
    }

    pub fn matching(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.rows.iter().map(|(_, item)| item)
    }

    pub fn visible_page(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        let range = self.pagination.page_range(self.rows.len());
        self.rows[range].iter().map(|(_, item)| item)
    }

    /// Everything from the first row through the end of the current page.
    pub fn visible_through_page(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        let end = self.pagination.page_range(self.rows.len()).end;
        self.rows[..end].iter().map(|(_, item)| item)
    }

    pub fn has_more(&self) -> bool {
        self.pagination.page_range(self.rows.len()).end < self.rows.len()
    }

    /// Advances one page; returns `false` without changes when the current
    /// page already reaches the end.
    pub fn load_more(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.pagination.page += 1;
        true
    }

    pub fn frame<E, S>(&self, entry: impl FnMut(&T) -> E, summary: S) -> RenderFrame<E, S> {
        RenderFrame {
            entries: self.visible_page().map(entry).collect(),
            total_matching: self.total_matching(),
            display: self.display(),
            pagination: self.pagination,
            has_more: self.has_more(),
            summary,
        }
    }

    fn sort_rows(&mut self) {
        let key = self.sort;
        self.rows.sort_by(|(left_position, left), (right_position, right)| {
            left.compare(right, key)
                .then_with(|| left_position.cmp(right_position))
        });
    }
}
