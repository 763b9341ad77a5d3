//! # Listing Queries
//!
//! A [`Query`] selects rows with the record's filter, orders them by the
//! record's sort key and optionally cuts a window out of the result. The
//! total number of matching rows is always reported alongside the window so
//! callers can compute page counts.

/// Sort direction applied to [`Record::sort_key`](crate::Record::sort_key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// A window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub offset: usize,
    pub limit: usize,
}

impl Range {
    /// Window for a 1-based page number. Page 0 is treated as page 1; pages
    /// past the end of `usize` give an empty window.
    pub fn page(page: usize, limit: usize) -> Self {
        Self {
            offset: page.saturating_sub(1).saturating_mul(limit),
            limit,
        }
    }

    pub fn first(limit: usize) -> Self {
        Self { offset: 0, limit }
    }
}

#[derive(Debug, Clone)]
pub struct Query<F> {
    pub filter: F,
    pub direction: Direction,
    pub range: Option<Range>,
}

impl<F> Query<F> {
    pub fn new(filter: F) -> Self {
        Self {
            filter,
            direction: Direction::Ascending,
            range: None,
        }
    }

    pub fn descending(mut self) -> Self {
        self.direction = Direction::Descending;
        self
    }

    pub fn range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    pub fn page(self, page: usize, limit: usize) -> Self {
        self.range(Range::page(page, limit))
    }

    pub fn limit(self, limit: usize) -> Self {
        self.range(Range::first(limit))
    }
}

/// One window of a listing plus the exact count of matching rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// `ceil(total / limit)`; zero when either side is zero.
pub fn total_pages(total: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}
