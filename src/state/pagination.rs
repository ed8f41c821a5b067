//! Page bookkeeping over the scanned image list.

use std::ops::Range;

/// Direction for page navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Splits `len` items into fixed-size pages and tracks the current one.
///
/// The current page is always within `[0, page_count - 1]`.
#[derive(Debug, Clone)]
pub struct Paginator {
    len: usize,
    page_size: usize,
    current: usize,
}

impl Paginator {
    pub fn new(len: usize, page_size: usize) -> Self {
        Self {
            len,
            page_size: page_size.max(1),
            current: 0,
        }
    }

    /// Number of pages; at least one even for an empty list.
    pub fn page_count(&self) -> usize {
        self.len.div_ceil(self.page_size).max(1)
    }

    #[cfg(test)]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Index range of the current page into the full list.
    pub fn page_range(&self) -> Range<usize> {
        let start = (self.current * self.page_size).min(self.len);
        let end = (start + self.page_size).min(self.len);
        start..end
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.page_count()
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    /// Moves one page; returns false and stays put at either end.
    pub fn turn(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Next if self.has_next() => {
                self.current += 1;
                true
            }
            Direction::Previous if self.has_previous() => {
                self.current -= 1;
                true
            }
            _ => false,
        }
    }

    /// Human-readable "n/N" position.
    pub fn label(&self) -> String {
        format!("{}/{}", self.current + 1, self.page_count())
    }
}
