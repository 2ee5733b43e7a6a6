//! Paged window over the product collection.
//!
//! The window is a start index into the collection. Forward steps and jumps
//! land on page boundaries. Navigation wraps at both ends: advancing past the
//! last page goes back to the first, and stepping back from the first page
//! shows the last `PAGE_SIZE` items, starting at `len - PAGE_SIZE`.

use std::ops::Range;

/// Products shown per page
pub const PAGE_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageWindow {
    start_index: usize,
    len: usize,
}

impl PageWindow {
    /// Window at the first page of a collection of `len` items
    pub fn new(len: usize) -> Self {
        Self { start_index: 0, len }
    }

    /// Point the window at a replaced collection, back on the first page
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.start_index = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// `ceil(len / PAGE_SIZE)`
    pub fn total_pages(&self) -> usize {
        self.len.div_ceil(PAGE_SIZE)
    }

    /// 1-based page number for display
    pub fn current_page(&self) -> usize {
        self.start_index / PAGE_SIZE + 1
    }

    /// Indices of the items on the current page
    pub fn visible_range(&self) -> Range<usize> {
        self.start_index..(self.start_index + PAGE_SIZE).min(self.len)
    }

    /// Whether stepping back would move anywhere without wrapping
    pub fn can_previous(&self) -> bool {
        self.start_index != 0
    }

    /// Whether a further page exists after the current one
    pub fn can_next(&self) -> bool {
        self.start_index + PAGE_SIZE < self.len
    }

    /// Advance one page, wrapping to the first page after the last
    pub fn next(&mut self) {
        self.start_index = if self.start_index + PAGE_SIZE >= self.len {
            0
        } else {
            self.start_index + PAGE_SIZE
        };
    }

    /// Step back one page. From the first page, wrap to the final
    /// `PAGE_SIZE` items (0 for collections no longer than a page).
    pub fn previous(&mut self) {
        self.start_index = if self.start_index < PAGE_SIZE {
            self.len.saturating_sub(PAGE_SIZE)
        } else {
            self.start_index - PAGE_SIZE
        };
    }

    /// Jump to a 0-based page. Pages past the end clamp to the last page.
    pub fn jump_to_page(&mut self, page: usize) {
        let total = self.total_pages();
        if total == 0 {
            return;
        }
        self.start_index = page.min(total - 1) * PAGE_SIZE;
    }
}
