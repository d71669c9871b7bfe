//! Ordered page collection and its cursor.

use twilight_model::channel::message::embed::Embed;

use crate::embed::with_position_footer;
use crate::error::PaginationError;

/// Pages of a paged embed and the index of the one on screen.
///
/// The cursor is only kept in range by navigation. [`PageStore::set_pages`]
/// and [`PageStore::clear_pages`] leave it untouched, and an out-of-range
/// cursor simply renders nothing.
#[derive(Debug, Clone, Default)]
pub struct PageStore {
    pages: Vec<Embed>,
    cursor: usize,
}

impl PageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_page(&mut self, page: Embed) -> &mut Self {
        self.pages.push(page);
        self
    }

    pub fn add_pages(&mut self, pages: impl IntoIterator<Item = Embed>) -> &mut Self {
        self.pages.extend(pages);
        self
    }

    pub fn set_pages(&mut self, pages: Vec<Embed>) -> &mut Self {
        self.pages = pages;
        self
    }

    pub fn clear_pages(&mut self) -> &mut Self {
        self.pages.clear();
        self
    }

    pub fn pages(&self) -> &[Embed] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Zero-based index of the current page.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Advance one page, wrapping from the last page to the first.
    pub fn next_page(&mut self) {
        self.cursor = if self.cursor + 1 >= self.pages.len() {
            0
        } else {
            self.cursor + 1
        };
    }

    /// Go back one page, wrapping from the first page to the last.
    pub fn prev_page(&mut self) {
        self.cursor = match self.cursor {
            0 => self.pages.len().saturating_sub(1),
            cursor => cursor - 1,
        };
    }

    /// Jump to a one-based page number.
    ///
    /// # Errors
    ///
    /// [`PaginationError::OutOfRange`] when `page` is not in `1..=len`; the
    /// cursor is left where it was.
    pub fn page_to(&mut self, page: usize) -> Result<(), PaginationError> {
        if page == 0 || page > self.pages.len() {
            return Err(PaginationError::OutOfRange {
                page,
                total: self.pages.len(),
            });
        }

        self.cursor = page - 1;
        Ok(())
    }

    pub fn current(&self) -> Option<&Embed> {
        self.pages.get(self.cursor)
    }

    /// The current page with its `"<n>/<total>"` footer, if there is one.
    pub fn render_current(&self) -> Option<Embed> {
        self.current()
            .map(|page| with_position_footer(page, self.cursor, self.pages.len()))
    }
}
