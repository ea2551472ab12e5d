//! Paging and filtering over an ordered collection.
//!
//! These functions are shared by every list in the UI so that the task and
//! script tabs page and scroll identically.

/// Rows available for list items once the fixed chrome is subtracted.
/// Never less than one.
pub fn page_size(terminal_height: u16, chrome_rows: u16) -> usize {
    usize::from(terminal_height.saturating_sub(chrome_rows)).max(1)
}

/// Items for which `predicate` holds, in their original order.
/// With no predicate every item is kept.
pub fn filter<'a, T, F>(items: &'a [T], predicate: Option<F>) -> Vec<&'a T>
where
    F: Fn(&T) -> bool,
{
    match predicate {
        Some(pred) => items.iter().filter(|item| pred(item)).collect(),
        None => items.iter().collect(),
    }
}

/// Number of pages needed for `count` items; an empty collection still has one page.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    count.div_ceil(page_size).max(1)
}

/// The slice shown on `page` and the total page count.
///
/// A page whose first row lies past the end yields an empty slice; callers
/// clamp the page index themselves.
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> (&[T], usize) {
    let page_size = page_size.max(1);
    let total = total_pages(items.len(), page_size);
    let start = page.saturating_mul(page_size);
    if start >= items.len() {
        return (&[], total);
    }
    let end = (start + page_size).min(items.len());
    (&items[start..end], total)
}

/// Clamp a cursor into `[0, visible - 1]`, or 0 for an empty page.
pub fn clamp_cursor(cursor: usize, visible: usize) -> usize {
    if visible == 0 { 0 } else { cursor.min(visible - 1) }
}

/// Rows on `page` for a collection of `count` items
pub fn visible_count(count: usize, page_size: usize, page: usize) -> usize {
    let page_size = page_size.max(1);
    count
        .saturating_sub(page.saturating_mul(page_size))
        .min(page_size)
}

/// Page and in-page cursor for one list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagePos {
    pub page: usize,
    pub cursor: usize,
}

impl PagePos {
    /// Index of the selected row within the (filtered) collection
    pub fn index(&self, page_size: usize) -> usize {
        self.page * page_size.max(1) + self.cursor
    }

    /// Position that selects row `index`
    pub fn at(index: usize, page_size: usize) -> Self {
        let ps = page_size.max(1);
        PagePos {
            page: index / ps,
            cursor: index % ps,
        }
    }

    pub fn reset(&mut self) {
        *self = PagePos::default();
    }

    /// Move up one row, rolling onto the end of the previous page at the top.
    pub fn move_up(&mut self, count: usize, page_size: usize) {
        if self.cursor > 0 {
            self.cursor -= 1;
        } else if self.page > 0 {
            self.page -= 1;
            self.cursor = page_size.max(1) - 1;
        }
        self.clamp(count, page_size);
    }

    /// Move down one row, rolling onto the start of the next page at the bottom.
    pub fn move_down(&mut self, count: usize, page_size: usize) {
        let visible = visible_count(count, page_size, self.page);
        if self.cursor + 1 < visible {
            self.cursor += 1;
        } else if self.page + 1 < total_pages(count, page_size) {
            self.page += 1;
            self.cursor = 0;
        }
        self.clamp(count, page_size);
    }

    /// Bring page and cursor back inside the collection after it shrank or
    /// the page size changed. A page that no longer exists falls back to the
    /// last page with the cursor on its last row.
    pub fn clamp(&mut self, count: usize, page_size: usize) {
        let last_page = total_pages(count, page_size) - 1;
        if self.page > last_page {
            self.page = last_page;
            self.cursor = usize::MAX;
        }
        self.cursor = clamp_cursor(self.cursor, visible_count(count, page_size, self.page));
    }
}
