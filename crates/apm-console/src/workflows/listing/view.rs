use serde::Serialize;

use super::cursor::PageCursor;
use crate::domain::Page;

/// Issued when a fetch starts; presented back when its response arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub sequence: u64,
    pub page: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer fetch was issued after this one; the response was dropped.
    Stale,
}

/// Per-screen list state: the cursor, the rows on display and the sequence
/// bookkeeping that keeps out-of-order responses from overwriting newer ones.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    cursor: PageCursor,
    content: Vec<T>,
    issued: u64,
    applied: u64,
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self {
            cursor: PageCursor::default(),
            content: Vec::new(),
            issued: 0,
            applied: 0,
        }
    }
}

impl<T> ListView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Tags the fetch for `page`. The cursor stays put until that page is applied.
    pub fn begin(&mut self, page: u32) -> FetchTicket {
        self.issued += 1;
        FetchTicket {
            sequence: self.issued,
            page,
        }
    }

    /// Replaces content, total, page size and page number, but only for the newest
    /// ticket issued. Anything older is stale even if the newest fetch failed.
    pub fn apply(&mut self, ticket: FetchTicket, page: Page<T>) -> ApplyOutcome {
        if ticket.sequence != self.issued || ticket.sequence <= self.applied {
            return ApplyOutcome::Stale;
        }

        self.applied = ticket.sequence;
        self.cursor.page = ticket.page;
        self.content = page.content;
        self.cursor.total = page.total;
        self.cursor.page_size = page.page_size;
        ApplyOutcome::Applied
    }

    pub fn snapshot(&self) -> ListSnapshot<'_, T> {
        ListSnapshot {
            content: &self.content,
            page: self.cursor.page,
            page_size: self.cursor.page_size,
            total: self.cursor.total,
            has_prev: self.cursor.has_prev(),
            has_next: self.cursor.has_next(),
        }
    }
}

/// Serializable view of a list screen.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSnapshot<'a, T> {
    pub content: &'a [T],
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub has_prev: bool,
    pub has_next: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(rows: &[u32], total: u64) -> Page<u32> {
        Page {
            content: rows.to_vec(),
            total,
            page_size: 10,
        }
    }

    #[test]
    fn starts_empty_on_first_page() {
        let view: ListView<u32> = ListView::new();
        let snapshot = view.snapshot();
        assert_eq!(snapshot.page, 1);
        assert_eq!(snapshot.page_size, 10);
        assert_eq!(snapshot.total, 0);
        assert!(snapshot.content.is_empty());
        assert!(!snapshot.has_prev && !snapshot.has_next);
    }

    #[test]
    fn older_response_never_overwrites_newer() {
        let mut view = ListView::new();
        let first = view.begin(2);
        let second = view.begin(3);

        assert_eq!(view.apply(second, page(&[30, 31], 32)), ApplyOutcome::Applied);
        assert_eq!(view.apply(first, page(&[20, 21], 32)), ApplyOutcome::Stale);

        assert_eq!(view.content(), &[30, 31]);
        assert_eq!(view.cursor().page, 3);
    }

    #[test]
    fn sequential_fetches_both_apply() {
        let mut view = ListView::new();
        let first = view.begin(1);
        assert_eq!(view.apply(first, page(&[1], 12)), ApplyOutcome::Applied);

        let second = view.begin(2);
        assert_eq!(view.apply(second, page(&[11, 12], 12)), ApplyOutcome::Applied);
        assert_eq!(view.content(), &[11, 12]);
        assert!(view.snapshot().has_prev);
        assert!(!view.snapshot().has_next);
    }

    #[test]
    fn older_page_is_dropped_when_newest_never_lands() {
        let mut view = ListView::new();
        let first = view.begin(1);
        assert_eq!(view.apply(first, page(&[1, 2], 30)), ApplyOutcome::Applied);

        let older = view.begin(2);
        let _failed = view.begin(3);
        assert_eq!(view.apply(older, page(&[11, 12], 30)), ApplyOutcome::Stale);

        let snapshot = view.snapshot();
        assert_eq!(snapshot.page, 1);
        assert_eq!(snapshot.content, &[1, 2]);
        assert!(snapshot.has_next);
    }

    #[test]
    fn cursor_waits_for_the_page_to_arrive() {
        let mut view: ListView<u32> = ListView::new();
        view.begin(4);
        assert_eq!(view.cursor().page, 1);
    }

    #[test]
    fn same_ticket_cannot_apply_twice() {
        let mut view = ListView::new();
        let ticket = view.begin(1);
        assert_eq!(view.apply(ticket, page(&[1], 1)), ApplyOutcome::Applied);
        assert_eq!(view.apply(ticket, page(&[2], 1)), ApplyOutcome::Stale);
        assert_eq!(view.content(), &[1]);
    }
}
