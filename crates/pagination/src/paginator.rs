//! Page assembly from fetched rows.
//!
//! The store executes the shape produced by [`RangeQuery`]; this module
//! turns the raw `page_size + 1` row window into a [`Page`]: strip the
//! sentinel, restore newest-first order for backward scans, compute both
//! continuation cursors and the has-more flags.

use crate::cursor::CursorKey;
use crate::page::{Page, PageItem};
use crate::query::{RangeQuery, ScanDirection};

/// Assemble one page from rows fetched for `query`.
///
/// `rows` must be exactly what the store returned: at most
/// `query.fetch_limit()` rows, ordered per `query.fetch_ascending()`.
pub fn assemble<T: PageItem>(query: &RangeQuery, mut rows: Vec<T>) -> Page<T> {
    let page_size = query.page_size().max(0) as usize;

    // The extra row is only a signal; it belongs to the next page.
    let has_sentinel = rows.len() > page_size;
    if has_sentinel {
        rows.truncate(page_size);
    }

    // Backward scans fetch ascending so the limit grabs the rows adjacent
    // to the anchor; redisplay newest-first like every other page.
    if query.fetch_ascending() {
        rows.reverse();
    }

    // Newest row begins the page, oldest row ends it. A client may scroll
    // either way from here, so both cursors are computed regardless of the
    // direction that produced this page.
    let next_backward_cursor = rows.first().map(|r| r.cursor_key().encode());
    let next_forward_key = rows.last().map(PageItem::cursor_key);
    let mut next_forward_cursor = next_forward_key.map(|k| k.encode());

    let anchored = query.anchor().is_some();
    let (mut has_more_history, has_more_new) = match query.direction() {
        // Forward with an anchor means the anchor row itself is newer than
        // this page; without one this is the freshest page there is.
        ScanDirection::Forward => (has_sentinel, anchored),
        ScanDirection::Backward => (true, has_sentinel),
    };

    if let ScanDirection::Forward = query.direction() {
        if degenerate_progress(query.anchor(), next_forward_key) {
            // A boundary row was re-fetched instead of advancing the cursor;
            // report end-of-history rather than looping forever.
            tracing::warn!(
                cursor = next_forward_cursor.as_deref().unwrap_or(""),
                "forward cursor failed to advance, forcing end of history"
            );
            has_more_history = false;
            next_forward_cursor = None;
        }
    }

    Page {
        records: rows,
        next_forward_cursor,
        next_backward_cursor,
        has_more_history,
        has_more_new,
        total: None,
    }
}

fn degenerate_progress(anchor: Option<CursorKey>, computed: Option<CursorKey>) -> bool {
    match (anchor, computed) {
        (Some(a), Some(c)) => a == c,
        _ => false,
    }
}
