//! Pagination arguments and window computation
//!
//! Two modes are supported. Cursor arguments (`first`, `after`, `last`,
//! `before`) take precedence; otherwise `skip` and `limit` select an offset
//! window. Cursors are opaque base64 strings encoding an absolute index into
//! the filtered, sorted result.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::warn;

const CURSOR_PREFIX: &str = "arrayconnection:";

/// Pagination arguments of a connection query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationArgs {
    pub first: Option<usize>,
    pub after: Option<String>,
    pub last: Option<usize>,
    pub before: Option<String>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

impl PaginationArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first(mut self, n: usize) -> Self {
        self.first = Some(n);
        self
    }

    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    pub fn last(mut self, n: usize) -> Self {
        self.last = Some(n);
        self
    }

    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    pub fn skip(mut self, n: usize) -> Self {
        self.skip = Some(n);
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Returns true if any cursor argument is present
    pub fn is_cursor_based(&self) -> bool {
        self.first.is_some() || self.after.is_some() || self.last.is_some() || self.before.is_some()
    }
}

/// Encodes an absolute result index as a cursor
pub fn encode_cursor(index: usize) -> String {
    STANDARD.encode(format!("{}{}", CURSOR_PREFIX, index))
}

/// Decodes a cursor produced by [`encode_cursor`]
pub fn decode_cursor(cursor: &str) -> Option<usize> {
    let bytes = STANDARD.decode(cursor).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    text.strip_prefix(CURSOR_PREFIX)?.parse().ok()
}

fn decode_or_warn(cursor: Option<&str>, argument: &'static str) -> Option<usize> {
    let cursor = cursor?;
    let index = decode_cursor(cursor);
    if index.is_none() {
        warn!(event = "INVALID_CURSOR", argument, cursor, "ignoring undecodable cursor");
    }
    index
}

/// A half-open slice `[start, end)` of a result of `total` items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl Window {
    /// Computes the window selected by `args` over `total` items.
    ///
    /// Invalid cursors are ignored. The window is always within bounds and
    /// never inverted.
    pub fn compute(total: usize, args: &PaginationArgs) -> Self {
        if !args.is_cursor_based() {
            let start = args.skip.unwrap_or(0).min(total);
            let end = match args.limit {
                Some(limit) => start.saturating_add(limit).min(total),
                None => total,
            };
            return Self { start, end, total };
        }

        let mut start = 0;
        let mut end = total;

        if let Some(index) = decode_or_warn(args.after.as_deref(), "after") {
            start = index.saturating_add(1).min(total);
        }
        if let Some(index) = decode_or_warn(args.before.as_deref(), "before") {
            end = index.min(end);
        }
        end = end.max(start);

        if let Some(first) = args.first {
            end = end.min(start.saturating_add(first));
        }
        if let Some(last) = args.last {
            start = start.max(end.saturating_sub(last));
        }

        Self { start, end, total }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn has_previous(&self) -> bool {
        self.start > 0
    }

    pub fn has_next(&self) -> bool {
        self.end < self.total
    }
}
