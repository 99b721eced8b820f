//! Search functionality.
//!
//! Case-insensitive literal search over a buffer's raw lines, plus the
//! result cursor used while stepping through matches.

use regex::RegexBuilder;

use crate::editor::Buffer;

/// One occurrence of the query: line index and character column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub line: usize,
    pub col: usize,
}

/// Find every case-insensitive occurrence of `query`, in document order.
///
/// Matches within a line do not overlap. An empty query matches nothing.
pub fn find_matches(buffer: &Buffer, query: &str) -> Vec<Match> {
    if query.is_empty() {
        return Vec::new();
    }
    let re = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(err) => {
            tracing::warn!(%err, "search pattern rejected");
            return Vec::new();
        }
    };

    buffer
        .lines()
        .enumerate()
        .flat_map(|(line, raw)| {
            re.find_iter(raw).map(move |m| Match {
                line,
                col: raw[..m.start()].chars().count(),
            })
        })
        .collect()
}

/// Matches being stepped through, with the position to return to on cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    matches: Vec<Match>,
    index: usize,
    origin: (usize, usize),
}

impl SearchResults {
    /// Start at the first match; `None` when there are no matches.
    pub fn new(matches: Vec<Match>, origin: (usize, usize)) -> Option<Self> {
        if matches.is_empty() {
            return None;
        }
        Some(Self {
            matches,
            index: 0,
            origin,
        })
    }

    pub fn current(&self) -> Match {
        self.matches[self.index]
    }

    /// Advance to the next match, wrapping to the first.
    pub fn next_match(&mut self) -> Match {
        self.index = (self.index + 1) % self.matches.len();
        self.current()
    }

    /// Step back to the previous match, wrapping to the last.
    pub fn prev_match(&mut self) -> Match {
        let len = self.matches.len();
        self.index = (self.index + len - 1) % len;
        self.current()
    }

    /// One-based index of the current match and the total count.
    pub fn progress(&self) -> (usize, usize) {
        (self.index + 1, self.matches.len())
    }

    /// Cursor position `(x, y)` before the search started.
    pub const fn origin(&self) -> (usize, usize) {
        self.origin
    }
}
