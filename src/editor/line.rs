/// Width of a tab stop in screen columns.
pub const TAB_STOP: usize = 4;

/// Expand tabs in `raw` to spaces, padding each tab out to the next tab stop.
///
/// A tab always emits at least one space, even when the column is already
/// on a stop boundary.
pub fn render(raw: &str) -> String {
    let mut rendered = String::with_capacity(raw.len());
    let mut col = 0;
    for ch in raw.chars() {
        if ch == '\t' {
            let next_stop = next_tab_stop(col);
            rendered.extend(std::iter::repeat_n(' ', next_stop - col));
            col = next_stop;
        } else {
            rendered.push(ch);
            col += 1;
        }
    }
    rendered
}

/// Screen column of the character at index `x` in `raw`.
///
/// Uses the same tab rule as [`render`], so `screen_col(raw, len)` equals the
/// rendered length. Indices past the end are treated as the end.
pub fn screen_col(raw: &str, x: usize) -> usize {
    raw.chars().take(x).fold(0, |col, ch| {
        if ch == '\t' {
            next_tab_stop(col)
        } else {
            col + 1
        }
    })
}

const fn next_tab_stop(col: usize) -> usize {
    (col / TAB_STOP + 1) * TAB_STOP
}

/// A single text row.
///
/// `raw` is the authoritative content; `rendered` is derived from it by
/// [`render`] on every write and is never edited directly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    raw: String,
    rendered: String,
}

impl Line {
    /// Create a line from its raw content.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let rendered = render(&raw);
        Self { raw, rendered }
    }

    /// The raw content.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The tab-expanded content used for display.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// Replace the raw content and re-render.
    pub fn set_raw(&mut self, raw: impl Into<String>) {
        self.raw = raw.into();
        self.rendered = render(&self.raw);
    }

    /// Length of the raw content in characters.
    pub fn len(&self) -> usize {
        self.raw.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Byte offset of character index `x`, or `None` past the end.
    pub(crate) fn byte_index(&self, x: usize) -> Option<usize> {
        if x == 0 {
            return Some(0);
        }
        self.raw
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(self.raw.len()))
            .nth(x)
    }
}
