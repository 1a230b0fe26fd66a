//! Offset-based row scanning.
//!
//! Rows end at `\r\n` only.  A file using bare `\n` comes back as a single
//! row; that is an accepted limitation of the log format, not something we
//! paper over here.

/// Row terminator of the log format.
pub const ROW_TERMINATOR: &str = "\r\n";

/// Return the row starting at `offset` and the offset just past its
/// terminator.
///
/// Returns `None` once `offset` reaches the end of `text`, or when `offset`
/// does not fall on a char boundary.  The last row does not need a
/// terminator; in that case the returned offset is `text.len()`.
pub fn next_row(text: &str, offset: usize) -> Option<(&str, usize)> {
    if offset >= text.len() || !text.is_char_boundary(offset) {
        return None;
    }
    let rest = &text[offset..];
    match rest.find(ROW_TERMINATOR) {
        Some(end) => Some((&rest[..end], offset + end + ROW_TERMINATOR.len())),
        None => Some((rest, text.len())),
    }
}

/// Iterator over the rows of `text`, built on [`next_row`].
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Rows<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }
}

impl<'a> Iterator for Rows<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let (row, next) = next_row(self.text, self.offset)?;
        self.offset = next;
        Some(row)
    }
}
