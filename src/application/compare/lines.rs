//! Line splitting for comparison inputs.

use std::iter::Peekable;
use std::str::Split;

/// Lines of a text blob, split on `\n`. A `\r` directly before a `\n` is
/// removed; anywhere else it is content.
///
/// Clone before iterating to walk the same lines again.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    inner: Peekable<Split<'a, char>>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.inner.next()?;
        // Only the last segment has no `\n` after it.
        if self.inner.peek().is_none() {
            return Some(line);
        }
        Some(line.strip_suffix('\r').unwrap_or(line))
    }
}

/// Splits `text` into lines. Empty trailing lines are kept, so `"a\n"`
/// yields `["a", ""]` and `""` yields `[""]`.
pub fn split_lines(text: &str) -> Lines<'_> {
    Lines {
        inner: text.split('\n').peekable(),
    }
}

/// Number of items `split_lines` yields, without allocating.
pub fn count_lines(text: &str) -> usize {
    text.bytes().filter(|b| *b == b'\n').count() + 1
}

/// Lines as the alignment sees them: an empty blob has no lines at all.
pub(crate) fn diff_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    split_lines(text).collect()
}

/// Line count as the alignment sees it.
pub(crate) fn diff_line_count(text: &str) -> usize {
    if text.is_empty() { 0 } else { count_lines(text) }
}
