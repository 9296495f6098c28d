//! Indentation-driven hierarchy reading.
//!
//! Both input formats encode nesting by the number of leading spaces on a
//! line; any other leading whitespace is rejected. [`IndentStack`] keeps the chain of open ancestors: a new line pops
//! every entry whose depth is greater than or equal to its own, so equal
//! indentation yields siblings, and the entry left on top is the parent.

use crate::error::{IndentChar, IndentJump};

/// A non-blank input line split into depth and content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndentedLine<'a> {
    /// 1-based line number in the input.
    pub number: usize,
    /// Count of leading spaces.
    pub depth: usize,
    /// Line content with surrounding whitespace removed.
    pub content: &'a str,
}

/// Iterate over the non-blank lines of `input`.
///
/// Yields an error for a line whose indentation holds anything but spaces.
pub fn indented_lines(input: &str) -> impl Iterator<Item = Result<IndentedLine<'_>, IndentChar>> {
    input.lines().enumerate().filter_map(|(idx, raw)| {
        let content = raw.trim();
        if content.is_empty() {
            return None;
        }
        let number = idx + 1;
        let body = raw.trim_start();
        let indent = &raw[..raw.len() - body.len()];
        if let Some(found) = indent.chars().find(|c| *c != ' ') {
            return Some(Err(IndentChar { line: number, found }));
        }
        Some(Ok(IndentedLine {
            number,
            depth: indent.len(),
            content,
        }))
    })
}

/// Stack of open ancestors keyed by indentation depth.
#[derive(Debug)]
pub struct IndentStack<T> {
    entries: Vec<(usize, T)>,
    previous: Option<usize>,
}

impl<T> IndentStack<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            previous: None,
        }
    }

    /// Resolve the parent for a line at `depth`.
    ///
    /// Returns `Ok(None)` when the line attaches to the virtual root. Fails
    /// when the line is more than one level deeper than the previous line.
    pub fn parent_for(&mut self, line: usize, depth: usize) -> Result<Option<&T>, IndentJump> {
        let previous = self.previous.map(|d| d as isize).unwrap_or(-1);
        if depth as isize > previous + 1 {
            return Err(IndentJump {
                line,
                depth,
                previous,
            });
        }
        while matches!(self.entries.last(), Some((top, _)) if *top >= depth) {
            self.entries.pop();
        }
        Ok(self.entries.last().map(|(_, item)| item))
    }

    /// Open `item` at `depth`; it becomes the candidate parent of deeper lines.
    pub fn push(&mut self, depth: usize, item: T) {
        self.entries.push((depth, item));
        self.previous = Some(depth);
    }
}

impl<T> Default for IndentStack<T> {
    fn default() -> Self {
        Self::new()
    }
}
