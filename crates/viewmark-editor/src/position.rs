//! Line/column positions for reports.
//!
//! The core works in char offsets; people read `line:col`. All coordinates
//! here are **0-indexed**, with columns counting chars (not bytes), matching
//! how `ropey` indexes text. [`Display`](fmt::Display) converts to 1-indexed.

use std::fmt;

/// A position in a document: (line, column), both 0-indexed.
///
/// Ordered lexicographically: line first, then column.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// The origin: line 0, column 0.
    pub const ZERO: Self = Self { line: 0, col: 0 };

    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for human display, matching Vim's `line:col` status.
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_line_then_col() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(2, 1) < Position::new(2, 3));
        assert_eq!(Position::ZERO, Position::new(0, 0));
    }

    #[test]
    fn display_is_one_indexed() {
        assert_eq!(Position::new(0, 0).to_string(), "1:1");
        assert_eq!(Position::new(4, 11).to_string(), "5:12");
        assert_eq!(format!("{:?}", Position::new(4, 11)), "Pos(4:11)");
    }
}
