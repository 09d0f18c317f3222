use std::fmt;

/// A position in the template source.
///
/// `offset` counts bytes from the start of the input and starts at 0.
/// `line` and `column` start at 1; every byte advances the column, `\n`
/// advances the line instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Location {
            offset,
            line,
            column,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::new(0, 1, 1)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
