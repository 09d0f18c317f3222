//! Byte-level scanning over template source.
//!
//! [`Cursor`] is an immutable snapshot of a scan position. Every operation
//! takes the cursor by value and returns a new one, so a failed match simply
//! leaves the caller holding the original position.

use crate::ast::Location;

/// Deepest nesting of brackets, prefix operators and chained binary
/// operators a cursor may enter.
pub const MAX_DEPTH: usize = 64;

/// A numeric literal in its lexical kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// Span of a numeric literal that could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedNumber {
    pub start: Location,
    pub end: Location,
}

#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    src: &'a [u8],
    offset: usize,
    line: usize,
    column: usize,
    depth: usize,
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

fn is_token_terminator(b: u8) -> bool {
    is_whitespace(b)
        || b < 0x20
        || matches!(
            b,
            b',' | b'(' | b')' | b'[' | b']' | b'{' | b'}' | b'<' | b'>' | b'#'
        )
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        Cursor {
            src,
            offset: 0,
            line: 1,
            column: 1,
            depth: 0,
        }
    }

    pub fn location(&self) -> Location {
        Location::new(self.offset, self.line, self.column)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// One level deeper, `None` past [`MAX_DEPTH`].
    pub fn enter(mut self) -> Option<Self> {
        if self.depth >= MAX_DEPTH {
            return None;
        }
        self.depth += 1;
        Some(self)
    }

    pub fn exit(mut self, levels: usize) -> Self {
        self.depth = self.depth.saturating_sub(levels);
        self
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.src.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.src.get(self.offset).copied()
    }

    fn peek_at(&self, n: usize) -> Option<u8> {
        self.src.get(self.offset + n).copied()
    }

    pub fn rest(&self) -> &'a [u8] {
        &self.src[self.offset.min(self.src.len())..]
    }

    /// Advance over `n` bytes, keeping line and column in sync.
    fn advance(mut self, n: usize) -> Self {
        let end = (self.offset + n).min(self.src.len());
        for &b in &self.src[self.offset..end] {
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = end;
        self
    }

    /// Skip whitespace and `#` comments.
    ///
    /// Stops at any other control byte so it surfaces as a parse error.
    pub fn skip_ignored(self) -> Self {
        let rest = self.rest();
        let mut i = 0;
        while i < rest.len() {
            match rest[i] {
                b if is_whitespace(b) => i += 1,
                b'#' => {
                    while i < rest.len() && rest[i] != b'\n' {
                        i += 1;
                    }
                }
                _ => break,
            }
        }
        self.advance(i)
    }

    pub fn match_literal(self, literal: &str) -> Option<Self> {
        if self.rest().starts_with(literal.as_bytes()) {
            Some(self.advance(literal.len()))
        } else {
            None
        }
    }

    /// Like [`Cursor::match_literal`] but refuses to split an identifier,
    /// `on` matches in `on User` and not in `one`.
    pub fn match_keyword(self, keyword: &str) -> Option<Self> {
        let next = self.match_literal(keyword)?;
        match next.peek() {
            Some(b) if is_ident_byte(b) => None,
            _ => Some(next),
        }
    }

    /// First literal that prefixes the input, in the given order.
    pub fn match_one_of(self, literals: &[&'static str]) -> Option<(Self, &'static str)> {
        literals
            .iter()
            .find_map(|literal| self.match_literal(literal).map(|next| (next, *literal)))
    }

    /// Bare token: everything up to whitespace, a comma, a bracket, `#` or a
    /// control byte.
    pub fn take_token(self) -> (Self, &'a [u8]) {
        let rest = self.rest();
        let len = rest
            .iter()
            .position(|&b| is_token_terminator(b))
            .unwrap_or(rest.len());
        (self.advance(len), &rest[..len])
    }

    pub fn take_identifier(self) -> (Self, &'a str) {
        let rest = self.rest();
        let len = match rest.first() {
            Some(&b) if is_ident_start(b) => rest
                .iter()
                .position(|&b| !is_ident_byte(b))
                .unwrap_or(rest.len()),
            _ => 0,
        };
        // Identifier bytes are ASCII.
        let ident = std::str::from_utf8(&rest[..len]).unwrap_or_default();
        (self.advance(len), ident)
    }

    /// Read a `"`-quoted string and return its raw content.
    ///
    /// A backslash escapes the byte after it. On a control byte or end of
    /// input the position of the failure is returned as the error.
    pub fn take_quoted_string(self) -> Result<(Self, &'a [u8]), Self> {
        let rest = self.rest();
        if rest.first() != Some(&b'"') {
            return Err(self);
        }
        let mut escaped = false;
        let mut i = 1;
        while i < rest.len() {
            let b = rest[i];
            if b < 0x20 {
                return Err(self.advance(i));
            }
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                return Ok((self.advance(i + 1), &rest[1..i]));
            }
            i += 1;
        }
        Err(self.advance(i))
    }

    /// Whether a numeric literal starts here, an optional sign included.
    pub fn at_number(&self) -> bool {
        match self.peek() {
            Some(b) if b.is_ascii_digit() => true,
            Some(b'-' | b'+') => self.peek_at(1).is_some_and(|b| b.is_ascii_digit()),
            _ => false,
        }
    }

    /// Read a signed integer or float.
    ///
    /// A fraction or exponent makes the literal a float. Missing digits after
    /// `.` or the exponent marker, integer overflow and trailing identifier
    /// bytes are reported as a span covering the whole bare token.
    pub fn take_number(self) -> Result<(Self, Number), MalformedNumber> {
        let rest = self.rest();
        let malformed = || MalformedNumber {
            start: self.location(),
            end: self.take_token().0.location(),
        };
        let digits_from = |mut i: usize| {
            while i < rest.len() && rest[i].is_ascii_digit() {
                i += 1;
            }
            i
        };

        let mut i = 0;
        if matches!(rest.first(), Some(b'-' | b'+')) {
            i += 1;
        }
        let end = digits_from(i);
        if end == i {
            return Err(malformed());
        }
        i = end;

        let mut float = false;
        if rest.get(i) == Some(&b'.') {
            let end = digits_from(i + 1);
            if end == i + 1 {
                return Err(malformed());
            }
            i = end;
            float = true;
        }
        if matches!(rest.get(i), Some(b'e' | b'E')) {
            let mut j = i + 1;
            if matches!(rest.get(j), Some(b'-' | b'+')) {
                j += 1;
            }
            let end = digits_from(j);
            if end == j {
                return Err(malformed());
            }
            i = end;
            float = true;
        }
        if rest.get(i).is_some_and(|&b| is_ident_byte(b) || b == b'.') {
            return Err(malformed());
        }

        let text = std::str::from_utf8(&rest[..i]).map_err(|_| malformed())?;
        let number = if float {
            Number::Float(text.parse().map_err(|_| malformed())?)
        } else {
            Number::Int(text.parse().map_err(|_| malformed())?)
        };
        Ok((self.advance(i), number))
    }

    /// Read a run of digits without sign, fraction or exponent.
    pub fn take_unsigned_int(self) -> Result<(Self, u64), MalformedNumber> {
        let rest = self.rest();
        let len = rest
            .iter()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(rest.len());
        let malformed = MalformedNumber {
            start: self.location(),
            end: self.take_token().0.location(),
        };
        if len == 0 || rest.get(len).is_some_and(|&b| is_ident_byte(b) || b == b'.') {
            return Err(malformed);
        }
        let text = std::str::from_utf8(&rest[..len]).map_err(|_| malformed)?;
        let value = text.parse().map_err(|_| malformed)?;
        Ok((self.advance(len), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_tracks_lines() {
        let cursor = Cursor::new(b"ab\ncd").advance(4);
        assert_eq!(cursor.location(), Location::new(4, 2, 2));
    }

    #[test]
    fn test_match_literal_is_atomic() {
        let cursor = Cursor::new(b"...x");
        assert!(cursor.match_literal("....").is_none());
        assert_eq!(cursor.match_literal("...").unwrap().offset(), 3);
    }

    #[test]
    fn test_enter_stops_at_max_depth() {
        let mut cursor = Cursor::new(b"");
        for _ in 0..MAX_DEPTH {
            cursor = cursor.enter().unwrap();
        }
        assert!(cursor.enter().is_none());
        assert_eq!(cursor.exit(MAX_DEPTH + 1).depth(), 0);
    }

    #[test]
    fn test_match_one_of_first_wins() {
        let (next, matched) = Cursor::new(b"<=3").match_one_of(&["<", "<="]).unwrap();
        assert_eq!(matched, "<");
        assert_eq!(next.offset(), 1);
    }
}
