//! Byte ranges into the source document.

use std::ops::Range;

/// A half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Builds a one-character span from the 1-based line and byte column
    /// that `serde_json` reports.
    ///
    /// Column `0` (reported when an error follows a newline) maps to the
    /// start of the line. A column inside a multi-byte character snaps back
    /// to that character. Positions past the end are clamped to the end of
    /// the source, yielding an empty span there.
    ///
    /// ```
    /// # use taxograph_parser::Span;
    /// let src = "{\n  \"name\": 1x\n}";
    /// let span = Span::from_line_column(src, 2, 12);
    /// assert_eq!(&src[span.start()..span.end()], "x");
    /// ```
    pub fn from_line_column(source: &str, line: usize, column: usize) -> Self {
        let line_start = source
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum::<usize>()
            .min(source.len());

        let mut start = (line_start + column.saturating_sub(1)).min(source.len());
        while !source.is_char_boundary(start) {
            start -= 1;
        }

        let end = source[start..]
            .chars()
            .next()
            .map_or(start, |c| start + c.len_utf8());

        Self::new(start..end)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_new_orders_bounds() {
        let span = Span::new(5..3);
        assert_eq!(span.start(), 5);
        assert!(span.is_empty());
    }

    #[test]
    fn test_from_line_column_first_line() {
        let src = "abc";
        let span = Span::from_line_column(src, 1, 2);
        assert_eq!(span, Span::new(1..2));
    }

    #[test]
    fn test_from_line_column_column_zero() {
        let src = "a\nbc";
        let span = Span::from_line_column(src, 2, 0);
        assert_eq!(span, Span::new(2..3));
    }

    #[test]
    fn test_from_line_column_counts_bytes() {
        // "é" is two bytes, so `x` sits at byte column 14
        let src = "{\"name\": \"é\"x}";
        let span = Span::from_line_column(src, 1, 14);
        assert_eq!(&src[span.start()..span.end()], "x");
    }

    #[test]
    fn test_from_line_column_inside_char_snaps_back() {
        let src = "aé";
        let span = Span::from_line_column(src, 1, 3);
        assert_eq!(span, Span::new(1..3));
    }

    #[test]
    fn test_from_line_column_past_end_is_clamped() {
        let src = "{";
        let span = Span::from_line_column(src, 1, 5);
        assert_eq!(span, Span::new(1..1));
        assert_eq!(span.len(), 0);
    }
}
