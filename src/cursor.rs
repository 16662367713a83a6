use nom::Parser;

use crate::Error;

/// Scan position over a location string.
///
/// Tracks the index of the next unread byte. Nodes never move the index themselves: they hand a nom
/// parser to [`run`](Self::run), which applies it to the unread input.
///
/// The cursor is `Copy` so an optional group can save and restore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor<'a> {
    text: &'a str,
    index: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at byte `index` of `text`. The caller guarantees that
    /// `index` lies on a char boundary.
    pub(crate) fn new(text: &'a str, index: usize) -> Self {
        Self { text, index }
    }

    /// The whole input, including the part already consumed.
    pub(crate) fn text(&self) -> &'a str {
        self.text
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    /// The input not consumed yet.
    pub(crate) fn rest(&self) -> &'a str {
        &self.text[self.index..]
    }

    /// Runs `parser` on the unread input. On success the cursor advances past
    /// the consumed input, on failure the index stays where it was.
    pub(crate) fn run<O, F>(&mut self, mut parser: F) -> Result<O, Error<&'a str, nom::error::Error<&'a str>>>
    where
        F: Parser<&'a str, Output = O, Error = Error<&'a str, nom::error::Error<&'a str>>>,
    {
        let (rest, output) = parser.parse(self.rest())?;
        self.index = self.text.len() - rest.len();
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::{bytes::complete::tag, character::complete::char};

    #[test]
    fn test_run_advances() {
        let mut cursor = Cursor::new("N12", 0);
        let c = cursor.run(char('N')).unwrap();
        assert_eq!(c, 'N');
        assert_eq!(cursor.index(), 1);
        assert_eq!(cursor.rest(), "12");
    }

    #[test]
    fn test_run_failure_keeps_index() {
        let mut cursor = Cursor::new("°12", 0);
        cursor.run(tag("°")).unwrap();

        let error = cursor.run(char('\'')).unwrap_err();
        assert_eq!(cursor.index(), "°".len());
        assert_eq!(error.offset_in(cursor.text()), "°".len());
    }
}
