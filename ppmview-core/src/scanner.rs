//! Token scanning over an immutable text buffer.
//!
//! A [`Cursor`] is a plain value: scanning never mutates it in place but
//! returns the advanced cursor next to the token it found. Snapshots taken
//! with [`Cursor::position`] can be turned back into cursors at any time
//! because the underlying [`TextBuffer`] never changes.

use alloc::{boxed::Box, vec::Vec};
use heapless::Vec as WordBuf;

const COMMENT_START: u8 = b'#';

/// A word token of at most `N` captured bytes.
pub type Word<const N: usize> = WordBuf<u8, N>;

/// The loaded file contents.
///
/// The logical end of the text is the end of the data or the first NUL byte,
/// whichever comes first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBuffer {
    data: Box<[u8]>,
}

impl TextBuffer {
    #[must_use]
    pub fn new(mut data: Vec<u8>) -> Self {
        if let Some(nul) = data.iter().position(|&b| b == 0) {
            data.truncate(nul);
        }

        Self {
            data: data.into_boxed_slice(),
        }
    }

    #[must_use]
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// A cursor at the start of the buffer.
    #[must_use]
    #[inline]
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.data)
    }

    /// A cursor at `position`, clamped to the end of the buffer.
    #[must_use]
    #[inline]
    pub fn cursor_at(&self, position: usize) -> Cursor<'_> {
        Cursor::at(&self.data, position)
    }
}

impl From<&[u8]> for TextBuffer {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::from(text.as_bytes())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    #[must_use]
    pub fn at(data: &'a [u8], position: usize) -> Self {
        Self {
            data,
            pos: position.min(data.len()),
        }
    }

    #[must_use]
    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Skips from a comment start up to, but not including, the next line
    /// break or the end of the buffer.
    fn skip_comment(mut self) -> Self {
        while let Some(c) = self.peek() {
            if c == b'\n' || c == b'\r' {
                break;
            }
            self.pos += 1;
        }
        self
    }

    /// Reads the next word token.
    ///
    /// Consumes a run of ASCII alphanumerics, skipping any comment met on the
    /// way. The scan stops at the first other character, so a cursor sitting
    /// on whitespace yields `None` without moving. Bytes past the capacity
    /// `N` are consumed but dropped.
    #[must_use]
    pub fn next_word<const N: usize>(self) -> (Self, Option<Word<N>>) {
        let mut cursor = self;
        let mut word = Word::<N>::new();
        let mut read = 0_usize;

        while let Some(c) = cursor.peek() {
            if c.is_ascii_alphanumeric() {
                // full buffer: keep consuming, stop capturing
                word.push(c).ok();
                read += 1;
                cursor.pos += 1;
            } else if c == COMMENT_START {
                cursor = cursor.skip_comment();
            } else {
                break;
            }
        }

        (cursor, (read > 0).then_some(word))
    }

    /// Reads the next decimal integer token.
    ///
    /// Every byte that is neither a digit nor a comment start is skipped.
    /// Returns `None` once the end of the buffer is reached without finding a
    /// digit. Values too large for `i64` saturate.
    #[must_use]
    pub fn next_integer(self) -> (Self, Option<i64>) {
        let mut cursor = self;

        while let Some(c) = cursor.peek() {
            if c.is_ascii_digit() {
                return cursor.parse_digits();
            } else if c == COMMENT_START {
                cursor = cursor.skip_comment();
            } else {
                cursor.pos += 1;
            }
        }

        (cursor, None)
    }

    fn parse_digits(mut self) -> (Self, Option<i64>) {
        let mut value = 0_i64;

        while let Some(c) = self.peek().filter(u8::is_ascii_digit) {
            value = value
                .saturating_mul(10)
                .saturating_add(i64::from(c - b'0'));
            self.pos += 1;
        }

        (self, Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integers(text: &str) -> Vec<i64> {
        let buffer = TextBuffer::from(text);
        let mut cursor = buffer.cursor();
        let mut out = Vec::new();

        loop {
            let (next, value) = cursor.next_integer();
            cursor = next;
            match value {
                Some(v) => out.push(v),
                None => break out,
            }
        }
    }

    #[test]
    fn word_stops_at_separator() {
        let buffer = TextBuffer::from("P3\n32 32\n");
        let (cursor, word) = buffer.cursor().next_word::<15>();
        assert_eq!(word.as_deref(), Some(&b"P3"[..]));
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn word_on_separator_is_none_and_does_not_move() {
        let buffer = TextBuffer::from(" P3");
        let (cursor, word) = buffer.cursor().next_word::<15>();
        assert!(word.is_none());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn word_skips_trailing_comment() {
        let buffer = TextBuffer::from("P3# a comment\n32");
        let (cursor, word) = buffer.cursor().next_word::<15>();
        assert_eq!(word.as_deref(), Some(&b"P3"[..]));
        assert_eq!(buffer.as_bytes()[cursor.position()], b'\n');
    }

    #[test]
    fn comment_alone_is_skipped_without_token() {
        let buffer = TextBuffer::from("# only a comment\n");
        let (cursor, word) = buffer.cursor().next_word::<15>();
        assert!(word.is_none());
        assert_eq!(cursor.position(), 16);
    }

    #[test]
    fn overlong_word_is_consumed_but_truncated() {
        let buffer = TextBuffer::from("abcdefghijklmnopqrstuvwxyz 1");
        let (cursor, word) = buffer.cursor().next_word::<15>();
        assert_eq!(word.map(|w| w.len()), Some(15));
        assert_eq!(cursor.position(), 26);
    }

    #[test]
    fn integers_skip_letters_separators_and_comments() {
        assert_eq!(
            integers("P3 # 99 hidden\n 2\t\t3\r\n#x 4\n255"),
            [3, 2, 3, 255]
        );
    }

    #[test]
    fn sign_is_a_separator() {
        assert_eq!(integers("-12 +7"), [12, 7]);
    }

    #[test]
    fn overflowing_integer_saturates() {
        assert_eq!(integers("99999999999999999999999 1"), [i64::MAX, 1]);
    }

    #[test]
    fn unterminated_comment_ends_the_scan() {
        assert_eq!(integers("1 2 # 3 4"), [1, 2]);
    }

    #[test]
    fn nul_byte_terminates_the_buffer() {
        let buffer = TextBuffer::new(b"1 2\x003 4".to_vec());
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.cursor_at(3).next_integer().1, None);
    }

    #[test]
    fn cursor_at_is_clamped() {
        let buffer = TextBuffer::from("12");
        let cursor = buffer.cursor_at(100);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.next_integer().1, None);
    }
}
