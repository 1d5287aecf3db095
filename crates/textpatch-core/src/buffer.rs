//! Text buffers that edits can be applied to.
//!
//! A [`TextBuffer`] exposes exactly one mutation primitive, `replace`. Offsets and lengths are
//! character offsets (Unicode scalar values), matching the rest of the crate.

use ropey::Rope;
use thiserror::Error;

/// Errors reported by a buffer when it rejects a `replace`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("buffer is read-only")]
    /// The buffer does not accept modifications.
    ReadOnly,

    #[error("range {start}..{end} is out of bounds for length {len}")]
    /// The requested range does not lie inside the buffer.
    OutOfBounds {
        /// Inclusive start character offset.
        start: usize,
        /// Exclusive end character offset (saturated on overflow).
        end: usize,
        /// Buffer length in characters.
        len: usize,
    },
}

/// A mutable character sequence supporting range replacement.
pub trait TextBuffer {
    /// Current length in characters.
    fn len(&self) -> usize;

    /// Returns `true` if the buffer holds no characters.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy out `length` characters starting at `start`, or `None` if the range is out of bounds.
    fn slice(&self, start: usize, length: usize) -> Option<String>;

    /// Replace `length` characters starting at `start` with `text`.
    fn replace(&mut self, start: usize, length: usize, text: &str) -> Result<(), BufferError>;

    /// The full buffer contents.
    fn contents(&self) -> String {
        self.slice(0, self.len()).unwrap_or_default()
    }
}

fn checked_range(start: usize, length: usize, len: usize) -> Result<usize, BufferError> {
    match start.checked_add(length) {
        Some(end) if end <= len => Ok(end),
        end => Err(BufferError::OutOfBounds {
            start,
            end: end.unwrap_or(usize::MAX),
            len,
        }),
    }
}

/// Byte offset of the `char_offset`-th character (`text.len()` for one past the end).
fn char_to_byte(text: &str, char_offset: usize) -> Option<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .nth(char_offset)
}

impl TextBuffer for String {
    fn len(&self) -> usize {
        self.chars().count()
    }

    fn slice(&self, start: usize, length: usize) -> Option<String> {
        let end = start.checked_add(length)?;
        let from = char_to_byte(self, start)?;
        let to = char_to_byte(self, end)?;
        Some(self[from..to].to_string())
    }

    fn replace(&mut self, start: usize, length: usize, text: &str) -> Result<(), BufferError> {
        let len = TextBuffer::len(self);
        let end = checked_range(start, length, len)?;
        let out_of_bounds = BufferError::OutOfBounds { start, end, len };
        let from = char_to_byte(self, start).ok_or_else(|| out_of_bounds.clone())?;
        let to = char_to_byte(self, end).ok_or(out_of_bounds)?;
        self.replace_range(from..to, text);
        Ok(())
    }

    fn contents(&self) -> String {
        self.clone()
    }
}

impl TextBuffer for Rope {
    fn len(&self) -> usize {
        self.len_chars()
    }

    fn slice(&self, start: usize, length: usize) -> Option<String> {
        let end = start.checked_add(length)?;
        self.get_slice(start..end).map(|s| s.to_string())
    }

    fn replace(&mut self, start: usize, length: usize, text: &str) -> Result<(), BufferError> {
        let end = checked_range(start, length, self.len_chars())?;
        if length > 0 {
            self.remove(start..end);
        }
        if !text.is_empty() {
            self.insert(start, text);
        }
        Ok(())
    }
}

/// A rope-backed document with a modification stamp and an optional read-only guard.
///
/// Cloning is cheap (the rope shares its nodes), which makes a `Document` a good fit for
/// copy-on-write application via [`crate::PatchApplier::apply`].
#[derive(Debug, Clone, Default)]
pub struct Document {
    rope: Rope,
    version: u64,
    read_only: bool,
}

impl Document {
    /// Create a writable document from text.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            version: 0,
            read_only: false,
        }
    }

    /// Full document text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Borrow the backing rope.
    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Modification stamp; incremented by every successful `replace`.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns `true` if `replace` is rejected.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Toggle the read-only guard.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }
}

impl TextBuffer for Document {
    fn len(&self) -> usize {
        self.rope.len_chars()
    }

    fn slice(&self, start: usize, length: usize) -> Option<String> {
        TextBuffer::slice(&self.rope, start, length)
    }

    fn replace(&mut self, start: usize, length: usize, text: &str) -> Result<(), BufferError> {
        if self.read_only {
            return Err(BufferError::ReadOnly);
        }
        TextBuffer::replace(&mut self.rope, start, length, text)?;
        self.version = self.version.saturating_add(1);
        Ok(())
    }

    fn contents(&self) -> String {
        self.text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_replace_middle() {
        let mut text = String::from("Hello, World");
        TextBuffer::replace(&mut text, 5, 2, "").unwrap();
        assert_eq!(text, "HelloWorld");
    }

    #[test]
    fn test_string_insert_at_end() {
        let mut text = String::from("Hello");
        TextBuffer::replace(&mut text, 5, 0, ", World").unwrap();
        assert_eq!(text, "Hello, World");
    }

    #[test]
    fn test_string_utf8_chinese() {
        let mut text = String::from("你好");
        assert_eq!(TextBuffer::len(&text), 2);
        TextBuffer::replace(&mut text, 1, 0, "们").unwrap();
        assert_eq!(text, "你们好");
        assert_eq!(TextBuffer::slice(&text, 1, 2).as_deref(), Some("们好"));
    }

    #[test]
    fn test_string_out_of_bounds() {
        let mut text = String::from("abcde");
        assert_eq!(
            TextBuffer::replace(&mut text, 4, 5, "x"),
            Err(BufferError::OutOfBounds {
                start: 4,
                end: 9,
                len: 5
            })
        );
        assert_eq!(text, "abcde");
        assert_eq!(TextBuffer::slice(&text, 4, 5), None);
    }

    #[test]
    fn test_rope_replace() {
        let mut rope = Rope::from_str("Hello 👋");
        TextBuffer::replace(&mut rope, 6, 0, "World ").unwrap();
        assert_eq!(rope.to_string(), "Hello World 👋");
        TextBuffer::replace(&mut rope, 0, 5, "Hi").unwrap();
        assert_eq!(rope.to_string(), "Hi World 👋");
    }

    #[test]
    fn test_rope_out_of_bounds_does_not_panic() {
        let mut rope = Rope::from_str("abc");
        assert!(TextBuffer::replace(&mut rope, 2, 2, "").is_err());
        assert_eq!(rope.to_string(), "abc");
    }

    #[test]
    fn test_document_version_and_read_only() {
        let mut doc = Document::new("abc");
        doc.replace(1, 1, "B").unwrap();
        assert_eq!(doc.text(), "aBc");
        assert_eq!(doc.version(), 1);

        doc.set_read_only(true);
        assert_eq!(doc.replace(0, 0, "x"), Err(BufferError::ReadOnly));
        assert_eq!(doc.text(), "aBc");
        assert_eq!(doc.version(), 1);
    }
}
