use std::fmt;
use std::ops::Range;

use xi_rope::{Rope, delta::Builder};

/// Immutable text value addressed by character offsets.
///
/// Backed by an xi-rope buffer so clones share structure: a history
/// snapshot costs a pointer copy, and `splice` returns a new value without
/// touching the one it was called on.
#[derive(Clone)]
pub struct Text {
    rope: Rope,
    chars: usize,
}

impl Text {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from(text),
            chars: text.chars().count(),
        }
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.chars
    }

    pub fn is_empty(&self) -> bool {
        self.chars == 0
    }

    /// Copy out the characters in `range`, clamped to the text bounds
    pub fn slice(&self, range: Range<usize>) -> String {
        let bytes = self.byte_range(self.clamp(range));
        self.rope.slice_to_cow(bytes).into_owned()
    }

    /// Return a new text with `range` replaced by `replacement`
    pub fn splice(&self, range: Range<usize>, replacement: &str) -> Text {
        let range = self.clamp(range);
        let removed = range.len();
        let bytes = self.byte_range(range);

        let mut builder = Builder::new(self.rope.len());
        builder.replace(bytes, Rope::from(replacement));
        let delta = builder.build();

        Text {
            rope: delta.apply(&self.rope),
            chars: self.chars - removed + replacement.chars().count(),
        }
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let start = range.start.min(self.chars);
        let end = range.end.min(self.chars).max(start);
        start..end
    }

    /// Convert a clamped character range to a byte range in the rope
    fn byte_range(&self, Range { start, end }: Range<usize>) -> Range<usize> {
        let start_byte = self.advance(0, start);
        let end_byte = self.advance(start_byte, end - start);
        start_byte..end_byte
    }

    /// Byte offset `chars` characters past `from_byte`
    fn advance(&self, from_byte: usize, chars: usize) -> usize {
        let mut remaining = chars;
        let mut offset = from_byte;
        for chunk in self.rope.iter_chunks(from_byte..self.rope.len()) {
            if let Some((byte, _)) = chunk.char_indices().nth(remaining) {
                return offset + byte;
            }
            remaining -= chunk.chars().count();
            offset += chunk.len();
        }
        offset
    }

    fn chunks(&self) -> impl Iterator<Item = &str> {
        self.rope.iter_chunks(0..self.rope.len())
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chunks().try_for_each(|chunk| f.write_str(chunk))
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string(), f)
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        // Leaf boundaries differ between equal ropes, so compare byte streams
        self.chars == other.chars
            && self.rope.len() == other.rope.len()
            && self
                .chunks()
                .flat_map(str::bytes)
                .eq(other.chunks().flat_map(str::bytes))
    }
}

impl Eq for Text {}

impl From<&str> for Text {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Text {
    fn from(text: String) -> Self {
        Self::new(&text)
    }
}
