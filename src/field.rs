//! The managed text field and caret-aware insertion of accepted candidates.

/// Separator appended after every accepted candidate.
pub const SEPARATOR: char = ' ';

/// Snapshot of the single text field the session manages.
///
/// `caret` is a character offset (not a byte offset) into `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub text: String,
    pub caret: usize,
    pub focused: bool,
}

impl FieldState {
    /// A focused field with the caret at the end of `text`.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            caret: text.chars().count(),
            focused: true,
        }
    }

    pub fn with_caret(text: &str, caret: usize) -> Self {
        Self {
            text: text.to_string(),
            caret,
            focused: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offset of the caret, clamped to the end of the text.
    fn caret_byte_offset(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.caret)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// The partial word immediately before the caret.
    fn word_before_caret(&self) -> &str {
        let head = &self.text[..self.caret_byte_offset()];
        let start = head
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(i, c)| i + c.len_utf8());
        &head[start..]
    }
}

/// Splice `candidate` plus the separator in at the caret.
///
/// Text before the caret and after the insertion point is untouched; the
/// caret lands right after the separator and the field is focused.
///
/// One departure from a plain splice: when the candidate is strictly longer
/// than the partial word before the caret and starts with it, only the
/// missing tail is inserted ("hel" + "hello" gives "hello ", not
/// "helhello "). A candidate equal to that word, or not extending it, is
/// spliced whole.
pub fn insert(candidate: &str, field: &FieldState) -> FieldState {
    let at = field.caret_byte_offset();
    let caret = field.caret.min(field.text.chars().count());
    let inserted = candidate
        .strip_prefix(field.word_before_caret())
        .filter(|tail| !tail.is_empty())
        .unwrap_or(candidate);

    let mut text = String::with_capacity(field.text.len() + inserted.len() + 1);
    text.push_str(&field.text[..at]);
    text.push_str(inserted);
    text.push(SEPARATOR);
    text.push_str(&field.text[at..]);

    FieldState {
        text,
        caret: caret + inserted.chars().count() + 1,
        focused: true,
    }
}
