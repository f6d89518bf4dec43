//! Candidate list plus highlight, kept consistent with each other.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuggestionError {
    #[error("highlight index {index} out of range for {len} suggestions")]
    OutOfRange { index: usize, len: usize },
}

/// Current suggestions and the highlighted one, if any.
///
/// The highlight is `None` whenever the list is replaced or cleared, and
/// never points past the end of the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionState {
    candidates: Vec<String>,
    highlighted: Option<usize>,
}

impl SuggestionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list and reset the highlight. An empty list hides
    /// the surface.
    pub fn set_candidates(&mut self, candidates: Vec<String>) {
        self.candidates = candidates;
        self.highlighted = None;
    }

    pub fn set_highlight(&mut self, index: usize) -> Result<(), SuggestionError> {
        if index >= self.candidates.len() {
            return Err(SuggestionError::OutOfRange {
                index,
                len: self.candidates.len(),
            });
        }
        self.highlighted = Some(index);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.candidates.clear();
        self.highlighted = None;
    }

    /// Highlight the next candidate, wrapping; from no highlight this is 0.
    pub fn highlight_next(&mut self) -> Option<usize> {
        self.step(1)
    }

    /// Highlight the previous candidate, wrapping.
    pub fn highlight_prev(&mut self) -> Option<usize> {
        self.step(-1)
    }

    fn step(&mut self, delta: i64) -> Option<usize> {
        if self.candidates.is_empty() {
            return None;
        }
        let index = cyclic_index(self.highlighted, delta, self.candidates.len());
        self.highlighted = Some(index);
        Some(index)
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.candidates.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn is_visible(&self) -> bool {
        !self.candidates.is_empty()
    }
}

/// `(current + delta + count) mod count` over the signed index, where no
/// highlight counts as -1.
pub(super) fn cyclic_index(current: Option<usize>, delta: i64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let c = current.map_or(-1, |i| i as i64);
    let n = count as i64;
    (c + delta + n).rem_euclid(n) as usize
}
