//! Types for inline suggestions

/// Zero-based cursor position in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A single-line suggestion anchored at the cursor
///
/// Ephemeral: produced per accepted completion request and discarded after
/// being shown once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSuggestion {
    /// Text to insert at the anchor position
    pub insert_text: String,
    /// Anchor position the suggestion was produced for
    pub position: Position,
}
