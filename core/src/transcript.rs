/// Accumulated text of issued commands, one per line.
///
/// The core only builds the text; writing it anywhere is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one issued command. Blank lines are not recorded.
    pub fn record(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        self.text.push_str(line);
        self.text.push('\n');
    }

    /// Append a block of already newline-terminated text (e.g. an import).
    pub fn append(&mut self, block: &str) {
        self.text.push_str(block);
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of recorded lines.
    pub fn len(&self) -> usize {
        self.text.lines().count()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}
