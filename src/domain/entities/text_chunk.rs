use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChunk {
    ordinal: usize,
    text: String,
}

impl TextChunk {
    pub fn new(ordinal: usize, text: String) -> Self {
        Self { ordinal, text }
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn text(&self) -> &str {
        &self.text
    }

}
