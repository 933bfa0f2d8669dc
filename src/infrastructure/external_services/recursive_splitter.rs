use crate::application::ports::TextChunker;
use crate::domain::entities::TextChunk;

pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Splits on paragraphs first, then lines, then words, and finally on raw
/// character boundaries until every piece fits in `max_chunk_size`
/// characters.
#[derive(Debug, Clone)]
pub struct RecursiveTextSplitter {
    separators: Vec<&'static str>,
    max_chunk_size: usize,
}

impl Default for RecursiveTextSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl TextChunker for RecursiveTextSplitter {
    fn chunk_text(&self, text: &str) -> Vec<TextChunk> {
        self.split_text(text)
            .into_iter()
            .map(|piece| piece.trim().to_string())
            .filter(|piece| !piece.is_empty())
            .enumerate()
            .map(|(ordinal, piece)| TextChunk::new(ordinal, piece))
            .collect()
    }
}

impl RecursiveTextSplitter {
    pub fn new(max_chunk_size: usize) -> Self {
        Self {
            separators: vec![
                "\n\n", // Double newline (paragraphs)
                "\n",   // Single newline
                " ",    // Space
                "",     // Character level
            ],
            max_chunk_size: max_chunk_size.max(1),
        }
    }

    /// Raw pieces before trimming. Concatenating them restores `text` minus
    /// the separators the split consumed.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        self.recursive_split(text, 0)
    }

    fn fits(&self, text: &str) -> bool {
        text.chars().count() <= self.max_chunk_size
    }

    fn split_by_length(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();

        chars
            .chunks(self.max_chunk_size)
            .map(|window| window.iter().collect())
            .collect()
    }

    fn recursive_split(&self, text: &str, separator_index: usize) -> Vec<String> {
        if self.fits(text) {
            return vec![text.to_string()];
        }

        if separator_index >= self.separators.len() {
            return self.split_by_length(text);
        }

        let separator = self.separators[separator_index];

        if separator.is_empty() {
            return self.split_by_length(text);
        }

        let parts: Vec<&str> = text.split(separator).collect();

        if parts.len() == 1 {
            return self.recursive_split(text, separator_index + 1);
        }

        let mut chunks = Vec::new();
        let mut current_chunk = String::new();

        for part in parts {
            let part_with_sep = if current_chunk.is_empty() {
                part.to_string()
            } else {
                format!("{}{}{}", current_chunk, separator, part)
            };

            if self.fits(&part_with_sep) {
                current_chunk = part_with_sep;
            } else {
                if !current_chunk.is_empty() {
                    chunks.push(current_chunk);
                }
                current_chunk = part.to_string();

                if !self.fits(&current_chunk) {
                    let sub_chunks = self.recursive_split(&current_chunk, separator_index + 1);
                    chunks.extend(sub_chunks);
                    current_chunk.clear();
                }
            }
        }

        if !current_chunk.is_empty() {
            chunks.push(current_chunk);
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_splitting() {
        let splitter = RecursiveTextSplitter::new(30);
        let text = "This is a test.\n\nThis is another paragraph.\n\nAnd a third one.";
        let chunks = splitter.chunk_text(text);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text(), "This is a test.");
        assert_eq!(chunks[1].text(), "This is another paragraph.");
        assert_eq!(chunks[2].text(), "And a third one.");
        for chunk in &chunks {
            assert!(chunk.text().chars().count() <= 30);
        }
    }

    #[test]
    fn test_ordinals_follow_text_order() {
        let splitter = RecursiveTextSplitter::new(10);
        let text = "alpha beta gamma delta epsilon zeta";
        let chunks = splitter.chunk_text(text);

        assert!(chunks.len() > 1);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.ordinal(), i);
        }
        let rejoined: Vec<&str> = chunks.iter().map(|c| c.text()).collect();
        assert_eq!(rejoined.join(" "), text);
    }

    #[test]
    fn test_no_overlap() {
        let splitter = RecursiveTextSplitter::new(40);
        let text = "This is a very long sentence that should be split into multiple chunks with no overlap between them.";
        let pieces = splitter.split_text(text);

        assert!(pieces.len() > 1);
        for piece in &pieces {
            assert!(piece.chars().count() <= 40);
        }
        assert_eq!(pieces.join(" "), text);
    }

    #[test]
    fn test_short_text() {
        let splitter = RecursiveTextSplitter::new(100);
        let chunks = splitter.chunk_text("Short text");

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text(), "Short text");
    }

    #[test]
    fn test_empty_and_blank_text() {
        let splitter = RecursiveTextSplitter::default();

        assert!(splitter.chunk_text("").is_empty());
        assert!(splitter.chunk_text(" \n\n \t ").is_empty());
    }

    #[test]
    fn test_long_word_is_cut_on_char_boundaries() {
        let splitter = RecursiveTextSplitter::new(4);
        let chunks = splitter.chunk_text("ééééééééé");

        let texts: Vec<&str> = chunks.iter().map(|c| c.text()).collect();
        assert_eq!(texts, vec!["éééé", "éééé", "é"]);
    }
}
