//! In-memory document values for one session

use serde::{Deserialize, Serialize};

/// Raw bytes of a document the user handed in.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Plain text of every page, concatenated in page order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: usize,
}

impl ExtractedText {
    pub fn from_pages(pages: Vec<String>) -> Self {
        let page_count = pages.len();
        Self {
            text: pages.concat(),
            page_count,
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_concatenated_without_separator() {
        let extracted = ExtractedText::from_pages(vec![
            "Pasal 1".to_string(),
            "Pasal 2".to_string(),
        ]);
        assert_eq!(extracted.text, "Pasal 1Pasal 2");
        assert_eq!(extracted.page_count, 2);
        assert_eq!(extracted.word_count(), 3);
    }

    #[test]
    fn test_blank_text() {
        let extracted = ExtractedText::from_pages(vec![" \n".to_string()]);
        assert!(extracted.is_blank());
    }
}
