//! Text extraction from PDF documents

use crate::error::{ContractAnalyzerError, Result};
use crate::input::document::ExtractedText;
use crate::input::file_detector::FileType;
use log::{debug, warn};
use lopdf::Document;

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText>;
}

pub struct PdfExtractor;

impl PdfExtractor {
    /// Text of each page, ordered by page number.
    pub fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        if FileType::from_bytes(bytes) != FileType::Pdf {
            return Err(ContractAnalyzerError::UnsupportedFormat(
                "content is not a PDF document".to_string(),
            ));
        }

        let doc = Document::load_mem(bytes).map_err(|e| {
            ContractAnalyzerError::PdfExtraction(format!("Failed to parse PDF: {}", e))
        })?;

        if doc.is_encrypted() {
            return Err(ContractAnalyzerError::PdfExtraction(
                "PDF is encrypted and cannot be read".to_string(),
            ));
        }

        // get_pages is a BTreeMap keyed by page number, so iteration is page order
        let pages = doc.get_pages();
        debug!("PDF has {} pages", pages.len());

        let mut texts = Vec::with_capacity(pages.len());
        for page_number in pages.keys() {
            let text = doc.extract_text(&[*page_number]).map_err(|e| {
                ContractAnalyzerError::PdfExtraction(format!(
                    "Failed to extract text from page {}: {}",
                    page_number, e
                ))
            })?;
            texts.push(text);
        }

        Ok(texts)
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText> {
        let extracted = ExtractedText::from_pages(self.extract_pages(bytes)?);
        if extracted.is_blank() {
            warn!("No text could be extracted; the PDF may contain only scanned images");
        }
        Ok(extracted)
    }
}
