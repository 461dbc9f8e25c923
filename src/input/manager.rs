//! Input manager for loading documents from disk

use crate::error::{ContractAnalyzerError, Result};
use crate::input::document::{ExtractedText, UploadedDocument};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{PdfExtractor, TextExtractor};
use log::{info, warn};
use std::path::Path;
use tokio::fs;

#[derive(Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Read a file into memory. Content checks happen at extraction time.
    pub async fn load(&self, path: &Path) -> Result<UploadedDocument> {
        if !path.exists() {
            return Err(ContractAnalyzerError::InvalidInput(
                format!("File does not exist: {}", path.display())
            ));
        }
        if path.is_dir() {
            return Err(ContractAnalyzerError::InvalidInput(
                format!("Path is a directory: {}", path.display())
            ));
        }

        let extension_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(FileType::from_extension)
            .unwrap_or(FileType::Unknown);
        if extension_type != FileType::Pdf {
            warn!("{} does not have a .pdf extension", path.display());
        }

        let bytes = fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        info!("Loaded {} ({} bytes)", name, bytes.len());
        Ok(UploadedDocument::new(name, bytes))
    }

    pub async fn extract_text(&self, path: &Path) -> Result<ExtractedText> {
        let document = self.load(path).await?;
        info!("Extracting text from PDF: {}", path.display());
        PdfExtractor.extract(&document.bytes)
    }
}
