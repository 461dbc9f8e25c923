//! Input processing module
//! Handles document loading, format detection, and PDF text extraction

pub mod document;
pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use document::{ExtractedText, UploadedDocument};
pub use manager::InputManager;
pub use text_extractor::{PdfExtractor, TextExtractor};
