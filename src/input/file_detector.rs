//! File type detection

/// Every PDF file starts with this header.
pub const PDF_SIGNATURE: &[u8] = b"%PDF-";

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Pdf,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            _ => FileType::Unknown,
        }
    }

    /// Sniff the content; some writers emit a few junk bytes before the header.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let head = &bytes[..bytes.len().min(1024)];
        if head.windows(PDF_SIGNATURE.len()).any(|w| w == PDF_SIGNATURE) {
            FileType::Pdf
        } else {
            FileType::Unknown
        }
    }
}
