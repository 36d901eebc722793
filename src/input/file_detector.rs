//! Document format detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
    Unsupported,
}

impl DocumentKind {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => DocumentKind::Pdf,
            "docx" => DocumentKind::Docx,
            "txt" => DocumentKind::Text,
            _ => DocumentKind::Unsupported,
        }
    }

    /// The declared format of an upload is carried by its filename suffix.
    pub fn from_filename(filename: &str) -> Self {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(DocumentKind::from_extension)
            .unwrap_or(DocumentKind::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_supported_formats() {
        assert_eq!(DocumentKind::from_filename("resume.pdf"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_filename("resume.DOCX"), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_filename("resume.txt"), DocumentKind::Text);
    }

    #[test]
    fn anything_else_is_unsupported() {
        assert_eq!(DocumentKind::from_filename("photo.jpg"), DocumentKind::Unsupported);
        assert_eq!(DocumentKind::from_filename("resume.doc"), DocumentKind::Unsupported);
        assert_eq!(DocumentKind::from_filename("noextension"), DocumentKind::Unsupported);
    }
}
