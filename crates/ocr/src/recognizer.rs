use thiserror::Error;

use crate::config::ReaderConfig;
use crate::record::RecordError;
use crate::tsv;
use crate::word::ExtractedWord;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Malformed engine output: {0}")]
    Record(#[from] RecordError),
}

/// Abstraction over an OCR backend.
/// Implementations accept raw PNG/JPEG image bytes and return Tesseract-style TSV,
/// one row per page element.
pub trait OcrBackend: Send + Sync {
    fn recognize_tsv(&self, image_bytes: &[u8]) -> Result<String, OcrError>;
}

/// Run `backend` over an image and read the words it reports.
pub fn recognize_words(
    backend: &dyn OcrBackend,
    image_bytes: &[u8],
    config: &ReaderConfig,
) -> Result<Vec<ExtractedWord>, OcrError> {
    let output = backend.recognize_tsv(image_bytes)?;
    let words = tsv::parse_tsv(&output, config)?;
    tracing::info!("Recognized {} words", words.len());
    Ok(words)
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns pre-set TSV, for exercising the readers without Tesseract installed.
pub struct MockRecognizer {
    pub tsv: String,
}

impl MockRecognizer {
    pub fn new(tsv: impl Into<String>) -> Self {
        Self { tsv: tsv.into() }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize_tsv(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Ok(self.tsv.clone())
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError};
    use leptess::LepTess;

    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize_tsv(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            // Tesseract's TSV renderer omits the header row; restore it for the reader.
            let body = lt.get_tsv_text(0).map_err(|e| OcrError::Engine(e.to_string()))?;
            Ok(format!("{TSV_HEADER}\n{body}"))
        }
    }

    const TSV_HEADER: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";
}
