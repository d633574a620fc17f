pub mod config;
pub mod layout;
pub mod recognizer;
pub mod record;
pub mod table;
pub mod tsv;
pub mod word;

pub use config::{ConfigError, ReaderConfig};
pub use layout::{group_lines, LineKey, TextLine};
pub use recognizer::{recognize_words, MockRecognizer, OcrBackend, OcrError};
pub use record::{EngineRecord, RecordError, RECORD_KEYS};
pub use table::words_from_table;
pub use tsv::{parse_tsv, WORD_LEVEL};
pub use word::ExtractedWord;
