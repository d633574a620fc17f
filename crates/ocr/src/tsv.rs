use crate::config::ReaderConfig;
use crate::record::{EngineRecord, RecordError};
use crate::word::ExtractedWord;

/// Tesseract's `level` value for word rows (1 page, 2 block, 3 paragraph, 4 line).
pub const WORD_LEVEL: u32 = 5;

/// Column positions resolved from the TSV header.
struct Columns {
    level: Option<usize>,
    block_num: usize,
    par_num: usize,
    line_num: usize,
    word_num: usize,
    left: usize,
    top: usize,
    width: usize,
    height: usize,
    conf: usize,
    text: usize,
    count: usize,
}

impl Columns {
    fn from_header(header: &str) -> Result<Self, RecordError> {
        let names: Vec<&str> = header.split('\t').map(str::trim).collect();
        let find = |key: &'static str| {
            names
                .iter()
                .position(|n| *n == key)
                .ok_or(RecordError::KeyMissing(key))
        };

        Ok(Self {
            level: find("level").ok(),
            block_num: find("block_num")?,
            par_num: find("par_num")?,
            line_num: find("line_num")?,
            word_num: find("word_num")?,
            left: find("left")?,
            top: find("top")?,
            width: find("width")?,
            height: find("height")?,
            conf: find("conf")?,
            text: find("text")?,
            count: names.len(),
        })
    }
}

/// Parse Tesseract TSV output (`tesseract img out tsv`, or `image_to_data`)
/// into words, applying `config`.
pub fn parse_tsv(tsv: &str, config: &ReaderConfig) -> Result<Vec<ExtractedWord>, RecordError> {
    let mut lines = tsv.lines().enumerate();
    let Some((_, header)) = lines.find(|(_, l)| !l.trim().is_empty()) else {
        return Ok(Vec::new());
    };
    let columns = Columns::from_header(header)?;

    let mut words = Vec::new();
    let mut dropped = 0usize;
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let cells: Vec<&str> = line.split('\t').collect();

        if config.words_only {
            if let Some(level_col) = columns.level {
                let level = cell(&cells, level_col, line_no)?
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| RecordError::TypeMismatch { key: "level", expected: "integer" })?;
                if level != WORD_LEVEL {
                    continue;
                }
            }
        }

        let word = ExtractedWord::from_engine_record(read_record(&cells, &columns, line_no)?);
        if config.accepts(&word) {
            words.push(word);
        } else {
            dropped += 1;
        }
    }

    tracing::debug!("Parsed TSV: {} words kept, {} filtered", words.len(), dropped);
    Ok(words)
}

fn read_record(cells: &[&str], columns: &Columns, line_no: usize) -> Result<EngineRecord, RecordError> {
    let int = |key: &'static str, col: usize| -> Result<i32, RecordError> {
        cell(cells, col, line_no)?
            .trim()
            .parse::<i32>()
            .map_err(|_| RecordError::TypeMismatch { key, expected: "integer" })
    };

    // Non-word rows end right after `conf`; Tesseract leaves the trailing text cell off.
    let text = if columns.text == columns.count - 1 && cells.len() == columns.count - 1 {
        String::new()
    } else {
        cell(cells, columns.text, line_no)?.to_string()
    };

    Ok(EngineRecord {
        left: int("left", columns.left)?,
        top: int("top", columns.top)?,
        height: int("height", columns.height)?,
        width: int("width", columns.width)?,
        text,
        block_num: int("block_num", columns.block_num)?,
        par_num: int("par_num", columns.par_num)?,
        line_num: int("line_num", columns.line_num)?,
        word_num: int("word_num", columns.word_num)?,
        conf: cell(cells, columns.conf, line_no)?
            .trim()
            .parse::<f64>()
            .map_err(|_| RecordError::TypeMismatch { key: "conf", expected: "number" })?,
    })
}

fn cell<'a>(cells: &[&'a str], col: usize, line_no: usize) -> Result<&'a str, RecordError> {
    cells.get(col).copied().ok_or_else(|| RecordError::Tsv {
        line: line_no,
        message: format!("expected at least {} columns, found {}", col + 1, cells.len()),
    })
}
