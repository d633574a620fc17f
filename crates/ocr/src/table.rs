use serde_json::{Map, Value};

use crate::config::ReaderConfig;
use crate::record::{int_value, EngineRecord, RecordError, RECORD_KEYS};
use crate::tsv::WORD_LEVEL;
use crate::word::ExtractedWord;

/// Read a column-oriented table (`pytesseract.image_to_data(..., output_type=Output.DICT)`):
/// an object whose keys each hold one array, row `i` spread across index `i` of every array.
pub fn words_from_table(
    table: &Value,
    config: &ReaderConfig,
) -> Result<Vec<ExtractedWord>, RecordError> {
    let map = table.as_object().ok_or(RecordError::NotAnObject)?;

    let columns = RECORD_KEYS
        .iter()
        .map(|&key| column(map, key).map(|col| (key, col)))
        .collect::<Result<Vec<_>, _>>()?;
    let rows = column(map, "text")?.len();
    let levels = match map.get("level") {
        Some(_) => Some(column(map, "level")?),
        None => None,
    };

    let lengths = columns
        .iter()
        .map(|(key, col)| (*key, col.len()))
        .chain(levels.map(|col| ("level", col.len())));
    for (key, found) in lengths {
        if found != rows {
            return Err(RecordError::ColumnLength { key, expected: rows, found });
        }
    }

    let mut words = Vec::with_capacity(rows);
    for i in 0..rows {
        if let Some(levels) = levels.filter(|_| config.words_only) {
            if int_value(&levels[i], "level")? != WORD_LEVEL as i32 {
                continue;
            }
        }

        let row: Map<String, Value> = columns
            .iter()
            .map(|(key, col)| (key.to_string(), col[i].clone()))
            .collect();
        let word = ExtractedWord::from_engine_record(EngineRecord::try_from(&Value::Object(row))?);
        if config.accepts(&word) {
            words.push(word);
        }
    }

    tracing::debug!("Read column table: {} of {} rows kept", words.len(), rows);
    Ok(words)
}

fn column<'a>(map: &'a Map<String, Value>, key: &'static str) -> Result<&'a Vec<Value>, RecordError> {
    map.get(key)
        .ok_or(RecordError::KeyMissing(key))?
        .as_array()
        .ok_or(RecordError::TypeMismatch { key, expected: "array" })
}
