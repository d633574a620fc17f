use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("Engine record is missing required key '{0}'")]
    KeyMissing(&'static str),
    #[error("Engine record key '{key}' is not a valid {expected}")]
    TypeMismatch {
        key: &'static str,
        expected: &'static str,
    },
    #[error("Engine record is not a key/value object")]
    NotAnObject,
    #[error("Column '{key}' has {found} rows, expected {expected}")]
    ColumnLength {
        key: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("TSV line {line}: {message}")]
    Tsv { line: usize, message: String },
}

/// Keys every engine record must carry, in the order Tesseract reports them.
pub const RECORD_KEYS: [&str; 10] = [
    "block_num", "par_num", "line_num", "word_num", "left", "top", "width", "height", "conf",
    "text",
];

/// One per-token row as emitted by a Tesseract-style engine (`image_to_data`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineRecord {
    pub left: i32,
    pub top: i32,
    pub height: i32,
    pub width: i32,
    pub text: String,
    pub block_num: i32,
    pub par_num: i32,
    pub line_num: i32,
    pub word_num: i32,
    /// Engine confidence, `-1` when the row carries no recognition result.
    pub conf: f64,
}

impl TryFrom<&Value> for EngineRecord {
    type Error = RecordError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let map = value.as_object().ok_or(RecordError::NotAnObject)?;
        Ok(EngineRecord {
            left: int_field(map, "left")?,
            top: int_field(map, "top")?,
            height: int_field(map, "height")?,
            width: int_field(map, "width")?,
            text: text_field(map, "text")?,
            block_num: int_field(map, "block_num")?,
            par_num: int_field(map, "par_num")?,
            line_num: int_field(map, "line_num")?,
            word_num: int_field(map, "word_num")?,
            conf: conf_field(map, "conf")?,
        })
    }
}

fn lookup<'a>(map: &'a Map<String, Value>, key: &'static str) -> Result<&'a Value, RecordError> {
    map.get(key).ok_or(RecordError::KeyMissing(key))
}

fn int_field(map: &Map<String, Value>, key: &'static str) -> Result<i32, RecordError> {
    int_value(lookup(map, key)?, key)
}

/// Integers may arrive as JSON floats with no fractional part (numpy exports do this).
pub(crate) fn int_value(value: &Value, key: &'static str) -> Result<i32, RecordError> {
    let mismatch = RecordError::TypeMismatch { key, expected: "integer" };
    if let Some(n) = value.as_i64() {
        return i32::try_from(n).map_err(|_| mismatch);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 => {
            Ok(f as i32)
        }
        _ => Err(mismatch),
    }
}

fn text_field(map: &Map<String, Value>, key: &'static str) -> Result<String, RecordError> {
    lookup(map, key)?
        .as_str()
        .map(str::to_string)
        .ok_or(RecordError::TypeMismatch { key, expected: "string" })
}

/// Older pytesseract releases report `conf` as a string such as `"-1"` or `"96.5"`.
fn conf_field(map: &Map<String, Value>, key: &'static str) -> Result<f64, RecordError> {
    let mismatch = RecordError::TypeMismatch { key, expected: "number" };
    match lookup(map, key)? {
        Value::Number(n) => n.as_f64().ok_or(mismatch),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| mismatch),
        _ => Err(mismatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cat_record() -> Value {
        json!({
            "left": 10, "top": 20, "height": 15, "width": 40, "text": "cat",
            "block_num": 1, "par_num": 0, "line_num": 2, "word_num": 3, "conf": 91.5
        })
    }

    #[test]
    fn parses_complete_record() {
        let r = EngineRecord::try_from(&cat_record()).unwrap();
        assert_eq!(r.left, 10);
        assert_eq!(r.top, 20);
        assert_eq!(r.text, "cat");
        assert_eq!(r.word_num, 3);
        assert_eq!(r.conf, 91.5);
    }

    #[test]
    fn every_key_is_required() {
        for key in RECORD_KEYS {
            let mut v = cat_record();
            v.as_object_mut().unwrap().remove(key);
            assert_eq!(EngineRecord::try_from(&v), Err(RecordError::KeyMissing(key)));
        }
    }

    #[test]
    fn non_string_text_is_a_mismatch() {
        let mut v = cat_record();
        v["text"] = json!(42);
        assert_eq!(
            EngineRecord::try_from(&v),
            Err(RecordError::TypeMismatch { key: "text", expected: "string" })
        );
    }

    #[test]
    fn integer_fields_reject_fractions_and_overflow() {
        let mut v = cat_record();
        v["width"] = json!(40.5);
        assert!(matches!(
            EngineRecord::try_from(&v),
            Err(RecordError::TypeMismatch { key: "width", .. })
        ));

        let mut v = cat_record();
        v["left"] = json!(i64::from(i32::MAX) + 1);
        assert!(matches!(
            EngineRecord::try_from(&v),
            Err(RecordError::TypeMismatch { key: "left", .. })
        ));

        let mut v = cat_record();
        v["height"] = json!("15");
        assert!(matches!(
            EngineRecord::try_from(&v),
            Err(RecordError::TypeMismatch { key: "height", .. })
        ));
    }

    #[test]
    fn whole_floats_are_accepted_as_integers() {
        let mut v = cat_record();
        v["top"] = json!(20.0);
        assert_eq!(EngineRecord::try_from(&v).unwrap().top, 20);
    }

    #[test]
    fn conf_accepts_numeric_strings() {
        let mut v = cat_record();
        v["conf"] = json!("-1");
        assert_eq!(EngineRecord::try_from(&v).unwrap().conf, -1.0);

        v["conf"] = json!("n/a");
        assert!(matches!(
            EngineRecord::try_from(&v),
            Err(RecordError::TypeMismatch { key: "conf", .. })
        ));
    }

    #[test]
    fn rejects_non_objects() {
        assert_eq!(EngineRecord::try_from(&json!([1, 2])), Err(RecordError::NotAnObject));
    }

    #[test]
    fn typed_deserialize_reports_missing_field() {
        let err = serde_json::from_str::<EngineRecord>(r#"{"left": 1}"#).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }
}
