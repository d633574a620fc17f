use billscan_core::{BoundingBox, Point};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{EngineRecord, RecordError};

/// One recognized word token from an OCR pass over an image.
///
/// Fields are fixed at construction. Edges and corners are derived on every
/// call in `i64`, so any `i32` start and size sum without overflow; a negative
/// width or height is kept as-is and yields an inverted box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedWord {
    start: Point,
    height: i32,
    width: i32,
    text: String,
    block: i32,
    par: i32,
    line: i32,
    word: i32,
    confidence: f64,
}

impl ExtractedWord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start: impl Into<Point>,
        height: i32,
        width: i32,
        text: impl Into<String>,
        block: i32,
        par: i32,
        line: i32,
        word: i32,
        confidence: f64,
    ) -> Self {
        Self {
            start: start.into(),
            height,
            width,
            text: text.into(),
            block,
            par,
            line,
            word,
            confidence,
        }
    }

    /// Map a typed engine row onto a word. `start` is `(left, top)`.
    pub fn from_engine_record(record: EngineRecord) -> Self {
        Self::new(
            (record.left, record.top),
            record.height,
            record.width,
            record.text,
            record.block_num,
            record.par_num,
            record.line_num,
            record.word_num,
            record.conf,
        )
    }

    /// Map a loosely-typed engine row (a JSON object keyed like Tesseract's
    /// `image_to_data` output) onto a word.
    pub fn from_engine_value(value: &Value) -> Result<Self, RecordError> {
        EngineRecord::try_from(value).map(Self::from_engine_record)
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn block(&self) -> i32 {
        self.block
    }

    pub fn par(&self) -> i32 {
        self.par
    }

    pub fn line(&self) -> i32 {
        self.line
    }

    pub fn word(&self) -> i32 {
        self.word
    }

    /// Engine confidence, reported verbatim (negative means "not available").
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn left(&self) -> i32 {
        self.start.x
    }

    pub fn top(&self) -> i32 {
        self.start.y
    }

    pub fn right(&self) -> i64 {
        i64::from(self.start.x) + i64::from(self.width)
    }

    pub fn bottom(&self) -> i64 {
        i64::from(self.start.y) + i64::from(self.height)
    }

    /// Bottom-right corner as `(right, bottom)`.
    pub fn end(&self) -> (i64, i64) {
        (self.right(), self.bottom())
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_start(self.start, self.width, self.height)
    }

    /// Copy of this word with replaced text, e.g. after spell correction.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        Self { text: text.into(), ..self }
    }

    pub fn with_confidence(self, confidence: f64) -> Self {
        Self { confidence, ..self }
    }
}

impl From<EngineRecord> for ExtractedWord {
    fn from(record: EngineRecord) -> Self {
        Self::from_engine_record(record)
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
    fn edges_derive_from_start_and_size() {
        let w = ExtractedWord::new((7, 9), 12, 30, "total", 0, 0, 0, 0, 88.0);
        assert_eq!(w.left(), 7);
        assert_eq!(w.top(), 9);
        assert_eq!(w.right(), 37);
        assert_eq!(w.bottom(), 21);
        assert_eq!(w.end(), (w.right(), w.bottom()));
    }

    #[test]
    fn adapter_maps_every_field() {
        let w = ExtractedWord::from_engine_value(&cat_record()).unwrap();
        assert_eq!(w.start(), Point::new(10, 20));
        assert_eq!(w.height(), 15);
        assert_eq!(w.width(), 40);
        assert_eq!(w.text(), "cat");
        assert_eq!(w.block(), 1);
        assert_eq!(w.par(), 0);
        assert_eq!(w.line(), 2);
        assert_eq!(w.word(), 3);
        assert_eq!(w.confidence(), 91.5);
        assert_eq!(w.right(), 50);
        assert_eq!(w.bottom(), 35);
        assert_eq!(w.end(), (50, 35));
    }

    #[test]
    fn adapter_without_conf_fails() {
        let mut v = cat_record();
        v.as_object_mut().unwrap().remove("conf");
        assert_eq!(
            ExtractedWord::from_engine_value(&v),
            Err(RecordError::KeyMissing("conf"))
        );
    }

    #[test]
    fn zero_size_box_collapses_to_start() {
        let w = ExtractedWord::new((5, 5), 0, 0, "", 0, 0, 0, 0, 0.0);
        assert_eq!(w.left(), 5);
        assert_eq!(w.right(), 5);
        assert_eq!(w.top(), 5);
        assert_eq!(w.bottom(), 5);
        assert_eq!(w.end(), (5, 5));
    }

    #[test]
    fn negative_confidence_is_preserved() {
        let mut v = cat_record();
        v["conf"] = json!(-1);
        let w = ExtractedWord::from_engine_value(&v).unwrap();
        assert_eq!(w.confidence(), -1.0);
    }

    #[test]
    fn negative_size_is_not_rejected() {
        let w = ExtractedWord::new((10, 10), -4, -6, "x", 0, 0, 0, 0, 50.0);
        assert_eq!(w.right(), 4);
        assert_eq!(w.bottom(), 6);
        assert_eq!(w.bounding_box().area(), 24);
    }

    #[test]
    fn edges_near_i32_max_do_not_overflow() {
        let mut v = cat_record();
        v["left"] = json!(2147483640);
        v["top"] = json!(i32::MAX);
        let w = ExtractedWord::from_engine_value(&v).unwrap();
        assert_eq!(w.left(), 2147483640);
        assert_eq!(w.right(), 2147483680);
        assert_eq!(w.bottom(), i64::from(i32::MAX) + 15);
        assert_eq!(w.end(), (2147483680, 2147483662));
        assert_eq!(w.bounding_box().right(), w.right());
    }

    #[test]
    fn confidence_keeps_engine_precision() {
        let mut v = cat_record();
        v["conf"] = json!(96.123456789);
        let w = ExtractedWord::from_engine_value(&v).unwrap();
        assert_eq!(w.confidence(), 96.123456789);
    }

    #[test]
    fn with_text_returns_new_value() {
        let original = ExtractedWord::from_engine_value(&cat_record()).unwrap();
        let fixed = original.clone().with_text("car").with_confidence(99.0);
        assert_eq!(original.text(), "cat");
        assert_eq!(fixed.text(), "car");
        assert_eq!(fixed.confidence(), 99.0);
        assert_eq!(fixed.end(), original.end());
    }

    #[test]
    fn serde_roundtrip_keeps_geometry() {
        let w = ExtractedWord::from_engine_value(&cat_record()).unwrap();
        let json = serde_json::to_string(&w).unwrap();
        let back: ExtractedWord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, w);
        assert_eq!(back.end(), (50, 35));
    }

    #[test]
    fn typed_record_converts_directly() {
        let record: EngineRecord = serde_json::from_value(cat_record()).unwrap();
        let w: ExtractedWord = record.into();
        assert_eq!(w.bounding_box(), BoundingBox::new(10, 20, 40, 15));
    }
}
