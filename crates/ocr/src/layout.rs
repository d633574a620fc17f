use billscan_core::BoundingBox;
use serde::{Deserialize, Serialize};

use crate::word::ExtractedWord;

/// Position of a line in the engine's page hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineKey {
    pub block: i32,
    pub par: i32,
    pub line: i32,
}

impl LineKey {
    pub fn of(word: &ExtractedWord) -> Self {
        Self {
            block: word.block(),
            par: word.par(),
            line: word.line(),
        }
    }
}

/// Words sharing one `(block, par, line)` position, ordered by word index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    key: LineKey,
    words: Vec<ExtractedWord>,
}

impl TextLine {
    pub fn key(&self) -> LineKey {
        self.key
    }

    pub fn words(&self) -> &[ExtractedWord] {
        &self.words
    }

    /// Word texts joined by single spaces; blank words are left out.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text().trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.words
            .iter()
            .map(ExtractedWord::bounding_box)
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or_default()
    }

    /// Mean over words that report a confidence; `None` when none do.
    pub fn mean_confidence(&self) -> Option<f64> {
        let scored: Vec<f64> = self
            .words
            .iter()
            .map(ExtractedWord::confidence)
            .filter(|c| *c >= 0.0)
            .collect();
        if scored.is_empty() {
            None
        } else {
            Some(scored.iter().sum::<f64>() / scored.len() as f64)
        }
    }
}

/// Group words into lines, keeping lines in first-seen order.
pub fn group_lines(words: &[ExtractedWord]) -> Vec<TextLine> {
    let mut lines: Vec<TextLine> = Vec::new();
    for word in words {
        let key = LineKey::of(word);
        match lines.iter_mut().find(|l| l.key == key) {
            Some(line) => line.words.push(word.clone()),
            None => lines.push(TextLine { key, words: vec![word.clone()] }),
        }
    }
    for line in &mut lines {
        line.words.sort_by_key(ExtractedWord::word);
    }
    tracing::debug!("Grouped {} words into {} lines", words.len(), lines.len());
    lines
}
