//! Core types for tone analysis results

use std::ops::Range;

use serde::Serialize;

/// A single scored tone returned by the analysis service.
///
/// Instances are immutable once built; a new analysis replaces the whole
/// [`AnalysisResult`] rather than editing entries in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToneCategory {
    id: String,
    name: String,
    /// Untrusted; usually within [0.0, 1.0] but never validated.
    score: f64,
}

impl ToneCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Score rendered as a whole percentage, e.g. `0.904` -> `"90%"`.
    pub fn percentage_label(&self) -> String {
        format!("{}%", (self.score * 100.0).round() as i64)
    }
}

/// The category a consecutive run of tones came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToneSection {
    pub id: String,
    pub name: String,
    /// Indices into [`AnalysisResult::tones`].
    pub range: Range<usize>,
}

/// Flat, ordered list of tones produced by one completed request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisResult {
    tones: Vec<ToneCategory>,
    sections: Vec<ToneSection>,
}

impl AnalysisResult {
    pub(crate) fn new(tones: Vec<ToneCategory>, sections: Vec<ToneSection>) -> Self {
        Self { tones, sections }
    }

    pub fn tones(&self) -> &[ToneCategory] {
        &self.tones
    }

    pub fn sections(&self) -> &[ToneSection] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.tones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ToneCategory> {
        self.tones.get(index)
    }
}
