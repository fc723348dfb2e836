//! Per-tag label/percentage state and score-to-opacity mapping.

use crate::types::AnalysisResult;

const OPACITY_FLOOR: f64 = 0.3;
const OPACITY_RANGE: f64 = 0.7;

/// Which text a tag currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Label,
    Percentage,
}

/// Per-tag label/percentage toggles, indexed by position in the result.
#[derive(Debug, Clone, Default)]
pub struct TagDisplayState {
    modes: Vec<DisplayMode>,
}

impl TagDisplayState {
    pub fn new(len: usize) -> Self {
        Self {
            modes: vec![DisplayMode::Label; len],
        }
    }

    /// Sizes the state for a freshly installed result with every tag on `Label`.
    pub fn reset(&mut self, len: usize) {
        self.modes.clear();
        self.modes.resize(len, DisplayMode::Label);
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// # Panics
    /// When `index` is out of range; callers only toggle tags they rendered.
    pub fn mode(&self, index: usize) -> DisplayMode {
        self.modes[index]
    }

    /// Flips the tag at `index` and returns the text it should now show.
    ///
    /// # Panics
    /// When `index` is outside the current result.
    pub fn toggle(&mut self, index: usize, result: &AnalysisResult) -> String {
        let len = self.modes.len();
        let mode = self
            .modes
            .get_mut(index)
            .unwrap_or_else(|| panic!("tag index {index} out of range for {len} tags"));
        *mode = match *mode {
            DisplayMode::Label => DisplayMode::Percentage,
            DisplayMode::Percentage => DisplayMode::Label,
        };
        self.label_for(index, result)
    }

    /// Current text for the tag at `index` without changing it.
    ///
    /// # Panics
    /// When `index` is outside the current result.
    pub fn label_for(&self, index: usize, result: &AnalysisResult) -> String {
        let tone = result
            .get(index)
            .unwrap_or_else(|| panic!("tag index {index} out of range for {} tags", result.len()));
        match self.mode(index) {
            DisplayMode::Label => tone.name().to_string(),
            DisplayMode::Percentage => tone.percentage_label(),
        }
    }
}

/// Maps a score onto tag opacity: `[0, 1] -> [0.3, 1.0]`.
///
/// Scores outside `[0, 1]` are not clamped and produce opacities outside
/// `[0.3, 1.0]`; the renderer decides what to do with them.
pub fn opacity(score: f64) -> f64 {
    score * OPACITY_RANGE + OPACITY_FLOOR
}
