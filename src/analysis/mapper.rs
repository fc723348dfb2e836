//! Normalises tone analysis responses into a flat list of tags.
//!
//! The service has returned two shapes over its lifetime: tones nested under
//! `tone_categories`, and a single flat `tones` list. Both map to the same
//! ordered [`AnalysisResult`], with one [`ToneSection`] per source category.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::types::{AnalysisResult, ToneCategory, ToneSection};

const DOCUMENT_SECTION_ID: &str = "document_tone";
const DOCUMENT_SECTION_NAME: &str = "Document Tone";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("response payload is absent")]
    NoResult,
    #[error("response contains no tone data")]
    NoCategories,
}

/// Tone analysis payload as returned by the service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToneResponse {
    #[serde(default)]
    pub document_tone: Option<DocumentTone>,
}

/// Document-level tones. Older API versions nest tones under
/// `tone_categories`; newer ones return a flat `tones` list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentTone {
    #[serde(default)]
    pub tone_categories: Option<Vec<RawCategory>>,
    #[serde(default)]
    pub tones: Option<Vec<RawTone>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCategory {
    pub category_id: String,
    pub category_name: String,
    #[serde(default)]
    pub tones: Vec<RawTone>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTone {
    pub tone_id: String,
    pub tone_name: String,
    pub score: f64,
}

/// Flattens a service response into tags in API order.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseMapper;

impl ResponseMapper {
    pub fn new() -> Self {
        Self
    }

    /// Decodes a response body. A JSON `null` body yields `None`.
    pub fn parse(body: &str) -> serde_json::Result<Option<ToneResponse>> {
        serde_json::from_str(body)
    }

    pub fn map(&self, raw: Option<&ToneResponse>) -> Result<AnalysisResult, MappingError> {
        let response = raw.ok_or(MappingError::NoResult)?;
        let document = response
            .document_tone
            .as_ref()
            .ok_or(MappingError::NoCategories)?;
        if document.tone_categories.is_none() && document.tones.is_none() {
            return Err(MappingError::NoCategories);
        }

        let mut builder = ResultBuilder::default();
        for category in document.tone_categories.iter().flatten() {
            builder.push_section(
                &category.category_id,
                &category.category_name,
                &category.tones,
            );
        }
        if let Some(tones) = &document.tones {
            builder.push_section(DOCUMENT_SECTION_ID, DOCUMENT_SECTION_NAME, tones);
        }

        if builder.tones.is_empty() {
            return Err(MappingError::NoCategories);
        }
        debug!(
            tones = builder.tones.len(),
            sections = builder.sections.len(),
            "mapped tone response"
        );
        Ok(AnalysisResult::new(builder.tones, builder.sections))
    }
}

#[derive(Default)]
struct ResultBuilder {
    tones: Vec<ToneCategory>,
    sections: Vec<ToneSection>,
}

impl ResultBuilder {
    fn push_section(&mut self, id: &str, name: &str, tones: &[RawTone]) {
        let start = self.tones.len();
        self.tones.extend(
            tones
                .iter()
                .map(|tone| ToneCategory::new(&tone.tone_id, &tone.tone_name, tone.score)),
        );
        self.sections.push(ToneSection {
            id: id.to_string(),
            name: name.to_string(),
            range: start..self.tones.len(),
        });
    }
}
