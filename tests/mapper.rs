use std::fs;
use std::path::PathBuf;

use toneanalyzer::analysis::{MappingError, ResponseMapper};
use toneanalyzer::types::AnalysisResult;

fn map_fixture(name: &str) -> Result<AnalysisResult, MappingError> {
    let body = fs::read_to_string(fixture_path(name)).expect("fixture should be readable");
    let raw = ResponseMapper::parse(&body).expect("fixture should be valid JSON");
    ResponseMapper::new().map(raw.as_ref())
}

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/responses")
        .join(format!("{name}.json"))
}

#[test]
fn nested_categories_flatten_in_api_order() {
    let result = map_fixture("nested").unwrap();

    assert_eq!(result.len(), 5 + 3 + 5);
    let ids: Vec<&str> = result.tones().iter().map(|tone| tone.id()).collect();
    assert_eq!(&ids[..6], ["anger", "disgust", "fear", "joy", "sadness", "analytical"]);
    assert_eq!(ids.last(), Some(&"emotional_range_big5"));

    let names: Vec<&str> = result.sections().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Emotion Tone", "Language Tone", "Social Tone"]);
    assert_eq!(result.sections()[1].range, 5..8);
}

#[test]
fn sections_partition_the_flat_list() {
    let result = map_fixture("nested").unwrap();
    let mut expected_start = 0;
    for section in result.sections() {
        assert_eq!(section.range.start, expected_start);
        expected_start = section.range.end;
    }
    assert_eq!(expected_start, result.len());
}

#[test]
fn flat_shape_keeps_duplicates_and_order() {
    let result = map_fixture("flat").unwrap();
    let scores: Vec<f64> = result.tones().iter().map(|tone| tone.score()).collect();
    assert_eq!(scores, [0.904, 0.66, 0.5]);
    assert_eq!(result.sections().len(), 1);
    assert_eq!(result.sections()[0].id, "document_tone");
}

#[test]
fn both_shapes_agree_on_equivalent_data() {
    let nested = ResponseMapper::parse(
        r#"{"document_tone": {"tone_categories": [
            {"category_id": "emotion", "category_name": "Emotion", "tones": [
                {"tone_id": "joy", "tone_name": "Joy", "score": 0.9}
            ]}
        ]}}"#,
    )
    .unwrap();
    let flat = ResponseMapper::parse(
        r#"{"document_tone": {"tones": [
            {"tone_id": "joy", "tone_name": "Joy", "score": 0.9}
        ]}}"#,
    )
    .unwrap();
    let mapper = ResponseMapper::new();
    assert_eq!(
        mapper.map(nested.as_ref()).unwrap().tones(),
        mapper.map(flat.as_ref()).unwrap().tones()
    );
}

#[test]
fn response_without_document_tone_has_no_categories() {
    assert_eq!(
        map_fixture("no_categories"),
        Err(MappingError::NoCategories)
    );
}

#[test]
fn absent_payload_has_no_result() {
    assert_eq!(ResponseMapper::new().map(None), Err(MappingError::NoResult));
}
