/*!
 * Integration tests for the request-to-timeline workflow
 */

use anyhow::Result;
use serde_json::Value;

use slideline::file_utils::FileManager;
use slideline::subtitle_export::write_srt;
use slideline::timeline::{generate_timeline, TimelineRequest, TimelineResult};
use slideline::validation::TimelineValidator;
use crate::common;

/// The canonical single-segment request resolves to two halves and one audio entry
#[test]
fn test_generate_timeline_withCanonicalRequest_shouldMatchExpectedTimelines() -> Result<()> {
    let request = TimelineRequest::from_json_str(
        r#"{
            "image_list": ["img1"],
            "cap_list": [{ "cap": "你好。世界！", "cap_en": "Hello world" }],
            "audio_list": ["a1"],
            "duration_list": [10]
        }"#,
    )?;

    let outcome = tokio_test::block_on(generate_timeline(&request))?;
    let json = serde_json::to_value(&outcome.result)?;

    assert_eq!(
        json["textTimelines"],
        serde_json::json!([
            { "startTime": 0.0, "endTime": 5.0, "text": "你好。", "text_en": "Hello" },
            { "startTime": 5.0, "endTime": 10.0, "text": "世界！", "text_en": "world" }
        ])
    );
    assert_eq!(
        json["audioTimelines"],
        serde_json::json!([{ "startTime": 0.0, "endTime": 10.0, "audio": "a1" }])
    );
    assert_eq!(json["subImageList"], serde_json::json!(["img1", "img1"]));
    assert_eq!(json["audioList"], serde_json::json!(["a1"]));
    assert_eq!(json["subcaptions"], serde_json::json!(["你好。", "世界！"]));
    assert_eq!(json["subcaptionsEn"], serde_json::json!(["Hello", "world"]));
    Ok(())
}

/// Build, validate, serialize and export a multi-segment request
#[test]
fn test_timeline_workflow_withFullProcess_shouldSucceed() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let request_path = common::create_test_file(temp_dir.path(), "slides.json", common::SAMPLE_REQUEST_JSON)?;

    // 1. Load and parse the request
    let content = FileManager::read_to_string(&request_path)?;
    let request = TimelineRequest::from_json_str(&content)?;

    // 2. Build the timelines
    let outcome = tokio_test::block_on(generate_timeline(&request))?;
    assert!(outcome.is_complete());
    assert_eq!(outcome.result.subcaptions, vec!["你好。", "世界！", "再见"]);
    assert_eq!(outcome.result.subcaptions_en, vec!["Hello", "world", "Goodbye"]);

    // 3. Both timelines are contiguous and span the same 14 seconds here
    let validator = TimelineValidator::new();
    let captions = validator.validate(&outcome.result.text_timelines);
    let audio = validator.validate(&outcome.result.audio_timelines);
    assert!(captions.passed(), "{:?}", captions.issues);
    assert!(audio.passed(), "{:?}", audio.issues);
    common::assert_time_eq(captions.total_duration, 14.0);
    common::assert_time_eq(audio.total_duration, 14.0);

    // 4. The serialized result reads back unchanged
    let output_path = FileManager::generate_output_path(&request_path, temp_dir.path(), "timeline.json");
    FileManager::write_to_file(&output_path, &serde_json::to_string_pretty(&outcome.result)?)?;
    let reloaded: TimelineResult = serde_json::from_str(&FileManager::read_to_string(&output_path)?)?;
    assert_eq!(reloaded, outcome.result);

    // 5. Export the captions as SRT
    let srt_path = FileManager::generate_output_path(&request_path, temp_dir.path(), "srt");
    write_srt(&srt_path, &outcome.result.text_timelines, true)?;
    let srt = FileManager::read_to_string(&srt_path)?;
    assert!(srt.contains("3\n00:00:10,000 --> 00:00:14,000\n再见\nGoodbye\n"));

    Ok(())
}

/// A request with an unusable caption still yields a usable timeline
#[test]
fn test_timeline_workflow_withBrokenCaption_shouldSkipAndKeepGoing() -> Result<()> {
    common::init_logging();
    let request = TimelineRequest::from_json_str(
        r#"{
            "image_list": ["img1", "img2", "img3"],
            "cap_list": [{ "cap": "第一张。" }, { "cap_en": "no primary caption" }, { "cap": "第三张！" }],
            "audio_list": ["a1", "a2", "a3"],
            "duration_list": [2, 3, 4]
        }"#,
    )?;

    let outcome = tokio_test::block_on(generate_timeline(&request))?;

    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].to_string(), "segment 1: caption is missing or not a string");
    assert_eq!(outcome.result.subcaptions, vec!["第一张。", "第三张！"]);
    common::assert_time_eq(outcome.result.caption_span(), 6.0);
    common::assert_time_eq(outcome.result.audio_span(), 9.0);

    let json: Value = serde_json::to_value(&outcome.result)?;
    assert_eq!(json["subImageList"], serde_json::json!(["img1", "img3"]));
    Ok(())
}

/// Shape errors stop the workflow before any timeline exists
#[test]
fn test_timeline_workflow_withInvalidShape_shouldFailEarly() {
    let result = TimelineRequest::from_json_str(
        r#"{ "image_list": [], "cap_list": {}, "audio_list": [], "duration_list": [] }"#,
    );
    assert!(result.is_err());
}
