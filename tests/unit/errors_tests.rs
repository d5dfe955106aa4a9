/*!
 * Tests for error types and conversions
 */

use slideline::errors::{AppError, ExportError, TimelineError};

#[test]
fn test_timelineError_invalidInput_shouldDisplayCorrectly() {
    let error = TimelineError::invalid_input("params must be an object");
    let display = format!("{}", error);
    assert!(display.contains("Invalid input"));
    assert!(display.contains("params must be an object"));
}

#[test]
fn test_exportError_invalidTimestamp_shouldDisplayCueAndTime() {
    let error = ExportError::InvalidTimestamp { cue: 3, seconds: -1.5 };
    let display = format!("{}", error);
    assert!(display.contains("cue 3"));
    assert!(display.contains("-1.5"));
}

#[test]
fn test_appError_fromTimelineError_shouldWrapCorrectly() {
    let app_error: AppError = TimelineError::invalid_input("length mismatch").into();
    assert!(matches!(app_error, AppError::Timeline(_)));
    assert!(app_error.to_string().contains("length mismatch"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::File(_)));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let app_error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(app_error, AppError::Unknown(_)));
    assert!(app_error.to_string().contains("something odd"));
}
