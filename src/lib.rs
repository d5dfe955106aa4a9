/*!
 * # slideline - caption and audio timelines for slideshow videos
 *
 * Given parallel lists of images, captions, audio clips and durations, slideline
 * splits each caption into sentences, pairs them with an evenly partitioned
 * English caption, and lays everything out on time-stamped timelines.
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `sentence_splitter`: Splits primary-language captions on `。！？`
 * - `partitioner`: Cuts English captions into a fixed number of word slots
 * - `timeline`: Request parsing, per-segment chunking and timeline assembly
 * - `validation`: Contiguity checks for built timelines
 * - `subtitle_export`: SRT rendering of caption timelines
 * - `app_config`: Configuration for the command line front end
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod file_utils;
pub mod partitioner;
pub mod sentence_splitter;
pub mod subtitle_export;
pub mod timeline;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ExportError, TimelineError};
pub use partitioner::split_by_count;
pub use sentence_splitter::split_sentences;
pub use timeline::{
    build_timeline, generate_timeline, AudioTimelineEntry, CaptionInput, CaptionTimelineEntry,
    SkippedSegment, TimelineOutcome, TimelineRequest, TimelineResult,
};
pub use validation::{TimelineIssue, TimelineValidator};
