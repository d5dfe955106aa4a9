/*!
 * Caption and audio timeline construction.
 *
 * A request carries four parallel lists (images, captions, audio clips and
 * durations in seconds). Each caption is split into sentences, the optional
 * English caption is partitioned to match, and the segment duration is shared
 * equally between the sentences. The rows are then laid end to end on a caption
 * timeline, while the audio clips get their own timeline from the raw segment
 * durations.
 */

use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::TimelineError;
use crate::partitioner::split_by_count;
use crate::sentence_splitter::split_sentences;

// @const: Microseconds per second, the unit of editor time ranges
const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Convert seconds to whole microseconds, rounding to the nearest one
pub fn seconds_to_microseconds(seconds: f64) -> i64 {
    (seconds * MICROS_PER_SECOND).round() as i64
}

/// Anything laid out on a timeline, in seconds from the start of the sequence
pub trait TimeSpan {
    fn start_time(&self) -> f64;
    fn end_time(&self) -> f64;

    fn duration(&self) -> f64 {
        self.end_time() - self.start_time()
    }

    fn start_us(&self) -> i64 {
        seconds_to_microseconds(self.start_time())
    }

    fn end_us(&self) -> i64 {
        seconds_to_microseconds(self.end_time())
    }

    /// Duration derived from the rounded bounds so consecutive spans tile exactly
    fn duration_us(&self) -> i64 {
        self.end_us() - self.start_us()
    }
}

// @struct: Caption of one segment
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CaptionInput {
    // @field: Primary-language caption, None when missing or not a string
    pub cap: Option<String>,

    // @field: English caption, None when missing or not a string
    pub cap_en: Option<String>,
}

impl CaptionInput {
    pub fn new(cap: impl Into<String>, cap_en: Option<&str>) -> Self {
        Self {
            cap: Some(cap.into()),
            cap_en: cap_en.map(str::to_string),
        }
    }

    fn from_value(value: &Value) -> Self {
        let text_field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            cap: text_field("cap"),
            cap_en: text_field("cap_en"),
        }
    }
}

/// Parallel input lists describing a slideshow
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TimelineRequest {
    /// Image reference per segment; may be shorter than `cap_list`
    pub image_list: Vec<String>,

    /// Captions, one per segment
    pub cap_list: Vec<CaptionInput>,

    /// Audio clip references, laid out with `duration_list`
    pub audio_list: Vec<String>,

    /// Segment durations in seconds, same length as `cap_list`
    pub duration_list: Vec<f64>,
}

impl TimelineRequest {
    pub fn new(
        image_list: Vec<String>,
        cap_list: Vec<CaptionInput>,
        audio_list: Vec<String>,
        duration_list: Vec<f64>,
    ) -> Self {
        Self {
            image_list,
            cap_list,
            audio_list,
            duration_list,
        }
    }

    /// Parse a request from JSON text, checking its shape
    pub fn from_json_str(json: &str) -> Result<Self, TimelineError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| TimelineError::invalid_input(format!("params are not valid JSON: {}", e)))?;
        Self::from_value(&value)
    }

    /// Build a request from an untyped parameter object.
    ///
    /// The object must carry the four lists as arrays. Captions are read
    /// leniently (a non-string `cap` is treated as missing and skipped later),
    /// but references must be strings and durations must be numbers.
    pub fn from_value(params: &Value) -> Result<Self, TimelineError> {
        let object = params
            .as_object()
            .ok_or_else(|| TimelineError::invalid_input("params must be an object"))?;

        let images = array_field(object, "image_list")?;
        let captions = array_field(object, "cap_list")?;
        let audio = array_field(object, "audio_list")?;
        let durations = array_field(object, "duration_list")?;

        let duration_list = durations
            .iter()
            .enumerate()
            .map(|(i, value)| {
                value.as_f64().ok_or_else(|| {
                    TimelineError::invalid_input(format!("duration_list[{}] must be a number, got {}", i, value))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            image_list: string_list("image_list", images)?,
            cap_list: captions.iter().map(CaptionInput::from_value).collect(),
            audio_list: string_list("audio_list", audio)?,
            duration_list,
        })
    }

    /// Check the structural invariants that make a timeline possible
    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.cap_list.len() != self.duration_list.len() {
            return Err(TimelineError::invalid_input(format!(
                "cap_list and duration_list must have the same length ({} != {})",
                self.cap_list.len(),
                self.duration_list.len()
            )));
        }

        if let Some((i, duration)) = self
            .duration_list
            .iter()
            .enumerate()
            .find(|(_, d)| !d.is_finite() || **d < 0.0)
        {
            return Err(TimelineError::invalid_input(format!(
                "duration_list[{}] must be a non-negative number, got {}",
                i, duration
            )));
        }

        Ok(())
    }
}

fn array_field<'a>(object: &'a Map<String, Value>, name: &str) -> Result<&'a Vec<Value>, TimelineError> {
    object
        .get(name)
        .and_then(Value::as_array)
        .ok_or_else(|| TimelineError::invalid_input(format!("{} must be an array", name)))
}

fn string_list(name: &str, values: &[Value]) -> Result<Vec<String>, TimelineError> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            value.as_str().map(str::to_string).ok_or_else(|| {
                TimelineError::invalid_input(format!("{}[{}] must be a string, got {}", name, i, value))
            })
        })
        .collect()
}

/// Caption shown over `[start_time, end_time)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTimelineEntry {
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
    #[serde(rename = "text_en")]
    pub text_en: String,
}

impl TimeSpan for CaptionTimelineEntry {
    fn start_time(&self) -> f64 {
        self.start_time
    }

    fn end_time(&self) -> f64 {
        self.end_time
    }
}

/// Audio clip played over `[start_time, end_time)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTimelineEntry {
    pub start_time: f64,
    pub end_time: f64,
    pub audio: String,
}

impl TimeSpan for AudioTimelineEntry {
    fn start_time(&self) -> f64 {
        self.start_time
    }

    fn end_time(&self) -> f64 {
        self.end_time
    }
}

/// Timelines produced for one request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResult {
    /// Image of the segment each caption row belongs to
    pub sub_image_list: Vec<Option<String>>,
    /// The request's audio list, unchanged
    pub audio_list: Vec<String>,
    pub text_timelines: Vec<CaptionTimelineEntry>,
    /// Caption texts, aligned with `text_timelines`
    pub subcaptions: Vec<String>,
    pub audio_timelines: Vec<AudioTimelineEntry>,
    /// English texts, aligned with `text_timelines`
    pub subcaptions_en: Vec<String>,
}

impl TimelineResult {
    /// End of the caption timeline in seconds
    pub fn caption_span(&self) -> f64 {
        self.text_timelines.last().map_or(0.0, |e| e.end_time)
    }

    /// End of the audio timeline in seconds
    pub fn audio_span(&self) -> f64 {
        self.audio_timelines.last().map_or(0.0, |e| e.end_time)
    }
}

/// Why a segment contributed no caption rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedSegment {
    /// `cap` is absent or not a string
    MissingCaption,
    /// `cap` is empty after trimming
    BlankCaption,
}

impl fmt::Display for MalformedSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCaption => write!(f, "caption is missing or not a string"),
            Self::BlankCaption => write!(f, "caption is blank"),
        }
    }
}

/// Diagnostic for a segment skipped during building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedSegment {
    /// Index into `cap_list`
    pub index: usize,
    pub reason: MalformedSegment,
}

impl fmt::Display for SkippedSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "segment {}: {}", self.index, self.reason)
    }
}

/// A built timeline together with the segments that were left out
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimelineOutcome {
    pub result: TimelineResult,
    pub skipped: Vec<SkippedSegment>,
}

impl TimelineOutcome {
    /// True when every segment produced caption rows
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

// @struct: Sentence-level caption row before it is placed on the timeline
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkRow {
    pub text: String,
    pub text_en: String,
    pub duration: f64,
    pub image: Option<String>,
}

/// Split every segment of the request into sentence rows.
///
/// Segments whose caption is missing or blank are reported in `skipped` and
/// produce no rows.
pub fn chunk_segments(request: &TimelineRequest, skipped: &mut Vec<SkippedSegment>) -> Vec<ChunkRow> {
    let mut rows = Vec::new();

    for (i, (caption, &total_duration)) in request.cap_list.iter().zip(&request.duration_list).enumerate() {
        let text = match caption.cap.as_deref() {
            None => {
                warn!("Invalid caption at index {}: missing or not a string", i);
                skipped.push(SkippedSegment { index: i, reason: MalformedSegment::MissingCaption });
                continue;
            }
            Some(text) if text.trim().is_empty() => {
                warn!("Invalid caption at index {}: blank", i);
                skipped.push(SkippedSegment { index: i, reason: MalformedSegment::BlankCaption });
                continue;
            }
            Some(text) => text,
        };
        let text_en = caption.cap_en.as_deref().unwrap_or_default();
        let image = request.image_list.get(i).cloned();

        let sentences = split_sentences(text);
        let english = split_by_count(text_en, sentences.len());

        if sentences.is_empty() {
            rows.push(ChunkRow {
                text: text.to_string(),
                text_en: text_en.to_string(),
                duration: total_duration,
                image,
            });
            continue;
        }

        let per_chunk = total_duration / sentences.len() as f64;
        debug!(
            "Segment {}: {} sentences of {:.3}s each",
            i,
            sentences.len(),
            per_chunk
        );

        for (j, sentence) in sentences.into_iter().enumerate() {
            rows.push(ChunkRow {
                text: sentence,
                text_en: english.get(j).cloned().unwrap_or_default(),
                duration: per_chunk,
                image: image.clone(),
            });
        }
    }

    rows
}

/// Build the caption and audio timelines for a request.
///
/// Structural problems fail the whole call with `InvalidInput`; malformed
/// captions only drop their own segment.
pub fn build_timeline(request: &TimelineRequest) -> Result<TimelineOutcome, TimelineError> {
    request.validate()?;

    let mut skipped = Vec::new();
    let rows = chunk_segments(request, &mut skipped);

    let mut result = TimelineResult {
        audio_list: request.audio_list.clone(),
        ..TimelineResult::default()
    };

    let mut cursor = 0.0;
    for row in rows {
        let end_time = cursor + row.duration;
        result.text_timelines.push(CaptionTimelineEntry {
            start_time: cursor,
            end_time,
            text: row.text.clone(),
            text_en: row.text_en.clone(),
        });
        result.subcaptions.push(row.text);
        result.subcaptions_en.push(row.text_en);
        result.sub_image_list.push(row.image);
        cursor = end_time;
    }

    if request.audio_list.len() > request.duration_list.len() {
        warn!(
            "audio_list has {} clips but only {} durations; extra clips get zero length",
            request.audio_list.len(),
            request.duration_list.len()
        );
    }

    let mut audio_cursor = 0.0;
    for (i, audio) in request.audio_list.iter().enumerate() {
        let end_time = audio_cursor + request.duration_list.get(i).copied().unwrap_or(0.0);
        result.audio_timelines.push(AudioTimelineEntry {
            start_time: audio_cursor,
            end_time,
            audio: audio.clone(),
        });
        audio_cursor = end_time;
    }

    debug!(
        "Built {} caption entries ({:.3}s) and {} audio entries ({:.3}s), {} segments skipped",
        result.text_timelines.len(),
        result.caption_span(),
        result.audio_timelines.len(),
        result.audio_span(),
        skipped.len()
    );

    Ok(TimelineOutcome { result, skipped })
}

/// Asynchronous entry point for hosts that await their handlers.
///
/// The work is synchronous; this resolves as soon as it is polled.
pub async fn generate_timeline(request: &TimelineRequest) -> Result<TimelineOutcome, TimelineError> {
    build_timeline(request)
}
