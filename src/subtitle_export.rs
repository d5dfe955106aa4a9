use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use log::debug;

use crate::errors::ExportError;
use crate::timeline::CaptionTimelineEntry;

// @module: SRT rendering of caption timelines

// @struct: Single SRT cue
#[derive(Debug, Clone, PartialEq)]
pub struct SrtCue {
    // @field: Sequence number, 1-based
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Cue lines
    pub lines: Vec<String>,
}

impl SrtCue {
    /// Build a cue from a caption timeline entry.
    ///
    /// Bounds are rounded to the millisecond independently, so cues built from a
    /// contiguous timeline stay contiguous.
    pub fn from_entry(seq_num: usize, entry: &CaptionTimelineEntry, bilingual: bool) -> Result<Self, ExportError> {
        let start_time_ms = seconds_to_millis(seq_num, entry.start_time)?;
        let end_time_ms = seconds_to_millis(seq_num, entry.end_time)?;

        let mut lines = vec![entry.text.clone()];
        if bilingual && !entry.text_en.trim().is_empty() {
            lines.push(entry.text_en.clone());
        }

        Ok(SrtCue {
            seq_num,
            start_time_ms,
            end_time_ms,
            lines,
        })
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for SrtCue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(
            f,
            "{} --> {}",
            Self::format_timestamp(self.start_time_ms),
            Self::format_timestamp(self.end_time_ms)
        )?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)
    }
}

fn seconds_to_millis(cue: usize, seconds: f64) -> Result<u64, ExportError> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ExportError::InvalidTimestamp { cue, seconds });
    }
    Ok((seconds * 1000.0).round() as u64)
}

/// Convert a caption timeline to numbered SRT cues
pub fn to_cues(entries: &[CaptionTimelineEntry], bilingual: bool) -> Result<Vec<SrtCue>, ExportError> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| SrtCue::from_entry(i + 1, entry, bilingual))
        .collect()
}

/// Render a caption timeline as SRT text
pub fn render_srt(entries: &[CaptionTimelineEntry], bilingual: bool) -> Result<String, ExportError> {
    let cues = to_cues(entries, bilingual)?;
    Ok(cues.iter().map(SrtCue::to_string).collect())
}

/// Write a caption timeline to an SRT file, creating parent directories
pub fn write_srt<P: AsRef<Path>>(path: P, entries: &[CaptionTimelineEntry], bilingual: bool) -> Result<(), ExportError> {
    let path = path.as_ref();
    let rendered = render_srt(entries, bilingual)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(path)?;
    file.write_all(rendered.as_bytes())?;

    debug!("Wrote {} cues to {}", entries.len(), path.display());
    Ok(())
}
