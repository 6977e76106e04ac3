// Replays recorded detector output from a JSON Lines file
//
// One record per line:
//   {"timestamp": 0.05, "handedness": "right", "landmarks": [[x, y, z], ...]}
// `landmarks` is null (or missing) when no hand was detected.

use super::{LandmarkSource, SourceError, SourceResult};
use crate::models::hand::{FrameSize, HandFrame, Handedness, Landmark, LandmarkFrame};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayOptions {
    /// Landmarks are in [0, 1] and must be scaled to pixels
    pub normalized: bool,
    /// Flip horizontally for selfie view
    pub mirror: bool,
}

#[derive(Debug, Deserialize)]
struct LandmarkRecord {
    timestamp: f64,
    #[serde(default)]
    handedness: Option<Handedness>,
    #[serde(default)]
    landmarks: Option<Vec<[f32; 3]>>,
}

pub struct ReplaySource<R> {
    reader: R,
    frame_size: FrameSize,
    options: ReplayOptions,
    line_number: usize,
    buffer: String,
}

impl ReplaySource<BufReader<File>> {
    pub fn open(path: &Path, frame_size: FrameSize, options: ReplayOptions) -> SourceResult<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), frame_size, options))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn new(reader: R, frame_size: FrameSize, options: ReplayOptions) -> Self {
        Self {
            reader,
            frame_size,
            options,
            line_number: 0,
            buffer: String::new(),
        }
    }

    fn parse_record(&self, line: &str) -> SourceResult<LandmarkFrame> {
        let record: LandmarkRecord =
            serde_json::from_str(line).map_err(|e| SourceError::Parse {
                line: self.line_number,
                message: e.to_string(),
            })?;

        if !record.timestamp.is_finite() {
            return Err(SourceError::Parse {
                line: self.line_number,
                message: format!("timestamp must be finite, got {}", record.timestamp),
            });
        }

        let hand = record.landmarks.and_then(|points| {
            let landmarks: Vec<Landmark> = points
                .iter()
                .map(|[x, y, z]| Landmark::new(*x, *y, *z))
                .collect();
            let frame = HandFrame::from_slice(&landmarks);
            if frame.is_none() {
                log::debug!(
                    "Line {}: only {} landmarks, treating as no hand",
                    self.line_number,
                    landmarks.len()
                );
            }
            frame
        });

        let hand = hand.map(|frame| {
            let frame = if self.options.normalized {
                frame.scaled(self.frame_size)
            } else {
                frame
            };
            if self.options.mirror {
                frame.mirrored(self.frame_size.width as f32)
            } else {
                frame
            }
        });

        Ok(LandmarkFrame {
            timestamp: record.timestamp,
            handedness: hand.as_ref().and(record.handedness),
            hand,
        })
    }
}

impl<R: BufRead> LandmarkSource for ReplaySource<R> {
    fn frame_size(&self) -> FrameSize {
        self.frame_size
    }

    fn next_frame(&mut self) -> SourceResult<Option<LandmarkFrame>> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buffer.trim();
            if line.is_empty() {
                continue;
            }

            return self.parse_record(line).map(Some);
        }
    }
}
