// Hand landmark sources
// The hand-pose model lives outside this crate; sources hand over its per-frame output

use crate::models::hand::{FrameSize, LandmarkFrame};

pub mod replay;
pub use replay::{ReplayOptions, ReplaySource};

/// Yields one frame of landmarks at a time
pub trait LandmarkSource {
    /// Dimensions of the frames the landmarks were measured in
    fn frame_size(&self) -> FrameSize;

    /// Pull the next frame. `Ok(None)` means the stream has ended.
    fn next_frame(&mut self) -> SourceResult<Option<LandmarkFrame>>;
}

impl<S: LandmarkSource + ?Sized> LandmarkSource for Box<S> {
    fn frame_size(&self) -> FrameSize {
        (**self).frame_size()
    }

    fn next_frame(&mut self) -> SourceResult<Option<LandmarkFrame>> {
        (**self).next_frame()
    }
}

/// In-memory source, mostly for tests and scripted demos
pub struct VecSource {
    frame_size: FrameSize,
    frames: std::vec::IntoIter<LandmarkFrame>,
}

impl VecSource {
    pub fn new(frame_size: FrameSize, frames: Vec<LandmarkFrame>) -> Self {
        Self {
            frame_size,
            frames: frames.into_iter(),
        }
    }
}

impl LandmarkSource for VecSource {
    fn frame_size(&self) -> FrameSize {
        self.frame_size
    }

    fn next_frame(&mut self) -> SourceResult<Option<LandmarkFrame>> {
        Ok(self.frames.next())
    }
}

/// Replays another source at the pace of its timestamps
pub struct PacedSource<S> {
    inner: S,
    started: Option<(std::time::Instant, f64)>,
}

impl<S: LandmarkSource> PacedSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            started: None,
        }
    }
}

impl<S: LandmarkSource> LandmarkSource for PacedSource<S> {
    fn frame_size(&self) -> FrameSize {
        self.inner.frame_size()
    }

    fn next_frame(&mut self) -> SourceResult<Option<LandmarkFrame>> {
        let frame = match self.inner.next_frame()? {
            Some(frame) => frame,
            None => return Ok(None),
        };

        let (wall_start, first_timestamp) = *self
            .started
            .get_or_insert_with(|| (std::time::Instant::now(), frame.timestamp));
        let offset = frame.timestamp - first_timestamp;
        if offset > 0.0 {
            let due = std::time::Duration::try_from_secs_f64(offset)
                .ok()
                .and_then(|delay| wall_start.checked_add(delay))
                .ok_or(SourceError::Unpaceable {
                    timestamp: frame.timestamp,
                    first: first_timestamp,
                })?;
            let now = std::time::Instant::now();
            if due > now {
                std::thread::sleep(due - now);
            }
        }

        Ok(Some(frame))
    }
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read landmarks: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid landmark record on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Timestamp {timestamp} is too far after the first frame ({first}) to replay in real time")]
    Unpaceable { timestamp: f64, first: f64 },
}

pub type SourceResult<T> = Result<T, SourceError>;
