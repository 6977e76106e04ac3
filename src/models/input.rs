// Data models for mouse output (screen geometry and sink errors)

use serde::{Deserialize, Serialize};

/// Integer cursor position on the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Display size, queried once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenBounds {
    pub width: u32,
    pub height: u32,
}

impl ScreenBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as i64) < self.width as i64
            && (point.y as i64) < self.height as i64
    }

    /// Clamp a point to `[0, width-1] x [0, height-1]`
    pub fn clamp(&self, point: ScreenPoint) -> ScreenPoint {
        ScreenPoint {
            x: clamp_axis(point.x, self.width),
            y: clamp_axis(point.y, self.height),
        }
    }
}

fn clamp_axis(value: i32, dimension: u32) -> i32 {
    let max = dimension.saturating_sub(1).min(i32::MAX as u32) as i32;
    value.clamp(0, max)
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Input backend unavailable: {0}")]
    Unavailable(String),

    #[error("Input action failed: {0}")]
    Failed(String),

    #[error("Not supported on this platform")]
    NotSupported,
}

pub type InputResult<T> = Result<T, InputError>;
