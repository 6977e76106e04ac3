// Camera space to screen space cursor mapping

use crate::models::hand::{FrameSize, Landmark};
use crate::models::input::{ScreenBounds, ScreenPoint};

/// Linear per-axis remap from camera pixels to screen pixels.
///
/// Expects coordinates that were already mirrored for selfie view; no flip
/// happens here. Holds no motion history.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    camera: FrameSize,
    screen: ScreenBounds,
}

impl CoordinateMapper {
    pub fn new(camera: FrameSize, screen: ScreenBounds) -> Self {
        Self { camera, screen }
    }

    pub fn camera(&self) -> FrameSize {
        self.camera
    }

    pub fn screen(&self) -> ScreenBounds {
        self.screen
    }

    pub fn map(&self, x: f32, y: f32) -> ScreenPoint {
        map_to_screen((x, y), self.camera, self.screen)
    }

    pub fn map_landmark(&self, landmark: &Landmark) -> ScreenPoint {
        self.map(landmark.x, landmark.y)
    }
}

/// Map a camera-space point onto the screen, clamped to `[0, dimension-1]` on each axis
pub fn map_to_screen(point: (f32, f32), camera: FrameSize, screen: ScreenBounds) -> ScreenPoint {
    let x = interpolate_axis(point.0, camera.width, screen.width);
    let y = interpolate_axis(point.1, camera.height, screen.height);
    screen.clamp(ScreenPoint::new(x, y))
}

fn interpolate_axis(value: f32, source: u32, target: u32) -> i32 {
    if source == 0 || target == 0 || !value.is_finite() {
        return 0;
    }
    let source = source as f64;
    let clamped = (value as f64).clamp(0.0, source);
    // `as` saturates, so an oversized target cannot wrap
    (clamped / source * target as f64).floor() as i32
}
