// Data models for hand tracking (21 keypoints per hand)

use serde::{Deserialize, Serialize};

/// Number of landmarks in a complete hand
pub const HAND_LANDMARK_COUNT: usize = 21;

// ==============================================================================
// Landmark
// ==============================================================================

/// A single hand landmark in camera pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32, // Pixels, post-mirror
    pub y: f32, // Pixels, grows downward
    pub z: f32, // Depth relative to the wrist
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in the image plane, ignoring depth
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// ==============================================================================
// Landmark Indices
// ==============================================================================

/// MediaPipe Hand Landmark indices (21 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexFingerMcp = 5,
    IndexFingerPip = 6,
    IndexFingerDip = 7,
    IndexFingerTip = 8,
    MiddleFingerMcp = 9,
    MiddleFingerPip = 10,
    MiddleFingerDip = 11,
    MiddleFingerTip = 12,
    RingFingerMcp = 13,
    RingFingerPip = 14,
    RingFingerDip = 15,
    RingFingerTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandLandmark {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Hand skeleton connections, wrist outward along each finger
pub const HAND_CONNECTIONS: [(HandLandmark, HandLandmark); 20] = {
    use HandLandmark::*;
    [
        // Thumb
        (Wrist, ThumbCmc),
        (ThumbCmc, ThumbMcp),
        (ThumbMcp, ThumbIp),
        (ThumbIp, ThumbTip),
        // Index
        (Wrist, IndexFingerMcp),
        (IndexFingerMcp, IndexFingerPip),
        (IndexFingerPip, IndexFingerDip),
        (IndexFingerDip, IndexFingerTip),
        // Middle
        (Wrist, MiddleFingerMcp),
        (MiddleFingerMcp, MiddleFingerPip),
        (MiddleFingerPip, MiddleFingerDip),
        (MiddleFingerDip, MiddleFingerTip),
        // Ring
        (Wrist, RingFingerMcp),
        (RingFingerMcp, RingFingerPip),
        (RingFingerPip, RingFingerDip),
        (RingFingerDip, RingFingerTip),
        // Pinky
        (Wrist, PinkyMcp),
        (PinkyMcp, PinkyPip),
        (PinkyPip, PinkyDip),
        (PinkyDip, PinkyTip),
    ]
};

/// The four non-thumb fingers used for extension checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub fn tip(self) -> HandLandmark {
        match self {
            Finger::Index => HandLandmark::IndexFingerTip,
            Finger::Middle => HandLandmark::MiddleFingerTip,
            Finger::Ring => HandLandmark::RingFingerTip,
            Finger::Pinky => HandLandmark::PinkyTip,
        }
    }

    pub fn pip(self) -> HandLandmark {
        match self {
            Finger::Index => HandLandmark::IndexFingerPip,
            Finger::Middle => HandLandmark::MiddleFingerPip,
            Finger::Ring => HandLandmark::RingFingerPip,
            Finger::Pinky => HandLandmark::PinkyPip,
        }
    }
}

// ==============================================================================
// Hand Frame
// ==============================================================================

/// A complete set of 21 landmarks for one detected hand.
///
/// A frame is either fully populated or it does not exist: lists with fewer
/// than 21 landmarks are rejected by [`HandFrame::from_slice`].
#[derive(Debug, Clone, PartialEq)]
pub struct HandFrame {
    landmarks: [Landmark; HAND_LANDMARK_COUNT],
}

impl HandFrame {
    pub fn new(landmarks: [Landmark; HAND_LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    /// Build a frame from a detector's landmark list.
    ///
    /// Fewer than 21 points is malformed; extra trailing points are ignored.
    pub fn from_slice(landmarks: &[Landmark]) -> Option<Self> {
        let landmarks: [Landmark; HAND_LANDMARK_COUNT] =
            landmarks.get(..HAND_LANDMARK_COUNT)?.try_into().ok()?;
        Some(Self { landmarks })
    }

    pub fn get(&self, landmark: HandLandmark) -> &Landmark {
        &self.landmarks[landmark.index()]
    }

    pub fn landmarks(&self) -> &[Landmark; HAND_LANDMARK_COUNT] {
        &self.landmarks
    }

    /// Flip horizontally within a frame of the given width (selfie view)
    pub fn mirrored(&self, frame_width: f32) -> Self {
        let mut landmarks = self.landmarks;
        for lm in landmarks.iter_mut() {
            lm.x = frame_width - lm.x;
        }
        Self { landmarks }
    }

    /// Scale normalized [0, 1] coordinates to pixels
    pub fn scaled(&self, frame_size: FrameSize) -> Self {
        let mut landmarks = self.landmarks;
        for lm in landmarks.iter_mut() {
            lm.x *= frame_size.width as f32;
            lm.y *= frame_size.height as f32;
        }
        Self { landmarks }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    #[serde(alias = "Left")]
    Left,
    #[serde(alias = "Right")]
    Right,
}

impl Handedness {
    pub fn to_string(&self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
        }
    }
}

/// Camera frame dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// One pull from a landmark source
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    pub timestamp: f64, // Seconds
    pub hand: Option<HandFrame>,
    pub handedness: Option<Handedness>,
}

impl LandmarkFrame {
    pub fn empty(timestamp: f64) -> Self {
        Self {
            timestamp,
            hand: None,
            handedness: None,
        }
    }

    pub fn with_hand(timestamp: f64, hand: HandFrame) -> Self {
        Self {
            timestamp,
            hand: Some(hand),
            handedness: None,
        }
    }
}
