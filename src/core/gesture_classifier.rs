// Rule-based gesture classification from a single frame of hand landmarks

use crate::core::config::{Config, ExtensionConvention};
use crate::models::gesture::{Gesture, GestureResult};
use crate::models::hand::{Finger, HandFrame, HandLandmark, Landmark};

/// Per-frame finger measurements the rules are evaluated against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerMetrics {
    pub index_extended: bool,
    pub middle_extended: bool,
    pub ring_extended: bool,
    pub pinky_extended: bool,
    pub thumb_index_dist: f32,
    pub index_middle_dist: f32,
    pub middle_ring_dist: f32,
    pub ring_pinky_dist: f32,
}

/// A gesture with the confidence it reports and the condition that selects it
struct GestureRule {
    gesture: Gesture,
    confidence: f32,
    matches: fn(&FingerMetrics, f32) -> bool,
}

/// Evaluated top to bottom; the first matching rule wins.
const RULES: [GestureRule; 4] = [
    // Index and middle extended and pressed together
    GestureRule {
        gesture: Gesture::LeftClick,
        confidence: 0.9,
        matches: |m, threshold| {
            m.index_extended && m.middle_extended && m.index_middle_dist < threshold
        },
    },
    // Middle and ring extended and pressed together
    GestureRule {
        gesture: Gesture::RightClick,
        confidence: 0.9,
        matches: |m, threshold| {
            m.middle_extended && m.ring_extended && m.middle_ring_dist < threshold
        },
    },
    // Index, middle and ring extended and all together.
    // Shadowed by LeftClick whenever it holds.
    GestureRule {
        gesture: Gesture::ScrollUp,
        confidence: 0.8,
        matches: |m, threshold| {
            m.index_extended
                && m.middle_extended
                && m.ring_extended
                && m.index_middle_dist < threshold
                && m.middle_ring_dist < threshold
        },
    },
    // Pinky extended alongside index and middle, spacing ignored
    GestureRule {
        gesture: Gesture::ScrollDown,
        confidence: 0.8,
        matches: |m, _| m.pinky_extended && m.index_extended && m.middle_extended,
    },
];

/// Stateless classifier; every call looks at one frame only.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    distance_threshold: f32,
    convention: ExtensionConvention,
}

impl GestureClassifier {
    pub fn new(distance_threshold: f32, convention: ExtensionConvention) -> Self {
        Self {
            distance_threshold,
            convention,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.distance_threshold, config.extension_convention)
    }

    pub fn distance_threshold(&self) -> f32 {
        self.distance_threshold
    }

    /// Classify a frame. An absent hand is never a gesture.
    pub fn classify(&self, frame: Option<&HandFrame>) -> GestureResult {
        match frame {
            Some(frame) => self.classify_frame(frame),
            None => GestureResult::none(),
        }
    }

    /// Classify a raw landmark list.
    ///
    /// Fewer than 21 points is treated as no hand; points past the 21st are ignored.
    pub fn classify_landmarks(&self, landmarks: &[Landmark]) -> GestureResult {
        self.classify(HandFrame::from_slice(landmarks).as_ref())
    }

    fn classify_frame(&self, frame: &HandFrame) -> GestureResult {
        let metrics = self.measure(frame);

        RULES
            .iter()
            .find(|rule| (rule.matches)(&metrics, self.distance_threshold))
            .map(|rule| GestureResult::new(rule.gesture, rule.confidence))
            .unwrap_or_else(GestureResult::none)
    }

    pub fn measure(&self, frame: &HandFrame) -> FingerMetrics {
        let thumb = frame.get(HandLandmark::ThumbTip);
        let index = frame.get(Finger::Index.tip());
        let middle = frame.get(Finger::Middle.tip());
        let ring = frame.get(Finger::Ring.tip());
        let pinky = frame.get(Finger::Pinky.tip());

        FingerMetrics {
            index_extended: self.is_extended(frame, Finger::Index),
            middle_extended: self.is_extended(frame, Finger::Middle),
            ring_extended: self.is_extended(frame, Finger::Ring),
            pinky_extended: self.is_extended(frame, Finger::Pinky),
            thumb_index_dist: thumb.planar_distance(index),
            index_middle_dist: index.planar_distance(middle),
            middle_ring_dist: middle.planar_distance(ring),
            ring_pinky_dist: ring.planar_distance(pinky),
        }
    }

    fn is_extended(&self, frame: &HandFrame, finger: Finger) -> bool {
        let tip = frame.get(finger.tip());
        let pip = frame.get(finger.pip());
        match self.convention {
            ExtensionConvention::TipBelowPip => tip.y > pip.y,
            ExtensionConvention::TipAbovePip => tip.y < pip.y,
        }
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds hands where each finger's tip sits 40px below (extended) or above (curled)
    /// its PIP joint, with fingertips spaced horizontally by a chosen gap.
    pub(crate) struct HandBuilder {
        landmarks: Vec<Landmark>,
    }

    impl HandBuilder {
        pub(crate) fn new() -> Self {
            let mut builder = Self {
                landmarks: vec![Landmark::new(600.0, 300.0, 0.0); 21],
            };
            builder.landmarks[HandLandmark::ThumbTip.index()] = Landmark::new(450.0, 300.0, 0.0);
            for (i, finger) in [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky]
                .into_iter()
                .enumerate()
            {
                let x = 500.0 + 100.0 * i as f32;
                builder.landmarks[finger.pip().index()] = Landmark::new(x, 300.0, 0.0);
                builder.landmarks[finger.tip().index()] = Landmark::new(x, 260.0, 0.0);
            }
            builder
        }

        pub(crate) fn extend(mut self, finger: Finger) -> Self {
            let pip = self.landmarks[finger.pip().index()];
            let tip = &mut self.landmarks[finger.tip().index()];
            tip.y = pip.y + 40.0;
            self
        }

        /// Place `finger`'s tip `gap` pixels to the right of `anchor`'s tip
        pub(crate) fn beside(mut self, anchor: Finger, finger: Finger, gap: f32) -> Self {
            let anchor_tip = self.landmarks[anchor.tip().index()];
            let tip = &mut self.landmarks[finger.tip().index()];
            tip.x = anchor_tip.x + gap;
            tip.y = anchor_tip.y;
            self
        }

        pub(crate) fn tip_at(mut self, landmark: HandLandmark, x: f32, y: f32) -> Self {
            self.landmarks[landmark.index()] = Landmark::new(x, y, 0.0);
            self
        }

        pub(crate) fn landmarks(&self) -> &[Landmark] {
            &self.landmarks
        }

        pub(crate) fn build(self) -> HandFrame {
            HandFrame::from_slice(&self.landmarks).expect("builder always holds 21 landmarks")
        }
    }

    /// Index and middle extended and 10px apart
    pub(crate) fn left_click_hand() -> HandFrame {
        HandBuilder::new()
            .extend(Finger::Index)
            .extend(Finger::Middle)
            .beside(Finger::Index, Finger::Middle, 10.0)
            .build()
    }

    fn classify(frame: &HandFrame) -> GestureResult {
        GestureClassifier::default().classify(Some(frame))
    }

    #[test]
    fn test_absent_or_partial_frame_is_none() {
        let classifier = GestureClassifier::default();
        assert_eq!(classifier.classify(None), GestureResult::none());

        let builder = HandBuilder::new().extend(Finger::Index).extend(Finger::Middle);
        let partial = &builder.landmarks()[..20];
        assert_eq!(classifier.classify_landmarks(partial), GestureResult::none());
        assert_eq!(classifier.classify_landmarks(&[]), GestureResult::none());
    }

    #[test]
    fn test_extra_landmarks_are_ignored() {
        let classifier = GestureClassifier::default();
        let mut landmarks = left_click_hand().landmarks().to_vec();
        landmarks.push(Landmark::new(0.0, 0.0, 0.0));
        assert_eq!(
            classifier.classify_landmarks(&landmarks).gesture,
            Gesture::LeftClick
        );
    }

    #[test]
    fn test_open_hand_with_spread_fingers_is_none() {
        let frame = HandBuilder::new().build();
        assert_eq!(classify(&frame), GestureResult::none());
    }

    #[test]
    fn test_left_click() {
        let result = classify(&left_click_hand());
        assert_eq!(result.gesture, Gesture::LeftClick);
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn test_left_click_regardless_of_other_fingers() {
        for (ring, pinky) in [(false, false), (true, false), (false, true), (true, true)] {
            let mut builder = HandBuilder::new()
                .extend(Finger::Index)
                .extend(Finger::Middle)
                .beside(Finger::Index, Finger::Middle, 10.0)
                .beside(Finger::Middle, Finger::Ring, 10.0);
            if ring {
                builder = builder.extend(Finger::Ring);
            }
            if pinky {
                builder = builder.extend(Finger::Pinky);
            }
            assert_eq!(classify(&builder.build()).gesture, Gesture::LeftClick);
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let at_threshold = HandBuilder::new()
            .extend(Finger::Index)
            .extend(Finger::Middle)
            .beside(Finger::Index, Finger::Middle, 30.0)
            .build();
        assert_eq!(classify(&at_threshold).gesture, Gesture::None);

        let just_under = HandBuilder::new()
            .extend(Finger::Index)
            .extend(Finger::Middle)
            .beside(Finger::Index, Finger::Middle, 29.5)
            .build();
        assert_eq!(classify(&just_under).gesture, Gesture::LeftClick);
    }

    #[test]
    fn test_right_click_when_index_curled() {
        let frame = HandBuilder::new()
            .extend(Finger::Middle)
            .extend(Finger::Ring)
            .beside(Finger::Middle, Finger::Ring, 10.0)
            .build();
        let result = classify(&frame);
        assert_eq!(result.gesture, Gesture::RightClick);
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn test_left_click_takes_precedence_over_right_click() {
        let frame = HandBuilder::new()
            .extend(Finger::Index)
            .extend(Finger::Middle)
            .extend(Finger::Ring)
            .beside(Finger::Index, Finger::Middle, 10.0)
            .beside(Finger::Middle, Finger::Ring, 10.0)
            .build();
        assert_eq!(classify(&frame).gesture, Gesture::LeftClick);
    }

    #[test]
    fn test_scroll_up_is_shadowed_by_left_click() {
        // Every hand satisfying the scroll-up rule satisfies the left-click rule first
        let frame = HandBuilder::new()
            .extend(Finger::Index)
            .extend(Finger::Middle)
            .extend(Finger::Ring)
            .beside(Finger::Index, Finger::Middle, 5.0)
            .beside(Finger::Middle, Finger::Ring, 5.0)
            .build();
        let metrics = GestureClassifier::default().measure(&frame);
        assert!((RULES[2].matches)(&metrics, 30.0));
        assert_eq!(classify(&frame).gesture, Gesture::LeftClick);
    }

    #[test]
    fn test_scroll_down_ignores_spacing_and_ring() {
        let frame = HandBuilder::new()
            .extend(Finger::Index)
            .extend(Finger::Middle)
            .extend(Finger::Pinky)
            .build();
        let result = classify(&frame);
        assert_eq!(result.gesture, Gesture::ScrollDown);
        assert_eq!(result.confidence, 0.8);

        let with_ring = HandBuilder::new()
            .extend(Finger::Index)
            .extend(Finger::Middle)
            .extend(Finger::Ring)
            .extend(Finger::Pinky)
            .build();
        assert_eq!(classify(&with_ring).gesture, Gesture::ScrollDown);
    }

    #[test]
    fn test_pinky_without_index_is_none() {
        let frame = HandBuilder::new()
            .extend(Finger::Middle)
            .extend(Finger::Pinky)
            .build();
        assert_eq!(classify(&frame).gesture, Gesture::None);
    }

    #[test]
    fn test_inverted_convention_flips_extension() {
        // Tips 40px above their PIPs: curled by default, extended when inverted
        let frame = HandBuilder::new()
            .beside(Finger::Index, Finger::Middle, 10.0)
            .build();
        assert_eq!(classify(&frame).gesture, Gesture::None);

        let inverted = GestureClassifier::new(30.0, ExtensionConvention::TipAbovePip);
        assert_eq!(inverted.classify(Some(&frame)).gesture, Gesture::LeftClick);
    }

    #[test]
    fn test_threshold_is_in_raw_pixels() {
        let frame = HandBuilder::new()
            .extend(Finger::Index)
            .extend(Finger::Middle)
            .beside(Finger::Index, Finger::Middle, 40.0)
            .build();
        assert_eq!(classify(&frame).gesture, Gesture::None);

        let wide = GestureClassifier::new(50.0, ExtensionConvention::TipBelowPip);
        assert_eq!(wide.classify(Some(&frame)).gesture, Gesture::LeftClick);
    }

    #[test]
    fn test_metrics_distances() {
        let frame = HandBuilder::new()
            .tip_at(HandLandmark::ThumbTip, 500.0, 230.0)
            .build();
        let metrics = GestureClassifier::default().measure(&frame);
        assert_eq!(metrics.thumb_index_dist, 30.0);
        assert_eq!(metrics.index_middle_dist, 100.0);
        assert_eq!(metrics.middle_ring_dist, 100.0);
        assert_eq!(metrics.ring_pinky_dist, 100.0);
        assert!(!metrics.index_extended);
    }
}
