// Frame loop: classify, move the cursor, dispatch actions

use crate::core::action_dispatcher::ActionDispatcher;
use crate::core::config::{Config, ConfigError};
use crate::core::coordinate_mapper::CoordinateMapper;
use crate::core::gesture_classifier::GestureClassifier;
use crate::models::gesture::{GestureResult, MouseAction};
use crate::models::hand::{FrameSize, HandLandmark, LandmarkFrame};
use crate::models::input::{InputError, ScreenBounds, ScreenPoint};
use crate::platform::input::InputSink;
use crate::platform::landmarks::{LandmarkSource, SourceError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Landmark that drives the cursor
const CURSOR_LANDMARK: HandLandmark = HandLandmark::IndexFingerTip;

/// What happened on one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub timestamp: f64,
    pub gesture: GestureResult,
    pub cursor: Option<ScreenPoint>,
    pub action: Option<MouseAction>,
}

/// Totals for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub frames_with_hand: u64,
    pub cursor_moves: u64,
    pub left_clicks: u64,
    pub right_clicks: u64,
    pub scroll_ups: u64,
    pub scroll_downs: u64,
    pub stopped_by_user: bool,
}

impl RunSummary {
    fn record(&mut self, report: &FrameReport) {
        self.frames += 1;
        if report.cursor.is_some() {
            self.frames_with_hand += 1;
            self.cursor_moves += 1;
        }
        match report.action {
            Some(MouseAction::LeftClick) => self.left_clicks += 1,
            Some(MouseAction::RightClick) => self.right_clicks += 1,
            Some(MouseAction::Scroll(amount)) if amount >= 0 => self.scroll_ups += 1,
            Some(MouseAction::Scroll(_)) => self.scroll_downs += 1,
            None => {}
        }
    }
}

/// Frame rate from consecutive frame timestamps
#[derive(Debug, Default)]
struct FpsCounter {
    previous: Option<f64>,
}

impl FpsCounter {
    fn tick(&mut self, timestamp: f64) -> f64 {
        let fps = match self.previous {
            Some(previous) if timestamp > previous => 1.0 / (timestamp - previous),
            _ => 0.0,
        };
        self.previous = Some(timestamp);
        fps
    }
}

pub struct VirtualMouse<S: InputSink> {
    classifier: GestureClassifier,
    mapper: CoordinateMapper,
    dispatcher: ActionDispatcher,
    sink: S,
    move_duration: Duration,
    show_fps: bool,
}

impl<S: InputSink> VirtualMouse<S> {
    /// Build the pipeline. The screen size is resolved once here and never re-queried.
    pub fn new(config: &Config, sink: S) -> AppResult<Self> {
        config.validate()?;

        let screen = match config.screen_override {
            Some(screen) => screen,
            None => sink.screen_size()?,
        };
        let camera = FrameSize::new(config.frame_width, config.frame_height);

        log::info!(
            "Virtual mouse ready: camera {}x{} -> screen {}x{} via {}",
            camera.width,
            camera.height,
            screen.width,
            screen.height,
            sink.backend_info()
        );

        Ok(Self {
            classifier: GestureClassifier::from_config(config),
            mapper: CoordinateMapper::new(camera, screen),
            dispatcher: ActionDispatcher::from_config(config),
            sink,
            move_duration: config.cursor_move_duration(),
            show_fps: config.show_fps,
        })
    }

    pub fn screen(&self) -> ScreenBounds {
        self.mapper.screen()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    /// Handle one frame. Without a hand nothing reaches the sink.
    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> FrameReport {
        let hand = match frame.hand.as_ref() {
            Some(hand) => hand,
            None => {
                return FrameReport {
                    timestamp: frame.timestamp,
                    gesture: GestureResult::none(),
                    cursor: None,
                    action: None,
                }
            }
        };

        let gesture = self.classifier.classify(Some(hand));
        if log::log_enabled!(log::Level::Debug) {
            let metrics = self.classifier.measure(hand);
            log::debug!(
                "t={:.3} hand={} gesture={} ({:.1}) {:?}",
                frame.timestamp,
                frame.handedness.map(|h| h.to_string()).unwrap_or("unknown"),
                gesture.gesture.to_string(),
                gesture.confidence,
                metrics
            );
        }

        let cursor = self.mapper.map_landmark(hand.get(CURSOR_LANDMARK));
        if let Err(e) = self.sink.move_cursor(cursor, self.move_duration) {
            log::warn!("Error moving mouse: {}", e);
        }

        let action = self
            .dispatcher
            .dispatch(gesture.gesture, frame.timestamp, &mut self.sink);

        FrameReport {
            timestamp: frame.timestamp,
            gesture,
            cursor: Some(cursor),
            action,
        }
    }

    /// Pull frames until the source runs dry or `stop` is set
    pub fn run<L: LandmarkSource + ?Sized>(
        &mut self,
        source: &mut L,
        stop: &AtomicBool,
    ) -> AppResult<RunSummary> {
        let source_size = source.frame_size();
        if source_size != self.mapper.camera() {
            log::warn!(
                "Source frames are {}x{} but the mapper expects {}x{}",
                source_size.width,
                source_size.height,
                self.mapper.camera().width,
                self.mapper.camera().height
            );
        }

        let mut summary = RunSummary::default();
        let mut fps = FpsCounter::default();

        loop {
            if stop.load(Ordering::SeqCst) {
                summary.stopped_by_user = true;
                break;
            }

            let frame = match source.next_frame()? {
                Some(frame) => frame,
                None => break,
            };

            let report = self.process_frame(&frame);
            summary.record(&report);

            let rate = fps.tick(frame.timestamp);
            if self.show_fps {
                log::debug!("FPS: {:.0}", rate);
            }
        }

        log::info!(
            "Processed {} frames ({} with a hand)",
            summary.frames,
            summary.frames_with_hand
        );
        Ok(summary)
    }
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

pub type AppResult<T> = Result<T, AppError>;
