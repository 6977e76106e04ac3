use super::InputSink;
use crate::models::input::{InputResult, ScreenBounds, ScreenPoint};
use std::time::Duration;

/// A call received by a [`DryRunSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Move { point: ScreenPoint, duration: Duration },
    ClickLeft,
    ClickRight,
    DoubleClick,
    Scroll(i32),
    Drag { from: ScreenPoint, to: ScreenPoint, duration: Duration },
}

/// Logs and records every mouse action instead of performing it
#[derive(Debug, Clone)]
pub struct DryRunSink {
    screen: ScreenBounds,
    calls: Vec<SinkCall>,
}

impl DryRunSink {
    pub fn new(screen: ScreenBounds) -> Self {
        Self {
            screen,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[SinkCall] {
        &self.calls
    }

    pub fn count(&self, predicate: impl Fn(&SinkCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    fn record(&mut self, call: SinkCall) -> InputResult<()> {
        self.calls.push(call);
        Ok(())
    }
}

impl InputSink for DryRunSink {
    fn move_cursor(&mut self, point: ScreenPoint, duration: Duration) -> InputResult<()> {
        log::trace!("[dry-run] move cursor to ({}, {}) over {:?}", point.x, point.y, duration);
        self.record(SinkCall::Move { point, duration })
    }

    fn click_left(&mut self) -> InputResult<()> {
        log::info!("[dry-run] left click");
        self.record(SinkCall::ClickLeft)
    }

    fn click_right(&mut self) -> InputResult<()> {
        log::info!("[dry-run] right click");
        self.record(SinkCall::ClickRight)
    }

    fn double_click(&mut self) -> InputResult<()> {
        log::info!("[dry-run] double click");
        self.record(SinkCall::DoubleClick)
    }

    fn scroll(&mut self, amount: i32) -> InputResult<()> {
        log::info!("[dry-run] scroll {}", amount);
        self.record(SinkCall::Scroll(amount))
    }

    fn drag(&mut self, from: ScreenPoint, to: ScreenPoint, duration: Duration) -> InputResult<()> {
        log::info!(
            "[dry-run] drag ({}, {}) -> ({}, {}) over {:?}",
            from.x,
            from.y,
            to.x,
            to.y,
            duration
        );
        self.record(SinkCall::Drag { from, to, duration })
    }

    fn screen_size(&self) -> InputResult<ScreenBounds> {
        Ok(self.screen)
    }

    fn backend_info(&self) -> String {
        format!(
            "Dry run (no OS input, screen {}x{})",
            self.screen.width, self.screen.height
        )
    }
}
