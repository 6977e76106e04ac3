// OS mouse injection through enigo

use super::InputSink;
use crate::models::input::{InputError, InputResult, ScreenBounds, ScreenPoint};
use enigo::{Axis, Button, Coordinate, Direction, Enigo, Mouse, Settings};
use std::time::Duration;

/// Interval between intermediate cursor positions during an eased move
const EASING_STEP: Duration = Duration::from_millis(5);
const MAX_EASING_STEPS: u32 = 50;

pub struct EnigoSink {
    enigo: Enigo,
}

impl EnigoSink {
    pub fn new() -> InputResult<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| InputError::Unavailable(format!("Failed to connect to input backend: {}", e)))?;
        Ok(Self { enigo })
    }

    fn move_to(&mut self, point: ScreenPoint) -> InputResult<()> {
        self.enigo
            .move_mouse(point.x, point.y, Coordinate::Abs)
            .map_err(|e| InputError::Failed(format!("Failed to move cursor: {}", e)))
    }

    fn button(&mut self, button: Button, direction: Direction) -> InputResult<()> {
        self.enigo
            .button(button, direction)
            .map_err(|e| InputError::Failed(format!("Failed to press {:?}: {}", button, e)))
    }

    /// Linear move from the current position, spread over `duration`
    fn eased_move(&mut self, target: ScreenPoint, duration: Duration) -> InputResult<()> {
        let steps = (duration.as_millis() / EASING_STEP.as_millis()).min(MAX_EASING_STEPS as u128) as u32;
        if steps <= 1 {
            return self.move_to(target);
        }

        let (start_x, start_y) = self
            .enigo
            .location()
            .map_err(|e| InputError::Failed(format!("Failed to read cursor position: {}", e)))?;
        let pause = duration / steps;

        for step in 1..=steps {
            let t = step as f64 / steps as f64;
            let x = start_x as f64 + (target.x - start_x) as f64 * t;
            let y = start_y as f64 + (target.y - start_y) as f64 * t;
            self.move_to(ScreenPoint::new(x.round() as i32, y.round() as i32))?;
            if step < steps {
                std::thread::sleep(pause);
            }
        }

        Ok(())
    }
}

impl InputSink for EnigoSink {
    fn move_cursor(&mut self, point: ScreenPoint, duration: Duration) -> InputResult<()> {
        self.eased_move(point, duration)
    }

    fn click_left(&mut self) -> InputResult<()> {
        self.button(Button::Left, Direction::Click)
    }

    fn click_right(&mut self) -> InputResult<()> {
        self.button(Button::Right, Direction::Click)
    }

    fn double_click(&mut self) -> InputResult<()> {
        self.button(Button::Left, Direction::Click)?;
        self.button(Button::Left, Direction::Click)
    }

    fn scroll(&mut self, amount: i32) -> InputResult<()> {
        // enigo scrolls down for positive lengths
        self.enigo
            .scroll(-amount, Axis::Vertical)
            .map_err(|e| InputError::Failed(format!("Failed to scroll: {}", e)))
    }

    fn drag(&mut self, from: ScreenPoint, to: ScreenPoint, duration: Duration) -> InputResult<()> {
        self.move_to(from)?;
        self.button(Button::Left, Direction::Press)?;
        let moved = self.eased_move(to, duration);
        // Always release, even if the move failed part way
        let released = self.button(Button::Left, Direction::Release);
        moved.and(released)
    }

    fn screen_size(&self) -> InputResult<ScreenBounds> {
        let (width, height) = self
            .enigo
            .main_display()
            .map_err(|e| InputError::Failed(format!("Failed to query display size: {}", e)))?;
        if width <= 0 || height <= 0 {
            return Err(InputError::Failed(format!(
                "Display reported invalid size {}x{}",
                width, height
            )));
        }
        Ok(ScreenBounds::new(width as u32, height as u32))
    }

    fn backend_info(&self) -> String {
        "enigo OS input backend".to_string()
    }
}
