// Mouse output backends
// The dispatcher only talks to the `InputSink` trait; the OS backend is chosen by feature flag

use crate::models::input::{InputResult, ScreenBounds, ScreenPoint};
use std::time::Duration;

pub mod dry_run;
pub use dry_run::{DryRunSink, SinkCall};

#[cfg(feature = "enigo")]
pub mod enigo_backend;
#[cfg(feature = "enigo")]
pub use enigo_backend::EnigoSink;

/// OS-level mouse automation surface.
///
/// Every call may fail (platform restrictions, display disconnects). Callers
/// treat failures as non-fatal.
pub trait InputSink {
    /// Move the cursor to an absolute screen position, easing over `duration`
    fn move_cursor(&mut self, point: ScreenPoint, duration: Duration) -> InputResult<()>;

    fn click_left(&mut self) -> InputResult<()>;

    fn click_right(&mut self) -> InputResult<()>;

    fn double_click(&mut self) -> InputResult<()>;

    /// Scroll vertically; positive amounts scroll up
    fn scroll(&mut self, amount: i32) -> InputResult<()>;

    /// Press the left button at `from`, move to `to` over `duration`, release
    fn drag(&mut self, from: ScreenPoint, to: ScreenPoint, duration: Duration) -> InputResult<()>;

    /// Size of the primary display
    fn screen_size(&self) -> InputResult<ScreenBounds>;

    /// Human readable backend description
    fn backend_info(&self) -> String;
}

impl<S: InputSink + ?Sized> InputSink for Box<S> {
    fn move_cursor(&mut self, point: ScreenPoint, duration: Duration) -> InputResult<()> {
        (**self).move_cursor(point, duration)
    }

    fn click_left(&mut self) -> InputResult<()> {
        (**self).click_left()
    }

    fn click_right(&mut self) -> InputResult<()> {
        (**self).click_right()
    }

    fn double_click(&mut self) -> InputResult<()> {
        (**self).double_click()
    }

    fn scroll(&mut self, amount: i32) -> InputResult<()> {
        (**self).scroll(amount)
    }

    fn drag(&mut self, from: ScreenPoint, to: ScreenPoint, duration: Duration) -> InputResult<()> {
        (**self).drag(from, to, duration)
    }

    fn screen_size(&self) -> InputResult<ScreenBounds> {
        (**self).screen_size()
    }

    fn backend_info(&self) -> String {
        (**self).backend_info()
    }
}

// ==============================================================================
// Default Backend Selection
// ==============================================================================

#[cfg(feature = "enigo")]
pub type DefaultInputSink = EnigoSink;

#[cfg(not(feature = "enigo"))]
pub type DefaultInputSink = DryRunSink;

/// Create the platform sink, falling back to a dry run when OS injection is unavailable
pub fn default_sink(fallback_screen: ScreenBounds) -> Box<dyn InputSink> {
    #[cfg(feature = "enigo")]
    {
        match EnigoSink::new() {
            Ok(sink) => return Box::new(sink),
            Err(e) => {
                log::warn!("Failed to initialize OS input backend: {}", e);
                log::warn!("Falling back to dry run; no real mouse events will be sent");
            }
        }
    }

    Box::new(DryRunSink::new(fallback_screen))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::models::input::InputError;

    /// Sink whose every call fails, counting attempts
    #[derive(Debug, Default)]
    pub(crate) struct FailingSink {
        pub attempts: usize,
    }

    impl FailingSink {
        fn fail(&mut self) -> InputResult<()> {
            self.attempts += 1;
            Err(InputError::Failed("display disconnected".to_string()))
        }
    }

    impl InputSink for FailingSink {
        fn move_cursor(&mut self, _point: ScreenPoint, _duration: Duration) -> InputResult<()> {
            self.fail()
        }

        fn click_left(&mut self) -> InputResult<()> {
            self.fail()
        }

        fn click_right(&mut self) -> InputResult<()> {
            self.fail()
        }

        fn double_click(&mut self) -> InputResult<()> {
            self.fail()
        }

        fn scroll(&mut self, _amount: i32) -> InputResult<()> {
            self.fail()
        }

        fn drag(&mut self, _from: ScreenPoint, _to: ScreenPoint, _duration: Duration) -> InputResult<()> {
            self.fail()
        }

        fn screen_size(&self) -> InputResult<ScreenBounds> {
            Err(InputError::NotSupported)
        }

        fn backend_info(&self) -> String {
            "Failing sink".to_string()
        }
    }
}
