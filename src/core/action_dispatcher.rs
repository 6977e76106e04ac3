// Debounced dispatch of recognized gestures to the input sink

use crate::core::config::Config;
use crate::models::gesture::{ActionClass, Gesture, MouseAction};
use crate::platform::input::InputSink;

/// Last firing time per action class, in seconds.
///
/// Left and right click share the click slot, so a right click right after a
/// left click is suppressed too.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CooldownState {
    pub last_click: Option<f64>,
    pub last_scroll: Option<f64>,
}

impl CooldownState {
    fn slot_mut(&mut self, class: ActionClass) -> &mut Option<f64> {
        match class {
            ActionClass::Click => &mut self.last_click,
            ActionClass::Scroll => &mut self.last_scroll,
        }
    }
}

pub struct ActionDispatcher {
    click_cooldown: f64,
    scroll_cooldown: f64,
    scroll_amount: i32,
    state: CooldownState,
}

impl ActionDispatcher {
    pub fn new(click_cooldown: f64, scroll_cooldown: f64, scroll_amount: i32) -> Self {
        Self {
            click_cooldown,
            scroll_cooldown,
            scroll_amount,
            state: CooldownState::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.click_cooldown_secs,
            config.scroll_cooldown_secs,
            config.scroll_amount,
        )
    }

    pub fn state(&self) -> CooldownState {
        self.state
    }

    /// Fire the action for `gesture` unless its class is still cooling down.
    ///
    /// Returns the action that was attempted. A sink failure is logged and the
    /// cooldown still starts; it never propagates.
    pub fn dispatch<S: InputSink + ?Sized>(
        &mut self,
        gesture: Gesture,
        now: f64,
        sink: &mut S,
    ) -> Option<MouseAction> {
        let action = self.action_for(gesture)?;
        let class = gesture.action_class()?;
        let cooldown = self.cooldown_for(class);

        let slot = self.state.slot_mut(class);
        if let Some(last) = *slot {
            if now - last <= cooldown {
                log::trace!(
                    "Suppressed {} ({:.3}s since last {:?} action)",
                    gesture.to_string(),
                    now - last,
                    class
                );
                return None;
            }
        }
        *slot = Some(now);

        let result = match action {
            MouseAction::LeftClick => sink.click_left(),
            MouseAction::RightClick => sink.click_right(),
            MouseAction::Scroll(amount) => sink.scroll(amount),
        };

        match result {
            Ok(()) => log::info!("{}", action.describe()),
            Err(e) => log::warn!("Error performing {}: {}", action.describe(), e),
        }

        Some(action)
    }

    fn action_for(&self, gesture: Gesture) -> Option<MouseAction> {
        // Positive scrolls up whatever sign the amount was given with
        let amount = self.scroll_amount.saturating_abs();
        match gesture {
            Gesture::None => None,
            Gesture::LeftClick => Some(MouseAction::LeftClick),
            Gesture::RightClick => Some(MouseAction::RightClick),
            Gesture::ScrollUp => Some(MouseAction::Scroll(amount)),
            Gesture::ScrollDown => Some(MouseAction::Scroll(-amount)),
        }
    }

    fn cooldown_for(&self, class: ActionClass) -> f64 {
        match class {
            ActionClass::Click => self.click_cooldown,
            ActionClass::Scroll => self.scroll_cooldown,
        }
    }
}

impl Default for ActionDispatcher {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::input::ScreenBounds;
    use crate::platform::input::testing::FailingSink;
    use crate::platform::input::{DryRunSink, SinkCall};

    fn sink() -> DryRunSink {
        DryRunSink::new(ScreenBounds::new(1920, 1080))
    }

    #[test]
    fn test_click_cooldown() {
        let mut dispatcher = ActionDispatcher::default();
        let mut sink = sink();

        assert_eq!(
            dispatcher.dispatch(Gesture::LeftClick, 0.0, &mut sink),
            Some(MouseAction::LeftClick)
        );
        assert_eq!(dispatcher.dispatch(Gesture::LeftClick, 0.2, &mut sink), None);
        assert_eq!(sink.count(|c| *c == SinkCall::ClickLeft), 1);

        assert_eq!(
            dispatcher.dispatch(Gesture::LeftClick, 0.35, &mut sink),
            Some(MouseAction::LeftClick)
        );
        assert_eq!(sink.count(|c| *c == SinkCall::ClickLeft), 2);
        assert_eq!(dispatcher.state().last_click, Some(0.35));
    }

    #[test]
    fn test_cooldown_boundary_is_exclusive() {
        let mut dispatcher = ActionDispatcher::new(0.5, 0.5, 3);
        let mut sink = sink();

        dispatcher.dispatch(Gesture::LeftClick, 1.0, &mut sink);
        assert_eq!(dispatcher.dispatch(Gesture::LeftClick, 1.5, &mut sink), None);
        assert!(dispatcher.dispatch(Gesture::LeftClick, 1.75, &mut sink).is_some());
    }

    #[test]
    fn test_scroll_direction_ignores_amount_sign() {
        let mut sink = sink();

        let mut dispatcher = ActionDispatcher::new(0.3, 0.2, -3);
        assert_eq!(
            dispatcher.dispatch(Gesture::ScrollDown, 0.0, &mut sink),
            Some(MouseAction::Scroll(-3))
        );

        let mut dispatcher = ActionDispatcher::new(0.3, 0.2, i32::MIN);
        assert_eq!(
            dispatcher.dispatch(Gesture::ScrollDown, 0.0, &mut sink),
            Some(MouseAction::Scroll(-i32::MAX))
        );
        assert_eq!(sink.calls(), &[SinkCall::Scroll(-3), SinkCall::Scroll(-i32::MAX)]);
    }

    #[test]
    fn test_suppressed_gesture_does_not_extend_cooldown() {
        let mut dispatcher = ActionDispatcher::default();
        let mut sink = sink();

        dispatcher.dispatch(Gesture::LeftClick, 0.0, &mut sink);
        for t in [0.1, 0.2, 0.25] {
            dispatcher.dispatch(Gesture::LeftClick, t, &mut sink);
        }
        assert_eq!(dispatcher.state().last_click, Some(0.0));
        assert!(dispatcher.dispatch(Gesture::LeftClick, 0.31, &mut sink).is_some());
    }

    #[test]
    fn test_left_and_right_share_click_slot() {
        let mut dispatcher = ActionDispatcher::default();
        let mut sink = sink();

        dispatcher.dispatch(Gesture::LeftClick, 0.0, &mut sink);
        assert_eq!(dispatcher.dispatch(Gesture::RightClick, 0.1, &mut sink), None);
        assert_eq!(
            dispatcher.dispatch(Gesture::RightClick, 0.4, &mut sink),
            Some(MouseAction::RightClick)
        );
        assert_eq!(dispatcher.dispatch(Gesture::LeftClick, 0.5, &mut sink), None);

        assert_eq!(sink.calls(), &[SinkCall::ClickLeft, SinkCall::ClickRight]);
    }

    #[test]
    fn test_click_and_scroll_are_independent() {
        let mut dispatcher = ActionDispatcher::default();
        let mut sink = sink();

        dispatcher.dispatch(Gesture::LeftClick, 0.0, &mut sink);
        assert_eq!(
            dispatcher.dispatch(Gesture::ScrollUp, 0.01, &mut sink),
            Some(MouseAction::Scroll(3))
        );
        assert_eq!(dispatcher.dispatch(Gesture::ScrollDown, 0.1, &mut sink), None);
        assert_eq!(
            dispatcher.dispatch(Gesture::ScrollDown, 0.25, &mut sink),
            Some(MouseAction::Scroll(-3))
        );
        assert_eq!(dispatcher.dispatch(Gesture::RightClick, 0.26, &mut sink), None);

        assert_eq!(
            sink.calls(),
            &[SinkCall::ClickLeft, SinkCall::Scroll(3), SinkCall::Scroll(-3)]
        );
    }

    #[test]
    fn test_none_is_a_no_op() {
        let mut dispatcher = ActionDispatcher::default();
        let mut sink = sink();

        assert_eq!(dispatcher.dispatch(Gesture::None, 0.0, &mut sink), None);
        assert!(sink.calls().is_empty());
        assert_eq!(dispatcher.state(), CooldownState::default());
    }

    #[test]
    fn test_custom_scroll_amount() {
        let mut dispatcher = ActionDispatcher::new(0.3, 0.2, 7);
        let mut sink = sink();

        dispatcher.dispatch(Gesture::ScrollDown, 0.0, &mut sink);
        assert_eq!(sink.calls(), &[SinkCall::Scroll(-7)]);
    }

    #[test]
    fn test_sink_failure_is_swallowed_and_starts_cooldown() {
        let mut dispatcher = ActionDispatcher::default();
        let mut sink = FailingSink::default();

        assert_eq!(
            dispatcher.dispatch(Gesture::LeftClick, 0.0, &mut sink),
            Some(MouseAction::LeftClick)
        );
        assert_eq!(dispatcher.dispatch(Gesture::LeftClick, 0.1, &mut sink), None);
        assert_eq!(sink.attempts, 1);
        assert_eq!(dispatcher.state().last_click, Some(0.0));
    }
}
