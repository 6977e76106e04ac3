// Data models for recognized gestures and the mouse actions they trigger

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    None,
    LeftClick,
    RightClick,
    ScrollUp,
    ScrollDown,
}

impl Gesture {
    pub fn to_string(&self) -> &'static str {
        match self {
            Gesture::None => "none",
            Gesture::LeftClick => "left_click",
            Gesture::RightClick => "right_click",
            Gesture::ScrollUp => "scroll_up",
            Gesture::ScrollDown => "scroll_down",
        }
    }

    /// Cooldown class this gesture is debounced under
    pub fn action_class(&self) -> Option<ActionClass> {
        match self {
            Gesture::None => None,
            Gesture::LeftClick | Gesture::RightClick => Some(ActionClass::Click),
            Gesture::ScrollUp | Gesture::ScrollDown => Some(ActionClass::Scroll),
        }
    }
}

/// Classifier output for a single frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureResult {
    pub gesture: Gesture,
    pub confidence: f32, // [0, 1]
}

impl GestureResult {
    pub fn new(gesture: Gesture, confidence: f32) -> Self {
        Self {
            gesture,
            confidence,
        }
    }

    pub fn none() -> Self {
        Self::new(Gesture::None, 0.0)
    }
}

/// Actions sharing a cooldown timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionClass {
    Click,
    Scroll,
}

/// A discrete mouse action issued to the input sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseAction {
    LeftClick,
    RightClick,
    Scroll(i32), // Positive scrolls up
}

impl MouseAction {
    pub fn describe(&self) -> String {
        match self {
            MouseAction::LeftClick => "Left Click".to_string(),
            MouseAction::RightClick => "Right Click".to_string(),
            MouseAction::Scroll(amount) if *amount >= 0 => format!("Scroll Up ({})", amount),
            MouseAction::Scroll(amount) => format!("Scroll Down ({})", amount.unsigned_abs()),
        }
    }
}
