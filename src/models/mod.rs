// Data models for hand landmarks, gestures, and mouse output

pub mod gesture;
pub mod hand;
pub mod input;
