pub mod config;

// Gesture to mouse pipeline
pub mod gesture_classifier;
pub mod coordinate_mapper;
pub mod action_dispatcher;
pub mod virtual_mouse;
