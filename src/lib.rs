pub mod core;
pub mod models;
pub mod platform;

pub use crate::core::config::Config;
pub use crate::core::virtual_mouse::{AppError, AppResult, FrameReport, RunSummary, VirtualMouse};
