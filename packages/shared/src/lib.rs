//! Shared utilities for the Idobata chat application.

pub mod logger;
pub mod time;

pub use logger::setup_logger;
