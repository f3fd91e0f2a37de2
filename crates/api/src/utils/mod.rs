//! Logging bootstrap and terminal rendering helpers

pub mod format;
pub mod logging;
