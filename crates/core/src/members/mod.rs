//! Member registry: store port, pure engine and view-state

pub mod engine;
pub mod ports;
pub mod registry;

pub use engine::{MemberView, Page};
pub use registry::MemberRegistry;
