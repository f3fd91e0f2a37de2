//! Authentication lifecycle and role permissions

pub mod events;
pub mod gate;
pub mod permissions;
pub mod ports;

pub use events::{AuthEventBus, AuthSubscription};
pub use gate::SessionGate;
pub use permissions::{capabilities_for, resolve_role, PermissionResolver};
