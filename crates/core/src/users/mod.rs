//! User administration

pub mod ports;
pub mod service;

pub use service::UserAdministration;
