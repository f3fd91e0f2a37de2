//! # Congregate Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the member store, auth provider, user
//!   directory, report exporter and UI collaborators
//! - The filter/sort/aggregate engine
//! - Services: session gate, permission resolver, member registry, user
//!   administration
//!
//! ## Architecture Principles
//! - Only depends on `congregate-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits

pub mod members;
pub mod report;
pub mod session;
pub mod users;

// UI collaborator ports
pub mod feedback_ports;

pub use feedback_ports::{Confirmer, Navigator, Notifier};
pub use members::engine;
pub use members::ports::MemberRepository;
pub use members::{MemberRegistry, MemberView, Page};
pub use report::{MemberReport, ReportExporter, ReportRow, REPORT_COLUMNS};
pub use session::ports::{AuthProvider, SessionStore};
pub use session::{AuthEventBus, AuthSubscription, PermissionResolver, SessionGate};
pub use users::ports::UserDirectory;
pub use users::UserAdministration;
