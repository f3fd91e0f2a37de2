//! Domain types and models

pub mod draft;
pub mod feedback;
pub mod filter;
pub mod member;
pub mod session;
pub mod stats;

pub use draft::{field_label, required_field_message, MemberDraft};
pub use feedback::{ConfirmPrompt, Route, Severity};
pub use filter::{FilterCriteria, SortKey};
pub use member::{BaptismalState, ChurchFunction, Gender, Member, Region, Society};
pub use session::{
    AssignableRole, AuthEvent, AuthEventKind, AuthStatus, AuthUser, Capabilities, Role, Session,
    UserAccount,
};
pub use stats::{AgeBracket, GenderBreakdown, GrowthTrend, MemberStatistics, Share};
