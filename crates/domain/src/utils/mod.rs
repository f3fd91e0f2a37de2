//! Pure helpers shared by domain types

pub mod dates;
pub mod text;
