//! Shared test helpers for `congregate-core` integration tests.
//!
//! In-memory doubles for every port plus member fixtures, so tests can focus
//! on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod auth;
pub mod feedback;
pub mod fixtures;
pub mod repositories;
