//! Terminal adapters for the core's UI collaborator ports.

pub mod console;

pub use console::{ConsoleConfirmer, ConsoleNavigator, ConsoleNotifier};
