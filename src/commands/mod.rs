//! Command handlers for the CLI.

pub mod combine;
pub mod common;
pub mod evaluate;

pub use combine::handle_combine;
pub use evaluate::handle_evaluate;
