//! Output formatting for CLI.

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::{CLEAR_SCREEN, TextFormatter};
#[cfg(test)]
mod tests;
