#![allow(dead_code)]

// Character sheet core
// Implements: free-text parsing into a canonical record, projection onto a PDF form.
// The filler does blocking file I/O; async callers run it inside tokio::task::spawn_blocking.

pub mod aliases;
pub mod fields;
pub mod filler;
pub mod handlers;
pub mod modifiers;
pub mod parser;
pub mod pdf;
pub mod template_map;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export the public API consumed by handlers and application state.
pub use fields::CanonicalField;
pub use filler::{FillError, TemplateFiller};
pub use parser::{LabelTrim, SheetParser};
