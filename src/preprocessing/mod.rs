//! Text preprocessing
//!
//! Normalizes raw article fields into the form the vectorizer was fitted on.

pub mod text;

pub use text::{merge_fields, TextCleaner};
