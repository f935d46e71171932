//! Feature engineering module
//!
//! Turns normalized text into the numeric features consumed by the classifiers.

pub mod text_features;

pub use text_features::{CountVectorizer, TextTokenizer, TfidfVectorizer};
