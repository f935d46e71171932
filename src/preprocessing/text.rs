//! Text normalization applied before vectorization

use regex::Regex;

/// Compiled normalization rules for incoming article text.
///
/// Cleaning lowercases the input, replaces URL-like tokens and HTML-tag-like
/// substrings with a space, then collapses whitespace runs and trims. The
/// regexes are compiled once, so build one cleaner and share it.
#[derive(Debug, Clone)]
pub struct TextCleaner {
    links: Regex,
    html: Regex,
    spaces: Regex,
}

impl TextCleaner {
    pub fn new() -> Self {
        Self {
            links: Regex::new(r"http\S+|www\S+").expect("link pattern is valid"),
            html: Regex::new(r"(?s)<.*?>").expect("html pattern is valid"),
            spaces: Regex::new(r"\s+").expect("whitespace pattern is valid"),
        }
    }

    /// Normalize a single piece of text.
    pub fn clean(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let without_links = self.links.replace_all(&lowered, " ");
        let without_html = self.html.replace_all(&without_links, " ");
        self.spaces.replace_all(&without_html, " ").trim().to_string()
    }

    /// Merge title and body the way the model was trained, then normalize.
    pub fn clean_article(&self, title: &str, text: &str) -> String {
        self.clean(&merge_fields(title, text))
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Join title and body with a single space and trim the result.
pub fn merge_fields(title: &str, text: &str) -> String {
    format!("{} {}", title, text).trim().to_string()
}
