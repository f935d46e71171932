//! Text feature extraction
//!
//! The vectorizers here only evaluate parameters fitted elsewhere; the
//! vocabulary and idf weights arrive through the model artifact.

use crate::error::{ClassifierError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Simple text tokenizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextTokenizer {
    lowercase: bool,
    min_token_length: usize,
    stop_words: Vec<String>,
}

impl TextTokenizer {
    pub fn new() -> Self {
        Self {
            lowercase: true,
            min_token_length: 2,
            stop_words: Vec::new(),
        }
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    pub fn with_min_length(mut self, len: usize) -> Self {
        self.min_token_length = len;
        self
    }

    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_english_stop_words(self) -> Self {
        self.with_stop_words([
            "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for",
            "of", "with", "by", "is", "was", "are", "were", "be", "have", "has",
            "it", "this", "that", "i", "you", "he", "she", "we", "they",
        ])
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let processed = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        processed
            .split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
            .filter(|s| s.chars().count() >= self.min_token_length)
            .filter(|s| !self.stop_words.iter().any(|w| w == s))
            .map(|s| s.to_string())
            .collect()
    }
}

impl Default for TextTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Count-based text vectorizer over a fixed vocabulary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountVectorizer {
    tokenizer: TextTokenizer,
    vocabulary: HashMap<String, usize>,
    ngram_range: (usize, usize),
    binary: bool,
}

impl CountVectorizer {
    /// Create a vectorizer from a fitted term → column vocabulary.
    pub fn new(tokenizer: TextTokenizer, vocabulary: HashMap<String, usize>) -> Self {
        Self {
            tokenizer,
            vocabulary,
            ngram_range: (1, 1),
            binary: false,
        }
    }

    pub fn with_ngram_range(mut self, min: usize, max: usize) -> Self {
        self.ngram_range = (min.max(1), max.max(min));
        self
    }

    pub fn with_binary(mut self, binary: bool) -> Self {
        self.binary = binary;
        self
    }

    /// Number of output columns
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// Check that the vocabulary maps onto exactly the columns `0..n`.
    pub fn validate(&self) -> Result<()> {
        let n = self.vocabulary.len();
        if n == 0 {
            return Err(ClassifierError::InvalidArtifact("empty vocabulary".to_string()));
        }
        if self.ngram_range.0 == 0 || self.ngram_range.0 > self.ngram_range.1 {
            return Err(ClassifierError::InvalidArtifact(format!(
                "invalid ngram range {:?}",
                self.ngram_range
            )));
        }

        let mut seen = vec![false; n];
        for (term, &idx) in &self.vocabulary {
            if idx >= n || seen[idx] {
                return Err(ClassifierError::InvalidArtifact(format!(
                    "vocabulary term {:?} has invalid column {}",
                    term, idx
                )));
            }
            seen[idx] = true;
        }
        Ok(())
    }

    fn generate_ngrams(&self, tokens: &[String]) -> Vec<String> {
        let mut ngrams = Vec::new();

        for n in self.ngram_range.0..=self.ngram_range.1 {
            if tokens.len() >= n {
                for i in 0..=(tokens.len() - n) {
                    ngrams.push(tokens[i..i + n].join(" "));
                }
            }
        }

        ngrams
    }

    pub fn transform(&self, documents: &[String]) -> Result<Array2<f64>> {
        if self.vocabulary.is_empty() {
            return Err(ClassifierError::InvalidArtifact(
                "vectorizer has no vocabulary".to_string(),
            ));
        }

        let mut result = Array2::zeros((documents.len(), self.vocabulary.len()));

        for (doc_idx, doc) in documents.iter().enumerate() {
            let tokens = self.tokenizer.tokenize(doc);
            for ngram in self.generate_ngrams(&tokens) {
                if let Some(&idx) = self.vocabulary.get(&ngram) {
                    if self.binary {
                        result[[doc_idx, idx]] = 1.0;
                    } else {
                        result[[doc_idx, idx]] += 1.0;
                    }
                }
            }
        }

        Ok(result)
    }
}

/// TF-IDF vectorizer with fitted idf weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    count_vectorizer: CountVectorizer,
    idf: Array1<f64>,
    normalize: bool,
    sublinear_tf: bool,
}

impl TfidfVectorizer {
    pub fn new(count_vectorizer: CountVectorizer, idf: Array1<f64>) -> Self {
        Self {
            count_vectorizer,
            idf,
            normalize: true,
            sublinear_tf: false,
        }
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    pub fn n_features(&self) -> usize {
        self.count_vectorizer.n_features()
    }

    pub fn validate(&self) -> Result<()> {
        self.count_vectorizer.validate()?;

        if self.idf.len() != self.n_features() {
            return Err(ClassifierError::ShapeError {
                expected: format!("idf length = {}", self.n_features()),
                actual: format!("idf length = {}", self.idf.len()),
            });
        }
        if self.idf.iter().any(|v| !v.is_finite()) {
            return Err(ClassifierError::InvalidArtifact(
                "idf weights must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn transform(&self, documents: &[String]) -> Result<Array2<f64>> {
        let mut tf_matrix = self.count_vectorizer.transform(documents)?;

        if self.sublinear_tf {
            tf_matrix.mapv_inplace(|v| if v > 0.0 { 1.0 + v.ln() } else { 0.0 });
        }

        for mut row in tf_matrix.rows_mut() {
            row *= &self.idf;

            if self.normalize {
                let norm = row.iter().map(|&v| v * v).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row /= norm;
                }
            }
        }

        Ok(tf_matrix)
    }
}
