use lazy_static::lazy_static;
use ndarray::Array1;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::model::InferenceError;

lazy_static! {
    // Two or more word characters, as in the trainer's tokenizer.
    static ref TOKEN_PATTERN: Regex = Regex::new(r"\b\w\w+\b").unwrap();
}

#[derive(Debug, Clone, Deserialize)]
pub struct VectorizerArtifact {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: Vec<String>,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Sparse, L2-normalized feature vector. Indices are sorted and unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn dot(&self, weights: &Array1<f64>) -> f64 {
        self.indices
            .iter()
            .zip(&self.values)
            .map(|(&index, value)| weights[index] * value)
            .sum()
    }
}

#[derive(Debug)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Array1<f64>,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
}

impl TfidfVectorizer {
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self, InferenceError> {
        let width = artifact.idf.len();
        if artifact.vocabulary.len() > width {
            return Err(InferenceError::ModelState(format!(
                "vocabulary has {} terms but idf has {} entries",
                artifact.vocabulary.len(),
                width
            )));
        }
        if let Some((term, &index)) = artifact
            .vocabulary
            .iter()
            .find(|(_, index)| **index >= width)
        {
            return Err(InferenceError::ModelState(format!(
                "term '{}' maps to column {} outside of {} columns",
                term, index, width
            )));
        }
        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(InferenceError::ModelState(format!(
                "invalid ngram range ({}, {})",
                min_n, max_n
            )));
        }

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: Array1::from(artifact.idf),
            ngram_range: artifact.ngram_range,
            stop_words: artifact.stop_words.into_iter().collect(),
        })
    }

    /// Number of feature columns.
    pub fn width(&self) -> usize {
        self.idf.len()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        TOKEN_PATTERN
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(*token))
            .collect()
    }

    fn ngrams(&self, tokens: &[&str]) -> Vec<String> {
        let (min_n, max_n) = self.ngram_range;
        let mut grams = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            grams.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        grams
    }

    /// Term counts weighted by idf, then scaled to unit length.
    pub fn transform(&self, text: &str) -> FeatureVector {
        let tokens = self.tokenize(text);

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for gram in self.ngrams(&tokens) {
            if let Some(&index) = self.vocabulary.get(&gram) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut features = FeatureVector::default();
        for (index, count) in counts {
            features.indices.push(index);
            features.values.push(count * self.idf[index]);
        }

        let norm = features.values.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            features.values.iter_mut().for_each(|v| *v /= norm);
        }
        features
    }
}
