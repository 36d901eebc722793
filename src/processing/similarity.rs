//! Similarity scoring over a query and a batch of candidate texts
//!
//! Both variants share one representation across the query and every
//! candidate (a fitted vocabulary or an embedding space), so a batch is
//! always scored jointly: scoring documents one at a time against a
//! vocabulary fit elsewhere would change every result.

use crate::config::{Config, SimilarityStrategy};
use crate::error::{MatcherError, Result};
use crate::processing::stopwords;
use log::info;
use model2vec_rs::model::StaticModel;
use std::collections::HashMap;

pub trait SimilarityScorer: Send + Sync {
    /// Score each document against the query, in document order, each in
    /// [-1, 1] before any clamping by the caller.
    fn score(&self, query: &str, documents: &[String]) -> Result<Vec<f32>>;

    fn name(&self) -> &'static str;
}

/// TF-IDF vector space fit jointly over {query} and the documents,
/// vocabulary capped to the most frequent terms, stop words excluded.
pub struct LexicalSimilarity {
    max_features: usize,
}

impl LexicalSimilarity {
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    /// Terms of two or more alphanumeric characters, lower-cased, with the
    /// fixed English stop-word list removed.
    fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.chars().count() >= 2)
            .filter(|t| !stopwords::english().contains(*t))
            .map(str::to_string)
            .collect()
    }

    /// Vocabulary of at most `max_features` terms, ranked by corpus
    /// frequency with ties broken alphabetically for determinism.
    fn fit_vocabulary(&self, corpus: &[Vec<String>]) -> HashMap<String, usize> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for doc in corpus {
            for term in doc {
                *counts.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
            .into_iter()
            .take(self.max_features)
            .enumerate()
            .map(|(index, (term, _))| (term.to_string(), index))
            .collect()
    }

    /// Smoothed inverse document frequency per vocabulary term.
    fn fit_idf(corpus: &[Vec<String>], vocabulary: &HashMap<String, usize>) -> Vec<f32> {
        let mut document_frequency = vec![0usize; vocabulary.len()];
        for doc in corpus {
            let mut seen = vec![false; vocabulary.len()];
            for term in doc {
                if let Some(&index) = vocabulary.get(term) {
                    if !seen[index] {
                        seen[index] = true;
                        document_frequency[index] += 1;
                    }
                }
            }
        }

        let n = corpus.len() as f32;
        document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect()
    }

    /// L2-normalized tf-idf vector for one tokenized document.
    fn weigh(doc: &[String], vocabulary: &HashMap<String, usize>, idf: &[f32]) -> Vec<f32> {
        let mut vector = vec![0.0f32; vocabulary.len()];
        for term in doc {
            if let Some(&index) = vocabulary.get(term) {
                vector[index] += 1.0;
            }
        }
        for (index, weight) in vector.iter_mut().enumerate() {
            *weight *= idf[index];
        }

        let norm = vector.iter().map(|w| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for weight in &mut vector {
                *weight /= norm;
            }
        }
        vector
    }
}

impl SimilarityScorer for LexicalSimilarity {
    fn score(&self, query: &str, documents: &[String]) -> Result<Vec<f32>> {
        let mut corpus = Vec::with_capacity(documents.len() + 1);
        corpus.push(Self::tokenize(query));
        for document in documents {
            corpus.push(Self::tokenize(document));
        }

        let vocabulary = self.fit_vocabulary(&corpus);
        let idf = Self::fit_idf(&corpus, &vocabulary);

        let query_vector = Self::weigh(&corpus[0], &vocabulary, &idf);
        let scores = corpus[1..]
            .iter()
            .map(|doc| {
                let doc_vector = Self::weigh(doc, &vocabulary, &idf);
                // both vectors are unit length, cosine reduces to the dot
                query_vector
                    .iter()
                    .zip(doc_vector.iter())
                    .map(|(q, d)| q * d)
                    .sum::<f32>()
            })
            .collect();
        Ok(scores)
    }

    fn name(&self) -> &'static str {
        "lexical"
    }
}

/// Cosine similarity in the embedding space of a fixed pre-trained
/// Model2Vec static model.
pub struct SemanticSimilarity {
    model: StaticModel,
}

impl SemanticSimilarity {
    pub fn load(config: &Config) -> Result<Self> {
        let model_path = config.model_path();
        info!("Loading embedding model from: {}", model_path.display());

        let model = StaticModel::from_pretrained(&model_path, None, None, None)
            .map_err(|e| MatcherError::Embedding(format!("Failed to load model: {}", e)))?;
        Ok(Self { model })
    }
}

impl SimilarityScorer for SemanticSimilarity {
    fn score(&self, query: &str, documents: &[String]) -> Result<Vec<f32>> {
        let mut batch = Vec::with_capacity(documents.len() + 1);
        batch.push(query.to_string());
        batch.extend_from_slice(documents);

        let embeddings = self.model.encode(&batch);
        let (query_embedding, document_embeddings) = embeddings
            .split_first()
            .ok_or_else(|| MatcherError::Embedding("model returned no embeddings".to_string()))?;

        document_embeddings
            .iter()
            .map(|embedding| cosine_similarity(query_embedding, embedding))
            .collect()
    }

    fn name(&self) -> &'static str {
        "semantic"
    }
}

/// Calculate cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(MatcherError::Scoring(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (norm_a * norm_b))
    }
}

/// The configured scoring variant behind one seam.
pub struct SimilarityEngine {
    scorer: Box<dyn SimilarityScorer>,
}

impl SimilarityEngine {
    pub fn from_config(config: &Config) -> Result<Self> {
        let scorer: Box<dyn SimilarityScorer> = match config.similarity.strategy {
            SimilarityStrategy::Lexical => {
                Box::new(LexicalSimilarity::new(config.similarity.max_features))
            }
            SimilarityStrategy::Semantic => Box::new(SemanticSimilarity::load(config)?),
        };
        info!("Similarity engine ready ({})", scorer.name());
        Ok(Self { scorer })
    }

    pub fn score(&self, query: &str, documents: &[String]) -> Result<Vec<f32>> {
        self.scorer.score(query, documents)
    }

    pub fn strategy_name(&self) -> &'static str {
        self.scorer.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexical() -> LexicalSimilarity {
        LexicalSimilarity::new(5000)
    }

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn identical_document_scores_near_one() {
        let query = "senior rust engineer with tokio experience";
        let scores = lexical().score(query, &docs(&[query])).unwrap();
        assert!((scores[0] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn disjoint_document_scores_zero() {
        let scores = lexical()
            .score(
                "senior rust engineer",
                &docs(&["pastry chef baking croissants"]),
            )
            .unwrap();
        assert_eq!(scores[0], 0.0);
    }

    #[test]
    fn closer_document_ranks_higher() {
        let scores = lexical()
            .score(
                "rust engineer building async network services",
                &docs(&[
                    "rust engineer experienced with async network programming",
                    "marketing manager planning campaigns",
                ]),
            )
            .unwrap();
        assert!(scores[0] > scores[1]);
    }

    #[test]
    fn stop_words_carry_no_signal() {
        let scores = lexical()
            .score(
                "the and with from over",
                &docs(&["the with from over and again"]),
            )
            .unwrap();
        assert_eq!(scores[0], 0.0);
    }

    #[test]
    fn scores_are_deterministic_across_runs() {
        let query = "data engineer with spark and airflow";
        let documents = docs(&[
            "spark pipelines and airflow orchestration",
            "frontend developer shipping react applications",
            "data warehouse engineer",
        ]);
        let first = lexical().score(query, &documents).unwrap();
        let second = lexical().score(query, &documents).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn vocabulary_cap_limits_features() {
        let tight = LexicalSimilarity::new(2);
        let corpus = vec![
            LexicalSimilarity::tokenize("alpha beta gamma delta"),
            LexicalSimilarity::tokenize("alpha beta"),
        ];
        let vocabulary = tight.fit_vocabulary(&corpus);
        assert_eq!(vocabulary.len(), 2);
        assert!(vocabulary.contains_key("alpha"));
        assert!(vocabulary.contains_key("beta"));
    }

    #[test]
    fn single_character_tokens_are_ignored() {
        let tokens = LexicalSimilarity::tokenize("a c x rust");
        assert_eq!(tokens, vec!["rust".to_string()]);
    }

    #[test]
    fn semantic_engine_fails_without_model_files() {
        let mut config = Config::default();
        config.similarity.strategy = SimilarityStrategy::Semantic;
        config.models.models_dir = std::path::PathBuf::from("/nonexistent-models");
        config.models.embedding_model = "no-such-model-anywhere".to_string();

        let result = SimilarityEngine::from_config(&config);
        assert!(result.is_err(), "engine must not come up without model files");
    }

    #[test]
    fn cosine_rejects_mismatched_dimensions() {
        let err = cosine_similarity(&[1.0, 0.0], &[1.0]).unwrap_err();
        assert!(matches!(err, MatcherError::Scoring(_)));
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        let score = cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn cosine_of_parallel_vectors_is_one() {
        let score = cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((score - 1.0).abs() < 1e-6);
    }
}
