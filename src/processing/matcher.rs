//! Match pipeline: extraction, scoring, overlap, classification, aggregation

use crate::config::Config;
use crate::error::{MatcherError, Result};
use crate::input::file_detector::DocumentKind;
use crate::input::text_extractor;
use crate::processing::keywords::{self, KeywordExtractor, KeywordStrategy};
use crate::processing::similarity::SimilarityEngine;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// One uploaded candidate document. Lives for a single request and is
/// discarded after text extraction.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct MatchRequest {
    pub job_description: String,
    pub resumes: Vec<DocumentUpload>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchLevel {
    High,
    Medium,
    Low,
}

impl MatchLevel {
    /// Tier for a raw [0,1] similarity score; lower bounds are inclusive.
    pub fn from_score(score: f32) -> Self {
        if score >= 0.75 {
            MatchLevel::High
        } else if score >= 0.5 {
            MatchLevel::Medium
        } else {
            MatchLevel::Low
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub filename: String,
    /// Similarity as a percentage, two decimals.
    pub score: f32,
    pub match_level: MatchLevel,
    /// Wire names keep the public matcher API stable; the fields are the
    /// linguistic and stop-word keyword strategies respectively.
    #[serde(rename = "spacy_overlap")]
    pub linguistic_overlap: f32,
    #[serde(rename = "nltk_overlap")]
    pub stopword_overlap: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub matches: Vec<MatchResult>,
    pub total_resumes_processed: usize,
    pub job_description_length: usize,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failed_files: Vec<String>,
}

/// Scores a batch of candidate documents against one query. Holds the
/// process-wide similarity and keyword resources; construct once, share
/// read-only across requests.
pub struct MatchEngine {
    similarity: SimilarityEngine,
    keywords: KeywordExtractor,
    clamp_negative_scores: bool,
}

impl MatchEngine {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            similarity: SimilarityEngine::from_config(config)?,
            keywords: KeywordExtractor::new(),
            clamp_negative_scores: config.similarity.clamp_negative_scores,
        })
    }

    /// Run the full pipeline for one request.
    ///
    /// Extraction failures are local: the document lands in `failed_files`
    /// and everything else proceeds. Validation failures and a batch with
    /// zero survivors abort the request as client errors.
    pub fn score_documents(&self, request: &MatchRequest) -> Result<MatchResponse> {
        if request.job_description.trim().is_empty() || request.resumes.is_empty() {
            return Err(MatcherError::InvalidInput(
                "Missing job description or resumes".to_string(),
            ));
        }

        // token count of the query as submitted, before normalization
        let job_description_length = request.job_description.split_whitespace().count();

        let query = normalize(&request.job_description);

        let mut filenames = Vec::new();
        let mut texts = Vec::new();
        let mut failed_files = Vec::new();
        for upload in &request.resumes {
            match self.extract(upload) {
                Some(text) => {
                    filenames.push(upload.filename.clone());
                    texts.push(text);
                }
                None => failed_files.push(upload.filename.clone()),
            }
        }

        if texts.is_empty() {
            return Err(MatcherError::InvalidInput(
                "Could not extract text from any resume".to_string(),
            ));
        }

        let raw_scores = self.similarity.score(&query, &texts)?;
        debug!(
            "Scored {} document(s) with the {} strategy",
            texts.len(),
            self.similarity.strategy_name()
        );

        let query_linguistic = self.keywords.keywords(&query, KeywordStrategy::Linguistic);
        let query_stopword = self.keywords.keywords(&query, KeywordStrategy::Stopword);

        let mut matches = Vec::with_capacity(texts.len());
        for (index, text) in texts.iter().enumerate() {
            let score = self.clamp(raw_scores[index]);
            let doc_linguistic = self.keywords.keywords(text, KeywordStrategy::Linguistic);
            let doc_stopword = self.keywords.keywords(text, KeywordStrategy::Stopword);

            matches.push(MatchResult {
                filename: filenames[index].clone(),
                score: keywords::round2(score * 100.0),
                match_level: MatchLevel::from_score(score),
                linguistic_overlap: keywords::overlap_pct(&doc_linguistic, &query_linguistic),
                stopword_overlap: keywords::overlap_pct(&doc_stopword, &query_stopword),
            });
        }

        // stable sort: equal scores keep their submission order
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(MatchResponse {
            total_resumes_processed: matches.len(),
            matches,
            job_description_length,
            failed_files,
        })
    }

    /// Extract and normalize one upload. Any failure, including an
    /// unsupported suffix or empty extracted text, yields `None`.
    fn extract(&self, upload: &DocumentUpload) -> Option<String> {
        let kind = DocumentKind::from_filename(&upload.filename);
        let text = match text_extractor::extract_document(kind, &upload.bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!("Extraction failed for {}: {}", upload.filename, e);
                return None;
            }
        };

        let normalized = normalize(&text);
        if normalized.is_empty() {
            warn!("No text extracted from {}", upload.filename);
            None
        } else {
            Some(normalized)
        }
    }

    fn clamp(&self, raw: f32) -> f32 {
        let bounded = raw.min(1.0);
        if self.clamp_negative_scores {
            bounded.max(0.0)
        } else {
            bounded
        }
    }
}

/// The one normalization applied before keyword extraction, overlap, and
/// similarity alike.
fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}
