//! Plagiarism-check pipeline against the external text-similarity API.
//!
//! Download a submitted file, sniff its MIME type, extract text, send a
//! snippet to the scoring service, and hand the parsed outcome back to the
//! caller. Runs once, synchronously, with no retries; the caller persists
//! NULLs when any step fails.

use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use util::config;

/// The scoring API rejects shorter extracts.
pub const MIN_TEXT_CHARS: usize = 100;
/// Only the leading snippet of the extracted text is scored.
pub const SNIPPET_CHARS: usize = 100;

static XML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static PARAGRAPH_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"</w:p>").unwrap());

#[derive(Debug, Error)]
pub enum PlagiarismError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("file download returned status {0}")]
    DownloadStatus(u16),

    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("failed to read document archive: {0}")]
    Archive(String),

    #[error("extracted text too short for scoring ({0} chars)")]
    TextTooShort(usize),

    #[error("scoring API error: {0}")]
    Api(String),
}

/// Parsed result of a completed scoring call.
#[derive(Debug, Clone)]
pub struct PlagiarismOutcome {
    pub score: Option<f32>,
    pub sources: Vec<serde_json::Value>,
}

impl PlagiarismOutcome {
    /// The sources array serialized for the `plagiarism_report` column.
    pub fn report_json(&self) -> String {
        serde_json::to_string(&self.sources).unwrap_or_else(|_| "[]".to_string())
    }
}

#[derive(Deserialize)]
struct ScoreBlock {
    score: f32,
}

#[derive(Deserialize)]
struct ScoreResponse {
    #[serde(default)]
    result: Option<ScoreBlock>,
    #[serde(default)]
    sources: Vec<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

pub struct PlagiarismClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PlagiarismClient {
    pub fn from_config() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config::plagiarism_api_url(),
            api_key: config::plagiarism_api_key(),
        }
    }

    /// Full pipeline for one submitted file URL.
    pub async fn check_file_url(&self, file_url: &str) -> Result<PlagiarismOutcome, PlagiarismError> {
        let text = self.fetch_and_extract_text(file_url).await?;
        let snippet = scoring_snippet(&text)?;
        self.score_text(&snippet).await
    }

    /// Downloads the uploaded file and extracts its text.
    async fn fetch_and_extract_text(&self, file_url: &str) -> Result<String, PlagiarismError> {
        let resp = self.http.get(file_url).send().await?;
        if !resp.status().is_success() {
            return Err(PlagiarismError::DownloadStatus(resp.status().as_u16()));
        }

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
            .unwrap_or_else(|| sniff_mime_from_url(file_url));

        let body = resp.bytes().await?;

        if content_type.contains("word") {
            extract_docx_text(&body)
        } else {
            // The original submission flow accepted PDF uploads but never had
            // working PDF extraction; those checks end with a NULL score.
            Err(PlagiarismError::UnsupportedFileType(content_type))
        }
    }

    /// Sends the snippet to the scoring API and parses the response.
    async fn score_text(&self, text: &str) -> Result<PlagiarismOutcome, PlagiarismError> {
        let url = format!("{}/v2/plagiarism", self.base_url);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;

        let parsed = resp.json::<ScoreResponse>().await?;

        if let Some(error) = parsed.error {
            return Err(PlagiarismError::Api(error));
        }

        Ok(PlagiarismOutcome {
            score: parsed.result.map(|r| r.score),
            sources: parsed.sources,
        })
    }
}

/// MIME type guessed from the URL path when the file host omits a
/// `Content-Type` header.
fn sniff_mime_from_url(file_url: &str) -> String {
    let path = file_url.split('?').next().unwrap_or(file_url);
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string()
}

/// Pulls the raw text out of a DOCX archive (`word/document.xml`), dropping
/// markup and decoding the handful of entities Word emits.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, PlagiarismError> {
    let cursor = Cursor::new(bytes);
    let mut archive =
        zip::ZipArchive::new(cursor).map_err(|e| PlagiarismError::Archive(e.to_string()))?;

    let mut document = archive
        .by_name("word/document.xml")
        .map_err(|e| PlagiarismError::Archive(e.to_string()))?;

    let mut xml = String::new();
    document
        .read_to_string(&mut xml)
        .map_err(|e| PlagiarismError::Archive(e.to_string()))?;

    let with_breaks = PARAGRAPH_END_RE.replace_all(&xml, "\n");
    let stripped = XML_TAG_RE.replace_all(&with_breaks, "");

    Ok(stripped
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .trim()
        .to_string())
}

/// The leading snippet submitted for scoring. Extracts shorter than the
/// service minimum are rejected here rather than round-tripping to the API.
pub fn scoring_snippet(text: &str) -> Result<String, PlagiarismError> {
    let snippet: String = text.chars().take(SNIPPET_CHARS).collect();
    if snippet.chars().count() < MIN_TEXT_CHARS {
        return Err(PlagiarismError::TextTooShort(snippet.chars().count()));
    }
    Ok(snippet)
}
