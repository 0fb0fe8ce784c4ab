use serde::Serialize;

use crate::extract::{extract_metadata, Dialect, Metadata};
use crate::normalize::{NormalizeStats, Normalizer};

/// Separator written between the header block and the body of a cleaned file.
pub const BOUNDARY_LINE_LEN: usize = 40;

/// One parsed and normalized transcript document. Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptRecord {
    source_name: String,
    title: String,
    video_id: String,
    url: String,
    view_count: u64,
    like_count: u64,
    comment_count: u64,
    word_count: usize,
    transcript_text: String,
}

impl TranscriptRecord {
    /// Build a record from extracted metadata and an already-normalized body.
    /// `word_count` is derived from the body and cannot drift from it.
    pub fn assemble(source_name: impl Into<String>, metadata: Metadata, transcript_text: String) -> Self {
        let word_count = transcript_text.split_whitespace().count();
        Self {
            source_name: source_name.into(),
            title: metadata.title,
            video_id: metadata.video_id,
            url: metadata.url,
            view_count: metadata.view_count,
            like_count: metadata.like_count,
            comment_count: metadata.comment_count,
            word_count,
            transcript_text,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn video_id(&self) -> &str {
        &self.video_id
    }
    pub fn url(&self) -> &str {
        &self.url
    }
    pub fn view_count(&self) -> u64 {
        self.view_count
    }
    pub fn like_count(&self) -> u64 {
        self.like_count
    }
    pub fn comment_count(&self) -> u64 {
        self.comment_count
    }
    pub fn word_count(&self) -> usize {
        self.word_count
    }
    pub fn transcript_text(&self) -> &str {
        &self.transcript_text
    }

    /// Only records with at least one view feed the statistics engine.
    pub fn is_valid_for_aggregation(&self) -> bool {
        self.view_count > 0
    }
}

/// A record plus the diagnostics gathered while building it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingested {
    pub record: TranscriptRecord,
    pub dialect: Dialect,
    pub boundary_found: bool,
    pub normalize: NormalizeStats,
}

/// Extract, normalize and assemble one document.
pub fn ingest_document(source_name: &str, raw: &str, normalizer: &Normalizer) -> Ingested {
    let extraction = extract_metadata(raw);
    let cleaned = normalizer.normalize_with_stats(&extraction.body);
    Ingested {
        record: TranscriptRecord::assemble(source_name, extraction.metadata, cleaned.text),
        dialect: extraction.dialect,
        boundary_found: extraction.boundary_found,
        normalize: cleaned.stats,
    }
}

/// Ingest a batch of `(identifier, text)` pairs. Order is preserved.
pub fn ingest_documents<I, N, T>(docs: I, normalizer: &Normalizer) -> Vec<Ingested>
where
    I: IntoIterator<Item = (N, T)>,
    N: AsRef<str>,
    T: AsRef<str>,
{
    docs.into_iter()
        .map(|(name, text)| ingest_document(name.as_ref(), text.as_ref(), normalizer))
        .collect()
}

/// Render a record in the labeled-header layout. Unknown values are written
/// as empty strings or zero so every label is always present.
pub fn format_record(record: &TranscriptRecord) -> String {
    let mut out = Vec::new();
    out.push(format!("Title: {}", record.title));
    out.push(format!("Video ID: {}", record.video_id));
    out.push(format!("URL: {}", record.url));
    out.push(format!("View Count: {}", record.view_count));
    out.push(format!("Like Count: {}", record.like_count));
    // not tracked on the record; kept for layout compatibility
    out.push("Favorite Count: 0".to_string());
    out.push(format!("Comment Count: {}", record.comment_count));
    out.push(String::new());
    out.push("=".repeat(BOUNDARY_LINE_LEN));
    out.push(String::new());
    out.push(record.transcript_text.clone());
    out.join("\n")
}
