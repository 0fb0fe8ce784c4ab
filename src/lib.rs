//! Transcript ingestion and channel statistics.
//!
//! Documents exported in one of several header dialects are split into
//! metadata and body, the body is normalized into a single paragraph, and the
//! resulting records are reduced to descriptive statistics and histogram data.

pub mod config;
pub mod discover;
pub mod emit;
pub mod extract;
pub mod normalize;
pub mod record;
pub mod report;
pub mod stats;

pub use config::{parse_config, validate_config, ConfigError, RunConfig, DEFAULT_CONFIG_FILE};
pub use discover::{enumerate_transcripts, load_documents, markdown_glob, EnumerateError, LoadedDocuments, ReadFailure};
pub use emit::{emit_files, emit_record, emit_report, output_stem, record_meta, sha256_hex, EmitError, EmitPaths};
pub use extract::{extract_metadata, Dialect, Extraction, Metadata};
pub use normalize::{normalize, AnnotationPatternError, AnnotationSet, NormalizeOutput, NormalizeStats, Normalizer, DEFAULT_ANNOTATIONS};
pub use record::{format_record, ingest_document, ingest_documents, Ingested, TranscriptRecord};
pub use report::{build_report, format_summary, thousands, HistogramSeries, Report};
pub use stats::{
    distribution, histogram, like_view_ratios, percentile, quartiles, summarize, word_count_series, Distribution, Histogram,
    LikeViewRatios, Quartiles, RatioSeries, StatsError, StatsSummary, DEFAULT_HISTOGRAM_BINS,
};
