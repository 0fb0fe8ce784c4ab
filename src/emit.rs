use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::{format_record, Ingested};
use crate::report::Report;

pub const REPORT_FILE: &str = "report.json";

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("WriteFailed: {0}")]
    WriteFailed(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitPaths {
    pub md_path: String,
    pub meta_path: String,
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), EmitError> {
    let pid = std::process::id();
    let file_name = path.file_name().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
    let tmp = path.with_file_name(format!("{}.tmp.{}", file_name, pid));
    std::fs::write(&tmp, bytes).map_err(|e| EmitError::WriteFailed(e.to_string()))?;
    std::fs::rename(&tmp, path).map_err(|e| EmitError::WriteFailed(e.to_string()))
}

/// Atomically write a text body and its meta JSON into outdir with the given stem.
pub fn emit_files(text: &str, meta: &serde_json::Value, outdir: &str, stem: &str) -> Result<EmitPaths, EmitError> {
    std::fs::create_dir_all(outdir).map_err(|e| EmitError::WriteFailed(e.to_string()))?;
    let md_path = Path::new(outdir).join(format!("{}.md", stem));
    let meta_path = Path::new(outdir).join(format!("{}.meta.json", stem));

    let meta_bytes = serde_json::to_vec_pretty(meta).map_err(|e| EmitError::WriteFailed(e.to_string()))?;
    write_atomic(&md_path, text.as_bytes())?;
    write_atomic(&meta_path, &meta_bytes)?;

    Ok(EmitPaths { md_path: md_path.to_string_lossy().to_string(), meta_path: meta_path.to_string_lossy().to_string() })
}

/// File stem for a record's output, taken from its source name.
pub fn output_stem(source_name: &str) -> String {
    let stem = Path::new(source_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    if stem.trim().is_empty() {
        "transcript".to_string()
    } else {
        stem
    }
}

/// Sidecar metadata for one cleaned record, with a fingerprint over the rest
/// of the object.
pub fn record_meta(ingested: &Ingested) -> serde_json::Value {
    let r = &ingested.record;
    let meta = serde_json::json!({
        "source_name": r.source_name(),
        "dialect": ingested.dialect,
        "boundary_found": ingested.boundary_found,
        "title": r.title(),
        "video_id": r.video_id(),
        "url": r.url(),
        "view_count": r.view_count(),
        "like_count": r.like_count(),
        "comment_count": r.comment_count(),
        "word_count": r.word_count(),
        "normalize": ingested.normalize,
    });
    let bytes = serde_json::to_vec(&meta).unwrap_or_default();
    let mut full = meta.as_object().cloned().unwrap_or_default();
    full.insert("fingerprint".to_string(), serde_json::json!(sha256_hex(&bytes)));
    serde_json::Value::Object(full)
}

/// Write a cleaned record in the labeled layout plus its sidecar meta.
pub fn emit_record(ingested: &Ingested, outdir: &str) -> Result<EmitPaths, EmitError> {
    let stem = output_stem(ingested.record.source_name());
    emit_files(&format_record(&ingested.record), &record_meta(ingested), outdir, &stem)
}

/// Write the renderer hand-off JSON into outdir.
pub fn emit_report(report: &Report, outdir: &str) -> Result<String, EmitError> {
    std::fs::create_dir_all(outdir).map_err(|e| EmitError::WriteFailed(e.to_string()))?;
    let path = Path::new(outdir).join(REPORT_FILE);
    let bytes = serde_json::to_vec_pretty(report).map_err(|e| EmitError::WriteFailed(e.to_string()))?;
    write_atomic(&path, &bytes)?;
    Ok(path.to_string_lossy().to_string())
}

// Utility to compute sha256 hex
pub fn sha256_hex(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let out = hasher.finalize();
    out.iter().map(|b| format!("{:02x}", b)).collect()
}
