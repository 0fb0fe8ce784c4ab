use std::collections::HashSet;
use std::path::{Path, PathBuf};

use globwalk::GlobWalkerBuilder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::emit::output_stem;

#[derive(Debug, Error)]
pub enum EnumerateError {
    #[error("NoFilesFound")]
    NoFilesFound { guidance: String },
}

/// Enumerate transcript files using a glob pattern (e.g., "./transcripts/*.md").
/// Returns a sorted list of paths.
pub fn enumerate_transcripts(glob_pattern: &str) -> Result<Vec<PathBuf>, EnumerateError> {
    let (base, pat) = split_glob(glob_pattern);
    // a bare file pattern only looks at the base folder itself
    let depth = if pat.contains('/') { usize::MAX } else { 1 };

    let mut paths: Vec<PathBuf> = GlobWalkerBuilder::from_patterns(&base, &[pat.as_str()])
        .case_insensitive(false)
        .follow_links(false)
        .max_depth(depth)
        .build()
        .map_err(|_| EnumerateError::NoFilesFound { guidance: folder_guidance(glob_pattern) })?
        .filter_map(|e| e.ok())
        .map(|e| e.path().to_path_buf())
        .collect();

    paths.sort();
    paths.retain(|p| p.is_file());

    if paths.is_empty() {
        return Err(EnumerateError::NoFilesFound { guidance: folder_guidance(glob_pattern) });
    }

    Ok(paths)
}

/// Split a glob into its literal leading directory and the remaining pattern,
/// e.g. "./transcripts/**/*.md" -> ("./transcripts", "**/*.md").
fn split_glob(pattern: &str) -> (PathBuf, String) {
    let parts: Vec<&str> = pattern.split('/').collect();
    let literal = parts
        .iter()
        .position(|p| p.contains(['*', '?', '[', '{']))
        .unwrap_or(parts.len().saturating_sub(1));
    let base = parts[..literal].join("/");
    let rest = parts[literal..].join("/");
    let base = if base.is_empty() {
        if pattern.starts_with('/') { PathBuf::from("/") } else { PathBuf::from(".") }
    } else {
        PathBuf::from(base)
    };
    (base, rest)
}

/// Glob for `*.md` directly inside `dir`.
pub fn markdown_glob(dir: &str) -> String {
    format!("{}/*.md", dir.trim_end_matches('/'))
}

fn folder_guidance(pattern: &str) -> String {
    format!(
        "No transcript files match {}\nPut exported transcripts (.md) in the input folder, e.g. ./transcripts/VIDEO_ID.md",
        pattern
    )
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadFailure {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoadedDocuments {
    /// `(source name, text)` pairs ready for ingestion. Source names are
    /// unique and so are their output stems.
    pub documents: Vec<(String, String)>,
    pub failures: Vec<ReadFailure>,
}

/// Read every path; invalid UTF-8 is replaced, read errors are collected and
/// the rest of the batch continues. Files sharing a name (e.g. `a/x.md` and
/// `b/x.md` under a recursive glob) get `-1`, `-2`, ... suffixes in path order.
pub fn load_documents(paths: &[PathBuf]) -> LoadedDocuments {
    let mut out = LoadedDocuments::default();
    let mut used_stems: HashSet<String> = HashSet::new();
    for path in paths {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        match std::fs::read(path) {
            Ok(bytes) => {
                let name = unique_name(name, &mut used_stems);
                out.documents.push((name, String::from_utf8_lossy(&bytes).into_owned()))
            }
            Err(e) => out.failures.push(ReadFailure { path: path.display().to_string(), message: e.to_string() }),
        }
    }
    out
}

fn unique_name(name: String, used: &mut HashSet<String>) -> String {
    let stem = output_stem(&name);
    if used.insert(stem.clone()) {
        return name;
    }
    let ext = Path::new(&name).extension().map(|e| e.to_string_lossy().to_string());
    let mut i = 1;
    loop {
        let candidate = format!("{}-{}", stem, i);
        if used.insert(candidate.clone()) {
            return match ext {
                Some(ext) => format!("{}.{}", candidate, ext),
                None => candidate,
            };
        }
        i += 1;
    }
}
