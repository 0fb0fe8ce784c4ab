use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Platform annotations stripped from transcripts by default (case-insensitive).
pub const DEFAULT_ANNOTATIONS: &[&str] = &[
    r"\[music\]",
    r"\[applause\]",
    r"\[laughter\]",
    r"\[cheering\]",
    r"\[audience\]",
    r"\[inaudible\]",
    r"\[silence\]",
    r"\[background music\]",
    r"\[background noise\]",
    r"\[intro music\]",
    r"\[outro music\]",
    r"\[theme music\]",
    r"\[upbeat music\]",
    r"\[soft music\]",
    r"\[dramatic music\]",
    r"\[foreign\]",
    r"\[speaking foreign language\]",
    r"\[♪\]",
    r"\[♪♪\]",
    r"\[♪♪♪\]",
    r"♪",
];

static ANY_BRACKET: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("bracket regex"));
static LINE_BREAKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n\u{000B}\u{000C}\u{0085}\u{2028}\u{2029}]+").expect("line break regex"));
static OTHER_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\S ]").expect("whitespace regex"));
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").expect("multi space regex"));
static SPACE_BEFORE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([.,!?;:])").expect("punct regex"));
static PUNCT_THEN_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([.,!?;:])([A-Za-z])").expect("punct regex"));

#[derive(Debug, thiserror::Error)]
#[error("invalid annotation pattern {pattern:?}: {reason}")]
pub struct AnnotationPatternError {
    pub pattern: String,
    pub reason: String,
}

/// Ordered set of case-insensitive annotation patterns removed before the
/// catch-all bracket rule runs.
#[derive(Debug, Clone)]
pub struct AnnotationSet {
    patterns: Vec<Regex>,
}

impl AnnotationSet {
    pub fn new<I, S>(patterns: I) -> Result<Self, AnnotationPatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for p in patterns {
            let p = p.as_ref();
            let re = RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .map_err(|e| AnnotationPatternError { pattern: p.to_string(), reason: e.to_string() })?;
            compiled.push(re);
        }
        Ok(Self { patterns: compiled })
    }

    pub fn empty() -> Self {
        Self { patterns: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for AnnotationSet {
    fn default() -> Self {
        static DEFAULT: Lazy<AnnotationSet> =
            Lazy::new(|| AnnotationSet::new(DEFAULT_ANNOTATIONS.iter()).expect("default annotations"));
        DEFAULT.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeStats {
    pub annotations_removed: usize,
    pub brackets_removed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOutput {
    pub text: String,
    pub stats: NormalizeStats,
}

/// Turns a raw transcript body into one clean paragraph.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    annotations: AnnotationSet,
}

impl Normalizer {
    pub fn new(annotations: AnnotationSet) -> Self {
        Self { annotations }
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    pub fn normalize(&self, text: &str) -> String {
        self.normalize_with_stats(text).text
    }

    /// Apply the rule chain in order:
    /// - annotation patterns, then any leftover `[...]` token
    /// - line breaks to a single space
    /// - other whitespace to ASCII space, then collapse runs
    /// - punctuation spacing, then trim
    ///
    /// Brackets are removed before line breaks are folded; an annotation may
    /// span lines.
    pub fn normalize_with_stats(&self, text: &str) -> NormalizeOutput {
        let mut stats = NormalizeStats::default();

        // 1) Known annotations
        let mut cleaned = text.to_string();
        for re in &self.annotations.patterns {
            let hits = re.find_iter(&cleaned).count();
            if hits > 0 {
                stats.annotations_removed += hits;
                cleaned = re.replace_all(&cleaned, "").into_owned();
            }
        }

        // 2) Catch-all brackets
        stats.brackets_removed = ANY_BRACKET.find_iter(&cleaned).count();
        let cleaned = ANY_BRACKET.replace_all(&cleaned, "");

        // 3) Line breaks
        let cleaned = LINE_BREAKS.replace_all(&cleaned, " ");

        // 4) + 5) Whitespace variants, then runs of spaces
        let cleaned = OTHER_SPACE.replace_all(&cleaned, " ");
        let cleaned = MULTI_SPACE.replace_all(&cleaned, " ");

        // 6) + 7) Punctuation spacing
        let cleaned = SPACE_BEFORE_PUNCT.replace_all(&cleaned, "$1");
        let cleaned = PUNCT_THEN_LETTER.replace_all(&cleaned, "$1 $2");

        NormalizeOutput { text: cleaned.trim().to_string(), stats }
    }
}

/// Normalize with the default annotation set.
pub fn normalize(text: &str) -> String {
    Normalizer::default().normalize(text)
}
