use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EQ_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*={10,}\s*$").expect("boundary regex"));
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digits regex"));
static BACKTICK: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").expect("backtick regex"));
static PAREN_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((https://[^)]+)\)").expect("url regex"));

/// Header fields pulled out of a document. Absent fields stay empty / zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub video_id: String,
    pub url: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
}

/// Header/body layouts understood by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// `Label: value` lines closed by a run of `=`.
    LabeledHeader,
    /// `# Title`, `**Video ID:**`, `**URL:**`, then `## Transcript`.
    MarkupHeader,
    /// Title on line 1, `Video ID:`/`URL:` lines, then a blank line.
    PlainHeader,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub dialect: Dialect,
    pub metadata: Metadata,
    pub body: String,
    /// False when the dialect's boundary marker never appeared and the whole
    /// document was taken as body.
    pub boundary_found: bool,
}

impl Dialect {
    /// Sniff order; on each header line the first dialect whose cue matches wins.
    pub const PRIORITY: [Dialect; 3] = [Dialect::MarkupHeader, Dialect::LabeledHeader, Dialect::PlainHeader];

    /// Only the header region is sniffed: lines are scanned until one carries a
    /// dialect cue, or until a blank line at line 3 or later ends the header.
    pub fn detect(text: &str) -> Dialect {
        let mut seen_content = false;
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                if i >= 2 && seen_content {
                    break;
                }
                continue;
            }
            let first_content = !seen_content;
            seen_content = true;
            if let Some(d) = Self::PRIORITY.into_iter().find(|d| d.cue(line, first_content)) {
                return d;
            }
        }
        Dialect::PlainHeader
    }

    fn cue(self, line: &str, first_content: bool) -> bool {
        match self {
            Dialect::MarkupHeader => {
                (first_content && line.starts_with("# "))
                    || line.contains("## Transcript")
                    || line.contains("**Video ID:**")
                    || line.contains("**URL:**")
            }
            Dialect::LabeledHeader => {
                let t = line.trim();
                EQ_BOUNDARY.is_match(line)
                    || ["Title:", "View Count:", "Like Count:", "Comment Count:"].iter().any(|p| t.starts_with(p))
            }
            // plain is the fallback and has no cue of its own
            Dialect::PlainHeader => false,
        }
    }

    pub fn extract(self, text: &str) -> Extraction {
        let lines: Vec<&str> = text.lines().collect();
        let (metadata, body_start) = match self {
            Dialect::LabeledHeader => labeled_header(&lines),
            Dialect::MarkupHeader => markup_header(&lines),
            Dialect::PlainHeader => plain_header(&lines),
        };
        let boundary_found = body_start.is_some();
        let body = match body_start {
            Some(start) => lines.get(start..).unwrap_or(&[]).join("\n").trim().to_string(),
            None => text.trim().to_string(),
        };
        Extraction { dialect: self, metadata, body, boundary_found }
    }
}

/// Detect the dialect of `text` and split it into metadata and residual body.
/// Never fails; malformed input degrades to default fields.
pub fn extract_metadata(text: &str) -> Extraction {
    Dialect::detect(text).extract(text)
}

fn first_number(line: &str) -> u64 {
    DIGITS
        .find(line)
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .unwrap_or(0)
}

fn labeled_header(lines: &[&str]) -> (Metadata, Option<usize>) {
    let mut meta = Metadata::default();
    for (i, raw) in lines.iter().enumerate() {
        if EQ_BOUNDARY.is_match(raw) {
            return (meta, Some(i + 1));
        }
        let line = raw.trim();
        if let Some(rest) = line.strip_prefix("Title:") {
            meta.title = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("Video ID:") {
            meta.video_id = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("URL:") {
            meta.url = rest.trim().to_string();
        } else if line.starts_with("View Count:") {
            meta.view_count = first_number(line);
        } else if line.starts_with("Like Count:") {
            meta.like_count = first_number(line);
        } else if line.starts_with("Comment Count:") {
            meta.comment_count = first_number(line);
        }
    }
    (meta, None)
}

fn markup_header(lines: &[&str]) -> (Metadata, Option<usize>) {
    let mut meta = Metadata::default();
    for (i, line) in lines.iter().enumerate() {
        if meta.title.is_empty() {
            if let Some(rest) = line.strip_prefix("# ") {
                meta.title = rest.trim().to_string();
            }
        }
        if line.contains("**Video ID:**") {
            if let Some(c) = BACKTICK.captures(line) {
                meta.video_id = c[1].to_string();
            }
        }
        if line.contains("**URL:**") {
            if let Some(c) = PAREN_URL.captures(line) {
                meta.url = c[1].to_string();
            }
        }
        if line.contains("## Transcript") {
            return (meta, Some(i + 1));
        }
    }
    (meta, None)
}

fn plain_header(lines: &[&str]) -> (Metadata, Option<usize>) {
    let mut meta = Metadata::default();
    if let Some(first) = lines.first() {
        meta.title = first.trim_end().to_string();
    }
    for (i, line) in lines.iter().enumerate().skip(1) {
        if i >= 2 && line.trim().is_empty() {
            return (meta, Some(i + 1));
        }
        if let Some(rest) = line.strip_prefix("Video ID:") {
            meta.video_id = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("URL:") {
            meta.url = rest.trim().to_string();
        }
    }
    (meta, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_labels_take_first_digit_run() {
        assert_eq!(first_number("View Count: 1234 views"), 1234);
        assert_eq!(first_number("Like Count: n/a"), 0);
        assert_eq!(first_number("View Count: 99999999999999999999999"), 0);
    }

    #[test]
    fn sniff_prefers_markup_over_labeled() {
        let doc = "# Title\n**Video ID:** `x`\n==========\n## Transcript\nbody";
        assert_eq!(Dialect::detect(doc), Dialect::MarkupHeader);
    }

    #[test]
    fn empty_document_is_plain_without_boundary() {
        let ex = extract_metadata("");
        assert_eq!(ex.dialect, Dialect::PlainHeader);
        assert!(!ex.boundary_found);
        assert_eq!(ex.body, "");
        assert_eq!(ex.metadata, Metadata::default());
    }
}
