use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use transcript_stats::{
    build_report, emit_record, emit_report, enumerate_transcripts, format_summary, ingest_document, load_documents, markdown_glob,
    validate_config, EnumerateError, Ingested, LoadedDocuments, Normalizer, RunConfig, StatsError, TranscriptRecord,
    DEFAULT_CONFIG_FILE,
};

#[derive(Parser, Debug)]
#[command(name = "transcript-stats", version, about = "Clean video transcripts and compute channel statistics")]
struct Cli {
    /// Run configuration (YAML). Defaults to ./transcripts.yaml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize raw transcripts and write them in the labeled layout
    Clean {
        /// Folder containing original transcripts
        input: Option<String>,
        /// Folder to save cleaned transcripts
        output: Option<String>,
    },
    /// Compute statistics and the histogram report for a folder of transcripts
    Analyze {
        /// Folder containing transcript files
        folder: Option<String>,
        /// Output directory for report.json
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    // 1) Configuration
    let cfg = load_config(cli.config.as_deref());
    let normalizer = match cfg.normalizer() {
        Ok(n) => n,
        Err(e) => {
            eprintln!("{}", serde_json::json!({"tool":"validate_config", "error": e.to_string(), "error_code": 3}));
            std::process::exit(3);
        }
    };

    let code = match cli.command {
        Command::Clean { input, output } => {
            let glob = input.as_deref().map(markdown_glob).unwrap_or_else(|| cfg.input_glob());
            let outdir = output.unwrap_or_else(|| cfg.output_dir());
            run_clean(&glob, &outdir, &normalizer)
        }
        Command::Analyze { folder, output } => {
            let glob = folder.as_deref().map(markdown_glob).unwrap_or_else(|| markdown_glob(&cfg.output_dir()));
            let outdir = output.unwrap_or_else(|| cfg.report_dir());
            run_analyze(&glob, &outdir, &normalizer, cfg.histogram_bins())
        }
    };
    std::process::exit(code);
}

fn load_config(explicit: Option<&Path>) -> RunConfig {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                eprintln!("{}", serde_json::json!({"tool":"validate_config", "status":"default"}));
                return RunConfig::default();
            }
            default
        }
    };
    match validate_config(&path) {
        Ok(cfg) => {
            eprintln!(
                "{}",
                serde_json::json!({
                    "tool":"validate_config",
                    "file": path,
                    "status":"ok",
                    "input_glob": cfg.input_glob(),
                    "output_dir": cfg.output_dir(),
                    "annotations": cfg.annotation_patterns().len(),
                })
            );
            cfg
        }
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::json!({
                    "tool":"validate_config",
                    "file": path,
                    "error": e.to_string(),
                    "error_code": 3
                })
            );
            std::process::exit(3);
        }
    }
}

/// Enumerate and read inputs. `Err` carries the exit code.
fn discover(glob: &str) -> Result<LoadedDocuments, i32> {
    let files = match enumerate_transcripts(glob) {
        Ok(files) => files,
        Err(EnumerateError::NoFilesFound { guidance }) => {
            eprintln!(
                "{}",
                serde_json::json!({
                    "tool":"enumerate_transcripts",
                    "pattern": glob,
                    "error":"NoFilesFound",
                    "error_code":1
                })
            );
            eprintln!("{}", guidance);
            return Err(1);
        }
    };
    eprintln!("{}", serde_json::json!({"tool":"enumerate_transcripts", "pattern": glob, "count": files.len()}));

    let loaded = load_documents(&files);
    for f in &loaded.failures {
        eprintln!("{}", serde_json::json!({"tool":"load_documents", "file": f.path, "error": f.message}));
    }
    if loaded.documents.is_empty() {
        eprintln!("{}", serde_json::json!({"tool":"load_documents", "error":"NothingReadable", "error_code":1}));
        return Err(1);
    }
    Ok(loaded)
}

fn ingest_logged(name: &str, text: &str, normalizer: &Normalizer) -> Ingested {
    let ingested = ingest_document(name, text, normalizer);
    eprintln!(
        "{}",
        serde_json::json!({
            "tool":"ingest_document",
            "file": name,
            "dialect": ingested.dialect,
            "boundary_found": ingested.boundary_found,
            "view_count": ingested.record.view_count(),
            "word_count": ingested.record.word_count(),
            "annotations_removed": ingested.normalize.annotations_removed,
            "brackets_removed": ingested.normalize.brackets_removed
        })
    );
    ingested
}

fn run_clean(glob: &str, outdir: &str, normalizer: &Normalizer) -> i32 {
    let loaded = match discover(glob) {
        Ok(l) => l,
        Err(code) => return code,
    };

    let mut cleaned = 0usize;
    let mut failed = loaded.failures.len();
    for (name, text) in &loaded.documents {
        let ingested = ingest_logged(name, text, normalizer);
        match emit_record(&ingested, outdir) {
            Ok(paths) => {
                cleaned += 1;
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "tool":"emit_files",
                        "file": name,
                        "md_path": paths.md_path,
                        "meta_path": paths.meta_path
                    })
                );
            }
            Err(e) => {
                failed += 1;
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "tool":"emit_files",
                        "file": name,
                        "error": e.to_string(),
                        "error_code": 6
                    })
                );
            }
        }
    }

    eprintln!("{}", serde_json::json!({"tool":"clean", "cleaned": cleaned, "failed": failed, "output_dir": outdir}));
    if cleaned == 0 && failed > 0 {
        6
    } else {
        0
    }
}

fn run_analyze(glob: &str, outdir: &str, normalizer: &Normalizer, bins: usize) -> i32 {
    let loaded = match discover(glob) {
        Ok(l) => l,
        Err(code) => return code,
    };

    let records: Vec<TranscriptRecord> = loaded
        .documents
        .iter()
        .map(|(name, text)| ingest_logged(name, text, normalizer).record)
        .collect();
    let eligible = records.iter().filter(|r| r.is_valid_for_aggregation()).count();
    eprintln!("{}", serde_json::json!({"tool":"summarize", "records": records.len(), "eligible": eligible}));

    let report = match build_report(&records, bins) {
        Ok(r) => r,
        Err(StatsError::EmptyInput) => {
            eprintln!(
                "{}",
                serde_json::json!({
                    "tool":"summarize",
                    "error":"EmptyInput",
                    "error_code": 4
                })
            );
            return 4;
        }
    };

    println!("{}", format_summary(&report.summary));

    match emit_report(&report, outdir) {
        Ok(path) => {
            eprintln!("{}", serde_json::json!({"tool":"emit_report", "path": path, "series": report.series.len()}));
            0
        }
        Err(e) => {
            eprintln!("{}", serde_json::json!({"tool":"emit_report", "error": e.to_string(), "error_code": 6}));
            6
        }
    }
}
