use std::fs;

use transcript_stats::{parse_config, validate_config, ConfigError, RunConfig, DEFAULT_HISTOGRAM_BINS};

#[test]
fn defaults_when_sections_missing() {
    let cfg = parse_config("id: channel\n").unwrap();
    assert_eq!(cfg.input_glob(), "./transcripts/*.md");
    assert_eq!(cfg.output_dir(), "./cleaned");
    assert_eq!(cfg.report_dir(), ".");
    assert_eq!(cfg.histogram_bins(), DEFAULT_HISTOGRAM_BINS);
    assert!(cfg.annotation_set().unwrap().len() > 10);
}

#[test]
fn full_config_overrides_defaults() {
    let raw = r#"
id: channel
inputs:
  path: ./raw/**/*.md
outputs:
  dir: ./out
  report_dir: ./reports
annotations:
  - '\[music\]'
  - '\[crosstalk\]'
histogram:
  bins: 20
"#;
    let cfg = parse_config(raw).unwrap();
    assert_eq!(cfg.input_glob(), "./raw/**/*.md");
    assert_eq!(cfg.output_dir(), "./out");
    assert_eq!(cfg.report_dir(), "./reports");
    assert_eq!(cfg.histogram_bins(), 20);
    assert_eq!(cfg.annotation_patterns().len(), 2);
    let n = cfg.normalizer().unwrap();
    assert_eq!(n.normalize("a [CROSSTALK] b"), "a b");
}

#[test]
fn rejects_bad_patterns_and_zero_bins() {
    let err = parse_config("id: x\nannotations:\n  - '(unclosed'\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    let err = parse_config("id: x\nhistogram:\n  bins: 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    let err = parse_config("id: '  '\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    let err = parse_config("id: [unterminated\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn validate_config_reads_file() {
    let td = tempfile::tempdir().unwrap();
    let p = td.path().join("transcripts.yaml");
    fs::write(&p, "id: from-file\noutputs:\n  dir: ./somewhere\n").unwrap();
    let cfg = validate_config(&p).unwrap();
    assert_eq!(cfg.id, "from-file");
    assert_eq!(cfg.output_dir(), "./somewhere");

    let missing = validate_config(&td.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(missing, ConfigError::Read(_)));
}

#[test]
fn default_config_uses_builtin_annotations() {
    let cfg = RunConfig::default();
    assert_eq!(cfg.normalizer().unwrap().normalize("[Applause] hi"), "hi");
}
