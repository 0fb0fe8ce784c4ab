use transcript_stats::{normalize, AnnotationSet, Normalizer};

#[test]
fn removes_music_annotation_and_collapses() {
    let out = normalize("Hello [MUSIC] world");
    assert_eq!(out, "Hello world");
    assert!(!out.contains('['));
}

#[test]
fn annotations_removed_regardless_of_case() {
    let input = "a [Music] b [APPLAUSE] c [laughter] d [Background Noise] e [Speaking Foreign Language] f [♪♪] g ♪ h";
    assert_eq!(normalize(input), "a b c d e f g h");
}

#[test]
fn unknown_brackets_removed_even_across_lines() {
    assert_eq!(normalize("one [crowd\nnoise] two"), "one two");
}

#[test]
fn line_breaks_fold_into_one_paragraph() {
    assert_eq!(normalize("first line\r\nsecond\n\n\nthird\u{2028}fourth"), "first line second third fourth");
}

#[test]
fn punctuation_spacing() {
    assert_eq!(normalize("Hi , there !How are you ?Fine:ok"), "Hi, there! How are you? Fine: ok");
}

#[test]
fn idempotent_on_messy_inputs() {
    let samples = [
        "",
        "   ",
        "[Music]",
        "Hello\n[Music]\nWorld",
        "a . . b",
        "x:.a , ,b",
        "[[Music]] nested [a[b]c] tail",
        "unclosed [bracket here\nand\tthere\u{00A0}.",
        "e.g.this,that;those!these?yes",
        "♪ la la ♪ [♪] [♪♪♪]",
    ];
    for s in samples {
        let once = normalize(s);
        assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
    }
}

#[test]
fn output_has_no_line_breaks_or_double_spaces() {
    let out = normalize("A\n\nB  \t C\r\nD .");
    assert!(!out.contains('\n') && !out.contains('\r'));
    assert!(!out.contains("  "));
    assert_eq!(out, "A B C D.");
}

#[test]
fn injected_annotation_set_replaces_defaults() {
    // only the catch-all removes brackets; the custom pattern removes a bare marker
    let set = AnnotationSet::new(["<beep>"]).unwrap();
    let n = Normalizer::new(set);
    let out = n.normalize_with_stats("x <BEEP> y [Music] z");
    assert_eq!(out.text, "x y z");
    assert_eq!(out.stats.annotations_removed, 1);
    assert_eq!(out.stats.brackets_removed, 1);
}

#[test]
fn invalid_annotation_pattern_is_rejected() {
    let err = AnnotationSet::new(["[unclosed"]).unwrap_err();
    assert!(err.to_string().contains("[unclosed"));
}
