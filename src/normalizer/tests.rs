use super::*;

fn block_of(text: &str) -> ParsedCandidate {
    parse_candidate_block(text).expect("block should parse")
}

#[test]
fn test_normalize_lowercases_and_collapses() {
    assert_eq!(
        normalize_text("  Hello\nWorld   again\t "),
        "hello world again"
    );
}

#[test]
fn test_normalize_preserves_punctuation() {
    assert_eq!(normalize_text("It's a TEST, isn't it?"), "it's a test, isn't it?");
}

#[test]
fn test_normalize_idempotent() {
    let samples = [
        "  Mixed   CASE\r\nwith\nlines  ",
        "already normalized",
        "",
        "\t\n \n",
        "日本語の テキスト",
    ];
    for s in samples {
        let once = normalize_text(s);
        assert_eq!(normalize_text(&once), once, "not idempotent for {s:?}");
    }
}

#[test]
fn test_normalize_empty_and_whitespace() {
    assert_eq!(normalize_text(""), "");
    assert_eq!(normalize_text(" \t\r\n "), "");
}

#[test]
fn test_metadata_extraction() {
    let block = "shift=13\nbranch=ABC\nhello world";
    let parsed = block_of(block);
    assert_eq!(parsed.meta.len(), 2);
    assert_eq!(parsed.meta["shift"], "13");
    assert_eq!(parsed.meta["branch"], "ABC");
    assert_eq!(parsed.eval_text, "hello world");
    assert_eq!(parsed.raw_text, block);
}

#[test]
fn test_metadata_recognition_stops_at_first_content_line() {
    // "branch=ABC" comes after content, so it is content itself.
    let parsed = block_of("shift=13\nhello\nbranch=ABC");
    assert_eq!(parsed.meta.len(), 1);
    assert_eq!(parsed.meta["shift"], "13");
    assert_eq!(parsed.eval_text, "hello branch=abc");
}

#[test]
fn test_metadata_key_lowercased_value_trimmed() {
    let parsed = block_of("Branch=  ABC  \ncontent");
    assert_eq!(parsed.meta["branch"], "ABC");
}

#[test]
fn test_metadata_duplicate_key_first_wins() {
    let parsed = block_of("shift=13\nshift=99\ncontent");
    assert_eq!(parsed.meta["shift"], "13");
}

#[test]
fn test_metadata_leading_whitespace_allowed() {
    let parsed = block_of("   shift=13\ncontent");
    assert_eq!(parsed.meta["shift"], "13");
    assert_eq!(parsed.eval_text, "content");
}

#[test]
fn test_metadata_only_block_dropped() {
    assert!(parse_candidate_block("shift=13").is_none());
    assert!(parse_candidate_block("shift=13\nbranch=ABC").is_none());
}

#[test]
fn test_blank_block_dropped() {
    assert!(parse_candidate_block("").is_none());
    assert!(parse_candidate_block("   \t ").is_none());
}

#[test]
fn test_non_word_key_is_content() {
    let parsed = block_of("my-key=value\nrest");
    assert!(parsed.meta.is_empty());
    assert_eq!(parsed.eval_text, "my-key=value rest");
}

#[test]
fn test_non_ascii_key_is_content() {
    // Keys are ASCII word characters only; a Japanese "key" is candidate text.
    let parsed = block_of("日本語=説明です");
    assert!(parsed.meta.is_empty());
    assert_eq!(parsed.eval_text, "日本語=説明です");

    let parsed = block_of("場所=東京\nactual content");
    assert!(parsed.meta.is_empty());
    assert_eq!(parsed.eval_text, "場所=東京 actual content");
}

#[test]
fn test_split_on_multiple_blank_lines() {
    let input = "first block\n\n\n\nsecond block\n   \nthird block";
    let parsed = parse_candidates(input);
    let texts: Vec<&str> = parsed.iter().map(|c| c.eval_text.as_str()).collect();
    assert_eq!(texts, ["first block", "second block", "third block"]);
}

#[test]
fn test_order_preserved_through_parsing() {
    let input = "zebra\n\napple\n\nmango";
    let parsed = parse_candidates(input);
    let texts: Vec<&str> = parsed.iter().map(|c| c.eval_text.as_str()).collect();
    assert_eq!(texts, ["zebra", "apple", "mango"]);
}

#[test]
fn test_candidate_cap_and_truncation_warning() {
    let input = (0..205)
        .map(|i| format!("candidate number {i}"))
        .collect::<Vec<_>>()
        .join("\n\n");

    let parsed = parse_candidates(&input);
    assert_eq!(parsed.len(), 200);
    assert_eq!(parsed[0].eval_text, "candidate number 0");
    assert_eq!(parsed[199].eval_text, "candidate number 199");

    let validation = validate_candidates(&parsed, &input);
    assert!(validation.valid);
    assert!(
        validation
            .warnings
            .contains(&ValidationWarning::Truncated { total: 205 })
    );
}

#[test]
fn test_metadata_only_blocks_do_not_occupy_cap_slots() {
    let input = "shift=1\n\nreal content here\n\nshift=2";
    let parsed = parse_candidates(input);
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].eval_text, "real content here");
}

#[test]
fn test_validation_fails_on_empty_set() {
    let validation = validate_candidates(&[], "shift=13");
    assert!(!validation.valid);
    assert!(validation.warnings.is_empty());
}

#[test]
fn test_all_short_warning() {
    let input = "short one\n\nshort two";
    let parsed = parse_candidates(input);
    let validation = validate_candidates(&parsed, input);
    assert!(validation.valid);
    assert_eq!(validation.warnings, vec![ValidationWarning::AllShort]);
}

#[test]
fn test_no_short_warning_when_one_candidate_is_long() {
    let long = "this candidate sentence is comfortably longer than forty characters";
    let input = format!("short one\n\n{long}");
    let parsed = parse_candidates(&input);
    let validation = validate_candidates(&parsed, &input);
    assert!(validation.warnings.is_empty());
}

#[test]
fn test_truncation_and_short_warnings_are_independent() {
    let input = (0..201)
        .map(|i| format!("tiny {i}"))
        .collect::<Vec<_>>()
        .join("\n\n");
    let parsed = parse_candidates(&input);
    let validation = validate_candidates(&parsed, &input);
    assert_eq!(validation.warnings.len(), 2);
}

#[test]
fn test_crlf_input() {
    let parsed = block_of("shift=13\r\nhello\r\nworld");
    assert_eq!(parsed.meta["shift"], "13");
    assert_eq!(parsed.eval_text, "hello world");
}

#[test]
fn test_warning_display_renders_counts() {
    let rendered = ValidationWarning::Truncated { total: 205 }.to_string();
    assert!(rendered.contains("205"));
    assert!(rendered.contains("200"));
}
