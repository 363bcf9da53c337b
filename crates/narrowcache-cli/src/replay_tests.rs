//! Tests for trace replay

use std::io::Cursor;

use narrowcache_core::{CacheConfig, Error};

use crate::replay::*;

const TRACE: &str = r#"
{"op":"message","message":{"id":1,"sender":"alice@example.com","channel":"design","topic":"ui","content":"mockups"}}
{"op":"message","message":{"id":2,"sender":"bob@example.com","channel":"backend","topic":"deploy","content":"shipped"}}
{"op":"narrow","filter":"channel:design"}
{"op":"message","message":{"id":3,"sender":"carol@example.com","channel":"design","topic":"ui","content":"v2"}}
{"op":"narrow","filter":"stream:Design"}
{"op":"show"}
"#;

fn run(trace: &str, config: &CacheConfig) -> (Result<ReplayReport, Error>, String) {
    let mut out = Vec::new();
    let report = replay_reader(Cursor::new(trace), config, &mut out);
    (report, String::from_utf8(out).unwrap())
}

#[test]
fn test_replay_counts_hits_and_misses() {
    // Arrange & Act
    let (report, output) = run(TRACE, &CacheConfig::default());

    // Assert
    let report = report.unwrap();
    assert_eq!(report.ops, 6);
    assert_eq!(report.messages, 3);
    assert_eq!(report.narrows, 2);
    assert_eq!(report.misses, 1);
    assert_eq!(report.hits, 1);
    assert_eq!(report.final_len, 2);
    assert_eq!(report.stats.hits, 1);
    assert!(output.contains("narrow channel:design: miss (1 messages)"));
    assert!(output.contains("narrow channel:design: hit (2 messages)"));
}

#[test]
fn test_show_lists_recency_order() {
    let (_, output) = run(TRACE, &CacheConfig::default());

    assert!(output.contains("  [0] (all messages) (3 messages)"));
    assert!(output.contains("  [1] channel:design (2 messages)"));
}

#[test]
fn test_replay_respects_storage_limit() {
    // Arrange
    let trace = r#"
{"op":"narrow","filter":"topic:a"}
{"op":"narrow","filter":"topic:b"}
{"op":"narrow","filter":"topic:c"}
{"op":"narrow","filter":"topic:a"}
"#;
    let config = CacheConfig {
        storage_limit: 3,
        key_reset_threshold: 100,
    };

    // Act
    let (report, _) = run(trace, &config);

    // Assert
    let report = report.unwrap();
    assert_eq!(report.misses, 4);
    assert_eq!(report.final_len, 3);
    assert_eq!(report.stats.evictions, 2);
}

#[test]
fn test_clear_resets_cache() {
    let trace = r#"
{"op":"narrow","filter":"topic:a"}
{"op":"clear"}
{"op":"narrow","filter":"topic:a"}
"#;

    let (report, output) = run(trace, &CacheConfig::default());

    let report = report.unwrap();
    assert_eq!(report.misses, 2);
    assert_eq!(report.final_len, 2);
    assert!(output.contains("cleared"));
}

#[test]
fn test_malformed_line_reports_line_number() {
    let trace = "{\"op\":\"show\"}\n{\"op\":\"teleport\"}\n";

    let (report, _) = run(trace, &CacheConfig::default());

    match report {
        Err(Error::InvalidTrace { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected InvalidTrace, got {other:?}"),
    }
}

#[test]
fn test_invalid_filter_reports_line_number() {
    let trace = "\n{\"op\":\"narrow\",\"filter\":\"channel:\"}\n";

    let (report, _) = run(trace, &CacheConfig::default());

    match report {
        Err(Error::InvalidTrace { line, message }) => {
            assert_eq!(line, 2);
            assert!(message.contains("operand"));
        }
        other => panic!("expected InvalidTrace, got {other:?}"),
    }
}

#[test]
fn test_parse_line_skips_blank() {
    assert!(parse_line("   ", 1).unwrap().is_none());
    assert!(matches!(
        parse_line(r#"{"op":"clear"}"#, 1).unwrap(),
        Some(TraceOp::Clear)
    ));
}
