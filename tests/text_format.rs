//! Tests for text_format module

use trackpipe::PipelineError;
use trackpipe::text_format::{format_duration, split_string};

#[test]
fn test_format_duration_hours() {
    assert_eq!(format_duration(3661.0, false), "1h1m1s");
}

#[test]
fn test_format_duration_seconds_only() {
    assert_eq!(format_duration(59.0, false), "59s");
    assert_eq!(format_duration(0.0, false), "0s");
}

#[test]
fn test_format_duration_days_with_hundredths() {
    assert_eq!(format_duration(90061.5, true), "1d 1h1m1s50");
}

#[test]
fn test_format_duration_days_print_zero_hours_and_minutes() {
    assert_eq!(format_duration(86_400.0, false), "1d 0h0m0s");
}

#[test]
fn test_format_duration_truncates_hundredths() {
    assert_eq!(format_duration(1.999, true), "1s99");
    assert_eq!(format_duration(61.25, true), "1m1s25");
}

#[test]
fn test_split_keeps_empty_tokens() {
    assert_eq!(split_string("a,b,,c", ",").unwrap(), vec!["a", "b", "", "c"]);
    assert_eq!(split_string("a,", ",").unwrap(), vec!["a", ""]);
}

#[test]
fn test_split_single_token() {
    assert_eq!(split_string("x", ",").unwrap(), vec!["x"]);
    assert_eq!(split_string("", ",").unwrap(), vec![""]);
}

#[test]
fn test_split_drops_none() {
    assert!(split_string("none", ",").unwrap().is_empty());
    assert_eq!(split_string("a,none,b", ",").unwrap(), vec!["a", "b"]);
}

#[test]
fn test_split_multi_char_separator() {
    assert_eq!(split_string("1::2::3", "::").unwrap(), vec!["1", "2", "3"]);
}

#[test]
fn test_split_rejects_empty_separator() {
    assert!(matches!(
        split_string("abc", ""),
        Err(PipelineError::InvalidConfigurationValue { .. })
    ));
}
