use crate::error::{PipelineError, Result};

/// Value that stands for an explicitly empty list in configuration.
pub const NONE_TOKEN: &str = "none";

const SECONDS_PER_DAY: f64 = 24.0 * 3600.0;

/// Formats elapsed seconds as `1d 2h3m4s`, leading zero units omitted.
///
/// Seconds are always printed. With `with_hundredths` the truncated
/// hundredths follow the seconds on two digits, e.g. `1m5s07`.
///
/// `seconds` must not be negative; a negative input renders as `0s`.
pub fn format_duration(seconds: f64, with_hundredths: bool) -> String {
    let mut rest = seconds;

    // unit arithmetic stays in f64, huge inputs must not overflow
    let days = (rest / SECONDS_PER_DAY) as u64;
    rest -= days as f64 * SECONDS_PER_DAY;
    let hours = (rest / 3600.0) as u32;
    rest -= f64::from(hours) * 3600.0;
    let minutes = (rest / 60.0) as u32;
    rest -= f64::from(minutes) * 60.0;
    let whole_seconds = rest as u32;
    rest -= f64::from(whole_seconds);
    let hundredths = (rest * 100.0) as u32;

    let mut out = String::new();
    if days != 0 {
        out.push_str(&format!("{days}d "));
    }
    if hours != 0 || days != 0 {
        out.push_str(&format!("{hours}h"));
    }
    if minutes != 0 || hours != 0 || days != 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&format!("{whole_seconds}s"));
    if with_hundredths {
        out.push_str(&format!("{hundredths:02}"));
    }
    out
}

/// Splits `input` on every occurrence of `separator`.
///
/// Empty tokens are kept, `"none"` tokens are dropped. An empty separator
/// is rejected.
pub fn split_string(input: &str, separator: &str) -> Result<Vec<String>> {
    if separator.is_empty() {
        return Err(PipelineError::invalid_value(
            "split_string",
            "separator",
            separator,
            "separator must not be empty",
        ));
    }

    Ok(input
        .split(separator)
        .filter(|token| *token != NONE_TOKEN)
        .map(str::to_string)
        .collect())
}
