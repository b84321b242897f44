// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

/// Parse a duration string like "200ms", "30s", "5m" into a Duration.
/// A bare number is seconds.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    // Find the numeric prefix
    let (num_str, suffix) = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| (&s[..i], &s[i..]))
        .unwrap_or((s, ""));

    let num: u64 = num_str.parse().map_err(|_| format!("invalid number in duration: {}", s))?;

    let multiplier: u64 = match suffix.trim() {
        "ms" | "millis" => return Ok(Duration::from_millis(num)),
        "" | "s" | "sec" | "secs" => 1,
        "m" | "min" | "mins" => 60,
        "h" | "hr" | "hrs" => 3600,
        other => return Err(format!("unknown duration suffix: {}", other)),
    };

    num.checked_mul(multiplier)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("duration too large: {}", s))
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
