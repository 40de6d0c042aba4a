//! Text forms of the counters a presentation layer shows.

/// Three-character mines-remaining counter, negative values keep a sign digit.
pub fn format_counter(num: i32) -> String {
    match num {
        ..-99 => "-99".to_string(),
        -99..0 => format!("-{:02}", -num),
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

/// Zero-padded `mm:ss`, minutes widen past 99 instead of wrapping.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Inverse of [`format_clock`]; seconds must be below 60.
pub fn parse_clock(text: &str) -> Option<u64> {
    let (minutes, seconds) = text.split_once(':')?;
    if !is_digits(minutes) || !is_digits(seconds) {
        return None;
    }
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    minutes.checked_mul(60)?.checked_add(seconds)
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
