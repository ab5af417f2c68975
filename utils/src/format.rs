//! Display formatting for metrics and durations.

/// Shown while a duration is not yet known.
pub const TIME_PLACEHOLDER: &str = "--d --h --m --s";
/// Shown once a countdown has elapsed.
pub const TIME_ZERO: &str = "0d 0h 0m 0s";

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
const SECONDS_PER_HOUR: i64 = 60 * 60;

const COMPACT_SUFFIXES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Scaled magnitudes at or above this render without fractional digits (`123M`).
const COMPACT_WHOLE_THRESHOLD: f64 = 100.0;

/// Formats a quantity with a magnitude suffix (`K`, `M`, `B`, `T`).
///
/// Negative and non-finite values render as `"0"`. Values under 1000 keep up to
/// `decimals` fractional digits with trailing zeros trimmed.
pub fn format_compact_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() || value <= 0.0 {
        return "0".to_string();
    }
    if value < 1e3 {
        let formatted = trim_fraction(format!("{:.*}", decimals, value));
        if !reaches_thousand(&formatted) {
            return formatted;
        }
        // 999.999 rounds to 1000, which reads as 1K
        return format!("{}K", format_scaled(value / 1e3, decimals));
    }
    for (i, (threshold, suffix)) in COMPACT_SUFFIXES.iter().enumerate() {
        if value >= *threshold {
            let formatted = format_scaled(value / threshold, decimals);
            if i > 0 && reaches_thousand(&formatted) {
                let (larger, larger_suffix) = COMPACT_SUFFIXES[i - 1];
                return format!("{}{}", format_scaled(value / larger, decimals), larger_suffix);
            }
            return format!("{}{}", formatted, suffix);
        }
    }
    trim_fraction(format!("{:.*}", decimals, value))
}

fn format_scaled(scaled: f64, decimals: usize) -> String {
    if scaled >= COMPACT_WHOLE_THRESHOLD {
        format!("{:.0}", scaled)
    } else {
        trim_fraction(format!("{:.*}", decimals, scaled))
    }
}

fn reaches_thousand(formatted: &str) -> bool {
    formatted.parse::<f64>().is_ok_and(|rounded| rounded >= 1e3)
}

/// [`format_compact_number`] for textual input; empty or unparsable text renders as `"0"`.
pub fn format_compact_str(value: &str, decimals: usize) -> String {
    match value.trim().parse::<f64>() {
        Ok(parsed) => format_compact_number(parsed, decimals),
        Err(_) => "0".to_string(),
    }
}

/// Rounds to an integer and groups thousands with commas (`1,234,568`).
pub fn format_grouped_integer(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a number of seconds as `{d}d {h}h {m}m {s}s`.
///
/// Absent or negative input yields [`TIME_PLACEHOLDER`].
pub fn format_seconds_to_time(total_seconds: Option<i64>) -> String {
    let total = match total_seconds {
        Some(total) if total >= 0 => total,
        _ => return TIME_PLACEHOLDER.to_string(),
    };
    if total == 0 {
        return TIME_ZERO.to_string();
    }
    let days = total / SECONDS_PER_DAY;
    let hours = (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (total % SECONDS_PER_HOUR) / 60;
    let seconds = total % 60;
    format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
}

fn trim_fraction(formatted: String) -> String {
    if !formatted.contains('.') {
        return formatted;
    }
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
