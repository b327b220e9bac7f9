//! Human-readable size parsing and formatting (e.g., "256MB", "1GB").

use std::fmt;
use thiserror::Error;

/// Error parsing a size string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid size '{input}' - expected format like '1GB', '256MB', or '1024KB'")]
pub struct SizeParseError {
    input: String,
}

impl SizeParseError {
    fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports:
/// - Bare numbers (treated as bytes)
/// - KB/K suffix (1024 bytes)
/// - MB/M suffix (1024² bytes)
/// - GB/G suffix (1024³ bytes)
/// - Case-insensitive
/// - Whitespace tolerant
///
/// # Examples
///
/// ```
/// use texstore::store::parse_size;
///
/// assert_eq!(parse_size("1024").unwrap(), 1024);
/// assert_eq!(parse_size("1KB").unwrap(), 1024);
/// assert_eq!(parse_size("256MB").unwrap(), 256 * 1024 * 1024);
/// assert_eq!(parse_size("1gb").unwrap(), 1024 * 1024 * 1024);
/// ```
pub fn parse_size(s: &str) -> Result<usize, SizeParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(SizeParseError::new(s));
    }

    let s_upper = s.to_uppercase();
    let s_upper = s_upper.trim();

    let (num_str, multiplier) = if s_upper.ends_with("GB") || s_upper.ends_with('G') {
        let suffix_len = if s_upper.ends_with("GB") { 2 } else { 1 };
        let num_part = s[..s.len() - suffix_len].trim();
        (num_part, 1024_usize * 1024 * 1024)
    } else if s_upper.ends_with("MB") || s_upper.ends_with('M') {
        let suffix_len = if s_upper.ends_with("MB") { 2 } else { 1 };
        let num_part = s[..s.len() - suffix_len].trim();
        (num_part, 1024_usize * 1024)
    } else if s_upper.ends_with("KB") || s_upper.ends_with('K') {
        let suffix_len = if s_upper.ends_with("KB") { 2 } else { 1 };
        let num_part = s[..s.len() - suffix_len].trim();
        (num_part, 1024_usize)
    } else {
        (s, 1_usize)
    };

    let num: usize = num_str.parse().map_err(|_| SizeParseError::new(s))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| SizeParseError::new(s))
}

/// Format a byte count as a human-readable string.
///
/// Only exact multiples collapse to a suffix; anything else stays a
/// plain byte count so the output parses back to the same value.
///
/// # Examples
///
/// ```
/// use texstore::store::format_size;
///
/// assert_eq!(format_size(1024), "1KB");
/// assert_eq!(format_size(256 * 1024 * 1024), "256MB");
/// assert_eq!(format_size(1024 * 1024 * 1024), "1GB");
/// ```
pub fn format_size(bytes: usize) -> String {
    const GB: usize = 1024 * 1024 * 1024;
    const MB: usize = 1024 * 1024;
    const KB: usize = 1024;

    if bytes >= GB && bytes.is_multiple_of(GB) {
        format!("{}GB", bytes / GB)
    } else if bytes >= MB && bytes.is_multiple_of(MB) {
        format!("{}MB", bytes / MB)
    } else if bytes >= KB && bytes.is_multiple_of(KB) {
        format!("{}KB", bytes / KB)
    } else {
        format!("{}", bytes)
    }
}

/// Format an arbitrary byte count with a decimal suffix for logs.
///
/// Unlike [`format_size`] this always prettifies, trading exactness for
/// readability in trace output.
pub fn format_bytes(bytes: usize) -> String {
    if bytes >= 1_000_000_000 {
        format!("{:.2} GB", bytes as f64 / 1_000_000_000.0)
    } else if bytes >= 1_000_000 {
        format!("{:.1} MB", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.1} KB", bytes as f64 / 1_000.0)
    } else {
        format!("{} B", bytes)
    }
}

/// A size value that can be parsed from and formatted to human-readable strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size(pub usize);

impl Size {
    pub fn bytes(self) -> usize {
        self.0
    }

    pub fn from_gb(gb: usize) -> Self {
        Self(gb * 1024 * 1024 * 1024)
    }

    pub fn from_mb(mb: usize) -> Self {
        Self(mb * 1024 * 1024)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_size(self.0))
    }
}

impl std::str::FromStr for Size {
    type Err = SizeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_size(s).map(Size)
    }
}
