//! Plain-output parsing

/// Split newline-delimited output into non-empty lines, order preserved
///
/// Trailing `\r` is stripped. Leading and internal whitespace is kept since
/// candidates are compared byte-for-byte against the buffer.
pub fn parse_plain_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
