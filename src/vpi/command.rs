//! VPI command parsing

/// Parse a VPI command string; blank lines and `#` comments are skipped
pub fn parse_command(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() || input.starts_with('#') {
        return None;
    }
    Some(input.to_string())
}
