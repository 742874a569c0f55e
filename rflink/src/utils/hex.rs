//! Hex formatting helpers for log lines and diagnostics.

/// Byte slice to a compact lowercase hex string.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(&mut s, "{b:02x}");
    }
    s
}

/// Byte slice to hex with a space between bytes.
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        let _ = write!(&mut s, "{b:02x}");
    }
    s
}

/// Bounded hex preview of a buffer for log lines: the first `limit`
/// bytes, with an ellipsis when truncated.
pub fn hex_preview(bytes: &[u8], limit: usize) -> String {
    if bytes.len() <= limit {
        bytes_to_hex(bytes)
    } else {
        format!("{}..({} bytes)", bytes_to_hex(&bytes[..limit]), bytes.len())
    }
}

/// Parse a hex string, ignoring ASCII whitespace between digits.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<u8> = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| format!("invalid hex digit '{c}'"))
        })
        .collect::<Result<_, _>>()?;
    if digits.len() % 2 != 0 {
        return Err("hex string has odd length".to_string());
    }
    Ok(digits.chunks(2).map(|p| (p[0] << 4) | p[1]).collect())
}
