//! Hex parsing for command-line addresses, sizes and payloads.

use physmap::{PhysMapError, PhysMapResult};

fn strip_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Parse a hexadecimal number; the `0x` prefix is optional.
pub fn parse_hex_u64(s: &str) -> PhysMapResult<u64> {
    let digits = strip_prefix(s.trim());
    if digits.is_empty() {
        return Err(PhysMapError::argument(format!("'{}' is not a hex number", s)));
    }
    u64::from_str_radix(digits, 16)
        .map_err(|e| PhysMapError::argument(format!("'{}' is not a hex number: {}", s, e)))
}

/// Parse a hexadecimal byte count.
pub fn parse_hex_size(s: &str) -> PhysMapResult<usize> {
    let value = parse_hex_u64(s)?;
    usize::try_from(value)
        .map_err(|_| PhysMapError::argument(format!("size {:#x} does not fit in memory", value)))
}

/// Bytes to write, either given inline as hex or read from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Bytes(Vec<u8>),
    Stdin,
}

/// Parse a write payload: `-` for stdin, otherwise an even-length hex string.
pub fn parse_payload(s: &str) -> PhysMapResult<Payload> {
    if s == "-" {
        return Ok(Payload::Stdin);
    }
    let clean: String = strip_prefix(s.trim())
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if clean.is_empty() {
        return Err(PhysMapError::argument("empty hex payload"));
    }
    hex::decode(&clean)
        .map(Payload::Bytes)
        .map_err(|e| PhysMapError::argument(format!("invalid hex payload: {}", e)))
}
