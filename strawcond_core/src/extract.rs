//! Recovery of the configuration object from a decompressed archive payload.
//!
//! The payload starts with a fixed-size header followed by one brace-delimited
//! object and arbitrary trailing bytes. The object is located by counting
//! braces only; the scan has no notion of JSON strings, so a payload carrying
//! `{` or `}` inside a quoted key or value will be cut at the wrong place.

use serde_json::Value;
use tracing::debug;

use crate::error::{ConditionError, Result};

/// Bytes preceding the configuration object in a decompressed payload.
pub const HEADER_LEN: usize = 16;

const OPEN: u8 = b'{';
const CLOSE: u8 = b'}';

/// Returns the balanced `{ ... }` span that begins exactly at `start`.
///
/// Bytes after the closing brace are ignored.
pub fn extract_object(buffer: &[u8], start: usize) -> Result<&[u8]> {
    let Some(region) = buffer.get(start..).filter(|r| !r.is_empty()) else {
        return Err(ConditionError::MalformedStream(format!(
            "stream ends before offset {start} ({} bytes)",
            buffer.len()
        )));
    };
    if region[0] != OPEN {
        return Err(ConditionError::MalformedStream(format!(
            "expected '{{' at offset {start}, found 0x{:02x}",
            region[0]
        )));
    }

    let mut depth = 0usize;
    for (offset, &byte) in region.iter().enumerate() {
        match byte {
            OPEN => depth += 1,
            CLOSE => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&region[..=offset]);
                }
            }
            _ => {}
        }
    }

    Err(ConditionError::MalformedStream(format!(
        "unbalanced object starting at offset {start}: {depth} brace(s) left open"
    )))
}

/// Extracts the object after the payload header and parses it.
pub fn parse_config_tree(payload: &[u8]) -> Result<Value> {
    let object = extract_object(payload, HEADER_LEN)?;
    debug!(
        "Extracted {} byte configuration object from {} byte payload",
        object.len(),
        payload.len()
    );
    Ok(serde_json::from_slice(object)?)
}
