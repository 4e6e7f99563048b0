use super::take;
use bytes::BufMut;
use stubdns_domain::DomainError;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

/// Compression pointers followed before a name is rejected as a loop.
pub const MAX_POINTER_DEPTH: usize = 20;

/// Length bytes at or above this value start a compression pointer.
const POINTER_TAG: u8 = 0xC0;
const POINTER_OFFSET_MASK: u8 = 0x3F;

/// Decodes the name starting at `offset` in `packet`.
///
/// Returns the dotted name and the offset just past its encoding. When the
/// name ends in a compression pointer that is the byte after the two pointer
/// bytes, regardless of where the pointed-to labels live.
pub fn decode_name(packet: &[u8], offset: usize) -> Result<(String, usize), DomainError> {
    let mut name = String::new();
    let next = read_labels(packet, offset, 0, &mut name)?;
    Ok((name, next))
}

fn read_labels(
    packet: &[u8],
    mut pos: usize,
    depth: usize,
    name: &mut String,
) -> Result<usize, DomainError> {
    loop {
        let len = take(packet, pos, 1)?[0];

        if len == 0 {
            return Ok(pos + 1);
        }

        if len >= POINTER_TAG {
            let low = take(packet, pos + 1, 1)?[0];
            if depth >= MAX_POINTER_DEPTH {
                return Err(DomainError::PointerLoop {
                    offset: pos,
                    max_depth: MAX_POINTER_DEPTH,
                });
            }
            let target = usize::from(len & POINTER_OFFSET_MASK) << 8 | usize::from(low);
            read_labels(packet, target, depth + 1, name)?;
            return Ok(pos + 2);
        }

        let start = pos + 1;
        let label = packet
            .get(start..start + usize::from(len))
            .ok_or_else(|| DomainError::MalformedName {
                offset: pos,
                reason: format!(
                    "label of {} bytes runs past the end of a {}-byte packet",
                    len,
                    packet.len()
                ),
            })?;
        let label = std::str::from_utf8(label).map_err(|_| DomainError::MalformedName {
            offset: pos,
            reason: "label is not valid UTF-8".to_string(),
        })?;
        if label.contains('.') {
            return Err(DomainError::MalformedName {
                offset: pos,
                reason: format!("label '{}' contains a dot", label),
            });
        }

        if !name.is_empty() {
            name.push('.');
        }
        name.push_str(label);
        pos = start + usize::from(len);
    }
}

/// Encodes `name` as uncompressed length-prefixed labels plus the root byte.
///
/// A single trailing dot is accepted; `""` and `"."` encode the root name.
pub fn encode_name(name: &str) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(name.len() + 2);
    put_name(&mut buf, name)?;
    Ok(buf)
}

pub(super) fn put_name<B: BufMut>(buf: &mut B, name: &str) -> Result<(), DomainError> {
    let labels = split_labels(name)?;
    for label in labels {
        buf.put_u8(label.len() as u8);
        buf.put_slice(label.as_bytes());
    }
    buf.put_u8(0);
    Ok(())
}

fn split_labels(name: &str) -> Result<Vec<&str>, DomainError> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let mut labels = Vec::new();
    let mut encoded_len = 1;
    let mut position = 0;
    for label in trimmed.split('.') {
        if label.is_empty() {
            return Err(DomainError::MalformedName {
                offset: position,
                reason: format!("empty label in '{}'", name),
            });
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::NameTooLong(format!(
                "label '{}' is {} bytes, limit is {}",
                label,
                label.len(),
                MAX_LABEL_LEN
            )));
        }
        encoded_len += label.len() + 1;
        position += label.len() + 1;
        labels.push(label);
    }

    if encoded_len > MAX_NAME_LEN {
        return Err(DomainError::NameTooLong(format!(
            "'{}' encodes to {} bytes, limit is {}",
            name, encoded_len, MAX_NAME_LEN
        )));
    }
    Ok(labels)
}
