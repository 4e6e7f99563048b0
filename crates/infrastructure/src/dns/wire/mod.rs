//! DNS wire format (RFC 1035 §4.1) for the header, question and answer
//! sections.
//!
//! Names are decompressed on decode and always written uncompressed. Every
//! read is bounds-checked against the packet, so malformed input surfaces as a
//! `DomainError` instead of a panic.

mod header;
mod message;
mod name;
mod record;

pub use header::{decode_header, encode_header, pack_flags, unpack_flags, HEADER_LEN};
pub use message::{decode_message, encode_message};
pub use name::{decode_name, encode_name, MAX_LABEL_LEN, MAX_NAME_LEN, MAX_POINTER_DEPTH};
pub use record::{decode_answer, decode_question, encode_answer, encode_question};

use stubdns_domain::DomainError;

/// `len` bytes of `packet` starting at `offset`.
fn take(packet: &[u8], offset: usize, len: usize) -> Result<&[u8], DomainError> {
    offset
        .checked_add(len)
        .and_then(|end| packet.get(offset..end))
        .ok_or(DomainError::TruncatedInput {
            offset,
            needed: len,
            available: packet.len(),
        })
}

fn read_u16(packet: &[u8], offset: usize) -> Result<u16, DomainError> {
    let bytes = take(packet, offset, 2)?;
    Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
}

fn read_u32(packet: &[u8], offset: usize) -> Result<u32, DomainError> {
    let bytes = take(packet, offset, 4)?;
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
