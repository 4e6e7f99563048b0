use super::{read_u16, take};
use stubdns_domain::{DomainError, Header, HeaderFlags};

pub const HEADER_LEN: usize = 12;

// Layout of the flags word, most significant bit first:
// QR | OPCODE(4) | AA | TC | RD | RA | Z(3) | RCODE(4)
const QR_BIT: u16 = 1 << 15;
const OPCODE_SHIFT: u16 = 11;
const OPCODE_MASK: u16 = 0x0F;
const AA_BIT: u16 = 1 << 10;
const TC_BIT: u16 = 1 << 9;
const RD_BIT: u16 = 1 << 8;
const RA_BIT: u16 = 1 << 7;
const Z_SHIFT: u16 = 4;
const Z_MASK: u16 = 0x07;
const RCODE_MASK: u16 = 0x0F;

pub fn pack_flags(flags: &HeaderFlags) -> u16 {
    let mut word = 0u16;
    if flags.qr {
        word |= QR_BIT;
    }
    word |= (u16::from(flags.opcode) & OPCODE_MASK) << OPCODE_SHIFT;
    if flags.aa {
        word |= AA_BIT;
    }
    if flags.tc {
        word |= TC_BIT;
    }
    if flags.rd {
        word |= RD_BIT;
    }
    if flags.ra {
        word |= RA_BIT;
    }
    word |= (u16::from(flags.z) & Z_MASK) << Z_SHIFT;
    word |= u16::from(flags.rcode) & RCODE_MASK;
    word
}

pub fn unpack_flags(word: u16) -> HeaderFlags {
    HeaderFlags {
        qr: word & QR_BIT != 0,
        opcode: ((word >> OPCODE_SHIFT) & OPCODE_MASK) as u8,
        aa: word & AA_BIT != 0,
        tc: word & TC_BIT != 0,
        rd: word & RD_BIT != 0,
        ra: word & RA_BIT != 0,
        z: ((word >> Z_SHIFT) & Z_MASK) as u8,
        rcode: (word & RCODE_MASK) as u8,
    }
}

/// Decodes the fixed 12-byte header at the start of `packet`.
pub fn decode_header(packet: &[u8]) -> Result<Header, DomainError> {
    take(packet, 0, HEADER_LEN)?;
    Ok(Header {
        id: read_u16(packet, 0)?,
        flags: unpack_flags(read_u16(packet, 2)?),
        qdcount: read_u16(packet, 4)?,
        ancount: read_u16(packet, 6)?,
        nscount: read_u16(packet, 8)?,
        arcount: read_u16(packet, 10)?,
    })
}

/// Encodes `header` with its counts exactly as given.
pub fn encode_header(header: &Header) -> [u8; HEADER_LEN] {
    let mut buf = [0u8; HEADER_LEN];
    buf[0..2].copy_from_slice(&header.id.to_be_bytes());
    buf[2..4].copy_from_slice(&pack_flags(&header.flags).to_be_bytes());
    buf[4..6].copy_from_slice(&header.qdcount.to_be_bytes());
    buf[6..8].copy_from_slice(&header.ancount.to_be_bytes());
    buf[8..10].copy_from_slice(&header.nscount.to_be_bytes());
    buf[10..12].copy_from_slice(&header.arcount.to_be_bytes());
    buf
}
