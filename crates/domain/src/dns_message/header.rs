use std::fmt;

pub mod opcode {
    /// Standard query, the only kind this server answers.
    pub const QUERY: u8 = 0;
}

pub mod rcode {
    pub const NO_ERROR: u8 = 0;
    pub const NAME_ERROR: u8 = 3;
    pub const NOT_IMPLEMENTED: u8 = 4;
}

/// Second 16-bit word of the header, one field per flag.
///
/// `opcode` and `rcode` hold 4-bit values and `z` a 3-bit value; the wire codec
/// masks anything wider when packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderFlags {
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: u8,
    pub rcode: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub flags: HeaderFlags,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    /// Header of a reply to `request`: same ID, QR set, OPCODE and RD echoed,
    /// every count zeroed.
    pub fn response_to(request: &Header, rcode: u8) -> Self {
        Self {
            id: request.id,
            flags: HeaderFlags {
                qr: true,
                opcode: request.flags.opcode,
                aa: false,
                tc: false,
                rd: request.flags.rd,
                ra: false,
                z: 0,
                rcode,
            },
            qdcount: 0,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        }
    }
}

impl fmt::Display for HeaderFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "qr={} opcode={} aa={} tc={} rd={} ra={} z={} rcode={}",
            self.qr as u8,
            self.opcode,
            self.aa as u8,
            self.tc as u8,
            self.rd as u8,
            self.ra as u8,
            self.z,
            self.rcode
        )
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={} [{}] qd={} an={} ns={} ar={}",
            self.id, self.flags, self.qdcount, self.ancount, self.nscount, self.arcount
        )
    }
}
