use std::fmt;
use std::net::Ipv4Addr;

pub const TYPE_A: u16 = 1;
pub const CLASS_IN: u16 = 1;

/// TTL, in seconds, of locally synthesized answers.
pub const STUB_TTL: u32 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn new(name: impl Into<String>, qtype: u16, qclass: u16) -> Self {
        Self {
            name: name.into(),
            qtype,
            qclass,
        }
    }

    /// An A/IN question for `name`.
    pub fn a(name: impl Into<String>) -> Self {
        Self::new(name, TYPE_A, CLASS_IN)
    }

    /// Same name, type and class forced to A/IN.
    pub fn normalized(&self) -> Self {
        Self::a(self.name.clone())
    }
}

/// Payload of an answer record.
///
/// A/IN answers carry an IPv4 address. Anything else is wire-format bytes
/// that stand on their own: names embedded in NS, CNAME, PTR and MX data are
/// held uncompressed, so the bytes can be written into any message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A(Ipv4Addr),
    Raw(Vec<u8>),
}

impl RData {
    pub fn len(&self) -> usize {
        match self {
            RData::A(_) => 4,
            RData::Raw(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub name: String,
    pub rtype: u16,
    pub class: u16,
    pub ttl: u32,
    pub rdata: RData,
}

impl Answer {
    pub fn a(name: impl Into<String>, ttl: u32, address: Ipv4Addr) -> Self {
        Self {
            name: name.into(),
            rtype: TYPE_A,
            class: CLASS_IN,
            ttl,
            rdata: RData::A(address),
        }
    }

    /// Synthesized answer pointing `name` at 0.0.0.0.
    pub fn stub(name: impl Into<String>) -> Self {
        Self::a(name, STUB_TTL, Ipv4Addr::UNSPECIFIED)
    }

    pub fn rdlength(&self) -> u16 {
        self.rdata.len() as u16
    }

    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        match self.rdata {
            RData::A(address) => Some(address),
            RData::Raw(_) => None,
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} type={} class={}", self.name, self.qtype, self.qclass)
    }
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RData::A(address) => write!(f, "{}", address),
            RData::Raw(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} type={} class={} ttl={} rdlength={} rdata={}",
            self.name,
            self.rtype,
            self.class,
            self.ttl,
            self.rdlength(),
            self.rdata
        )
    }
}
