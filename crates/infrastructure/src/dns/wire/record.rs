use super::name::{decode_name, put_name};
use super::{read_u16, read_u32, take};
use bytes::BufMut;
use std::net::Ipv4Addr;
use stubdns_domain::{Answer, DomainError, Question, RData, CLASS_IN, TYPE_A};

const IPV4_RDLENGTH: usize = 4;

const TYPE_NS: u16 = 2;
const TYPE_CNAME: u16 = 5;
const TYPE_PTR: u16 = 12;
const TYPE_MX: u16 = 15;

/// MX preference preceding the exchange name.
const MX_PREFERENCE_LEN: usize = 2;

pub fn decode_question(packet: &[u8], offset: usize) -> Result<(Question, usize), DomainError> {
    let (name, pos) = decode_name(packet, offset)?;
    let qtype = read_u16(packet, pos)?;
    let qclass = read_u16(packet, pos + 2)?;
    Ok((Question { name, qtype, qclass }, pos + 4))
}

/// Decodes one resource record.
///
/// A/IN records must carry exactly four bytes of RDATA. The domain name in
/// NS, CNAME, PTR and MX RDATA comes back uncompressed, with any pointers
/// resolved against `packet`. Other record types keep their RDATA verbatim.
pub fn decode_answer(packet: &[u8], offset: usize) -> Result<(Answer, usize), DomainError> {
    let (name, pos) = decode_name(packet, offset)?;
    let rtype = read_u16(packet, pos)?;
    let class = read_u16(packet, pos + 2)?;
    let ttl = read_u32(packet, pos + 4)?;
    let rdlength = usize::from(read_u16(packet, pos + 8)?);
    let rdata_start = pos + 10;
    let raw = take(packet, rdata_start, rdlength)?;

    let rdata = if rtype == TYPE_A && class == CLASS_IN {
        let octets: [u8; IPV4_RDLENGTH] =
            raw.try_into().map_err(|_| DomainError::InvalidRdata {
                record_type: rtype,
                expected: IPV4_RDLENGTH,
                actual: rdlength,
            })?;
        RData::A(Ipv4Addr::from(octets))
    } else {
        RData::Raw(expand_rdata(packet, rtype, rdata_start, raw)?)
    };

    Ok((
        Answer {
            name,
            rtype,
            class,
            ttl,
            rdata,
        },
        rdata_start + rdlength,
    ))
}

/// `raw` is the RDATA slice of `packet` starting at `start`.
fn expand_rdata(
    packet: &[u8],
    rtype: u16,
    start: usize,
    raw: &[u8],
) -> Result<Vec<u8>, DomainError> {
    let name_at = match rtype {
        TYPE_NS | TYPE_CNAME | TYPE_PTR => 0,
        TYPE_MX => MX_PREFERENCE_LEN,
        _ => return Ok(raw.to_vec()),
    };
    if raw.len() <= name_at {
        return Err(DomainError::InvalidRdata {
            record_type: rtype,
            expected: name_at + 1,
            actual: raw.len(),
        });
    }

    let (name, next) = decode_name(packet, start + name_at)?;
    if next != start + raw.len() {
        return Err(DomainError::InvalidRdata {
            record_type: rtype,
            expected: next - start,
            actual: raw.len(),
        });
    }

    let mut expanded = Vec::with_capacity(name_at + name.len() + 2);
    expanded.put_slice(&raw[..name_at]);
    put_name(&mut expanded, &name)?;
    Ok(expanded)
}

pub fn encode_question(question: &Question) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(question.name.len() + 6);
    put_question(&mut buf, question)?;
    Ok(buf)
}

pub fn encode_answer(answer: &Answer) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(answer.name.len() + 12 + answer.rdata.len());
    put_answer(&mut buf, answer)?;
    Ok(buf)
}

pub(super) fn put_question<B: BufMut>(buf: &mut B, question: &Question) -> Result<(), DomainError> {
    put_name(buf, &question.name)?;
    buf.put_u16(question.qtype);
    buf.put_u16(question.qclass);
    Ok(())
}

pub(super) fn put_answer<B: BufMut>(buf: &mut B, answer: &Answer) -> Result<(), DomainError> {
    put_name(buf, &answer.name)?;
    buf.put_u16(answer.rtype);
    buf.put_u16(answer.class);
    buf.put_u32(answer.ttl);
    buf.put_u16(answer.rdlength());
    match &answer.rdata {
        RData::A(address) => buf.put_slice(&address.octets()),
        RData::Raw(bytes) => buf.put_slice(bytes),
    }
    Ok(())
}
