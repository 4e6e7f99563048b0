use super::header::{decode_header, encode_header, HEADER_LEN};
use super::record::{decode_answer, decode_question, put_answer, put_question};
use bytes::BufMut;
use stubdns_domain::{DomainError, Header, Message};
use tracing::warn;

/// Decodes the header, then exactly `qdcount` questions and `ancount`
/// answers. Authority and additional records are left unread.
pub fn decode_message(packet: &[u8]) -> Result<Message, DomainError> {
    let header = decode_header(packet)?;
    let mut pos = HEADER_LEN;

    let mut questions = Vec::new();
    for _ in 0..header.qdcount {
        let (question, next) = decode_question(packet, pos)?;
        questions.push(question);
        pos = next;
    }

    let mut answers = Vec::new();
    for _ in 0..header.ancount {
        let (answer, next) = decode_answer(packet, pos)?;
        answers.push(answer);
        pos = next;
    }

    Ok(Message {
        header,
        questions,
        answers,
    })
}

/// Encodes header, questions and answers in order.
///
/// QDCOUNT and ANCOUNT on the wire always match the records written, even
/// when the header fields disagree.
pub fn encode_message(message: &Message) -> Result<Vec<u8>, DomainError> {
    let header = Header {
        qdcount: section_count("question", message.questions.len())?,
        ancount: section_count("answer", message.answers.len())?,
        ..message.header
    };
    if !message.counts_consistent() {
        warn!(
            id = message.header.id,
            qdcount = message.header.qdcount,
            ancount = message.header.ancount,
            questions = message.questions.len(),
            answers = message.answers.len(),
            "Header counts disagree with records, encoding actual counts"
        );
    }

    let mut buf = Vec::with_capacity(512);
    buf.put_slice(&encode_header(&header));
    for question in &message.questions {
        put_question(&mut buf, question)?;
    }
    for answer in &message.answers {
        put_answer(&mut buf, answer)?;
    }
    Ok(buf)
}

fn section_count(section: &'static str, len: usize) -> Result<u16, DomainError> {
    u16::try_from(len).map_err(|_| DomainError::MessageTooLarge {
        section,
        count: len,
    })
}
