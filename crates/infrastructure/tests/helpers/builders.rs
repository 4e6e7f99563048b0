#![allow(dead_code)]
use stubdns_domain::{Header, HeaderFlags, Message, Question};
use stubdns_infrastructure::dns::wire::encode_message;

/// Builds request messages, and their wire bytes, as a client would send them.
pub struct QueryBuilder {
    id: u16,
    flags: HeaderFlags,
    questions: Vec<Question>,
}

impl QueryBuilder {
    pub fn new(id: u16) -> Self {
        Self {
            id,
            flags: HeaderFlags {
                rd: true,
                ..Default::default()
            },
            questions: Vec::new(),
        }
    }

    pub fn opcode(mut self, opcode: u8) -> Self {
        self.flags.opcode = opcode;
        self
    }

    pub fn recursion_desired(mut self, rd: bool) -> Self {
        self.flags.rd = rd;
        self
    }

    pub fn question(mut self, name: &str) -> Self {
        self.questions.push(Question::a(name));
        self
    }

    pub fn build(self) -> Message {
        let mut message = Message::new(Header {
            id: self.id,
            flags: self.flags,
            ..Default::default()
        });
        for question in self.questions {
            message.push_question(question);
        }
        message
    }

    pub fn bytes(self) -> Vec<u8> {
        encode_message(&self.build()).unwrap()
    }
}
