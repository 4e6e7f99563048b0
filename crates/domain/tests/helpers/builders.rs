#![allow(dead_code)]
use stubdns_domain::{Answer, Header, HeaderFlags, Message, Question};

pub struct MessageBuilder {
    id: u16,
    flags: HeaderFlags,
    questions: Vec<Question>,
    answers: Vec<Answer>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self {
            id: 0x4242,
            flags: HeaderFlags {
                rd: true,
                ..Default::default()
            },
            questions: Vec::new(),
            answers: Vec::new(),
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
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

    pub fn answer(mut self, answer: Answer) -> Self {
        self.answers.push(answer);
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
        for answer in self.answers {
            message.push_answer(answer);
        }
        message
    }
}

impl Default for MessageBuilder {
    fn default() -> Self {
        Self::new()
    }
}
