use super::header::{opcode, Header, HeaderFlags};
use super::record::{Answer, Question};
use std::fmt;

/// A decoded DNS message: header, question section and answer section.
///
/// Authority and additional records are not modelled; `nscount`/`arcount`
/// travel in the header only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,
}

impl Message {
    /// Empty message with `header`; the section counts are reset so they track
    /// the records pushed afterwards.
    pub fn new(header: Header) -> Self {
        Self {
            header: Header {
                qdcount: 0,
                ancount: 0,
                ..header
            },
            questions: Vec::new(),
            answers: Vec::new(),
        }
    }

    /// Query carrying exactly one question.
    pub fn single_question(id: u16, flags: HeaderFlags, question: Question) -> Self {
        let mut message = Self::new(Header {
            id,
            flags,
            ..Default::default()
        });
        message.push_question(question);
        message
    }

    pub fn id(&self) -> u16 {
        self.header.id
    }

    pub fn flags(&self) -> &HeaderFlags {
        &self.header.flags
    }

    pub fn is_response(&self) -> bool {
        self.header.flags.qr
    }

    pub fn opcode(&self) -> u8 {
        self.header.flags.opcode
    }

    pub fn rcode(&self) -> u8 {
        self.header.flags.rcode
    }

    pub fn recursion_desired(&self) -> bool {
        self.header.flags.rd
    }

    pub fn is_standard_query(&self) -> bool {
        self.header.flags.opcode == opcode::QUERY
    }

    pub fn push_question(&mut self, question: Question) {
        self.questions.push(question);
        self.header.qdcount += 1;
    }

    pub fn push_answer(&mut self, answer: Answer) {
        self.answers.push(answer);
        self.header.ancount += 1;
    }

    pub fn first_answer(&self) -> Option<&Answer> {
        self.answers.first()
    }

    /// True when the header counts agree with the records actually held.
    pub fn counts_consistent(&self) -> bool {
        usize::from(self.header.qdcount) == self.questions.len()
            && usize::from(self.header.ancount) == self.answers.len()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} questions=[", self.header)?;
        for (i, question) in self.questions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", question)?;
        }
        write!(f, "] answers=[")?;
        for (i, answer) in self.answers.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", answer)?;
        }
        write!(f, "]")
    }
}
