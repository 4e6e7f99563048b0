mod header;
mod message;
mod record;

pub use header::{opcode, rcode, Header, HeaderFlags};
pub use message::Message;
pub use record::{Answer, Question, RData, CLASS_IN, STUB_TTL, TYPE_A};
