//! stubdns domain layer: message model, errors and configuration.
pub mod config;
pub mod dns_message;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_message::{
    opcode, rcode, Answer, Header, HeaderFlags, Message, Question, RData, CLASS_IN, STUB_TTL,
    TYPE_A,
};
pub use errors::DomainError;
