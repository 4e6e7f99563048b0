use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Truncated input: {needed} bytes needed at offset {offset}, buffer holds {available}")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Malformed name at offset {offset}: {reason}")]
    MalformedName { offset: usize, reason: String },

    #[error("Compression pointer chain at offset {offset} exceeds {max_depth} hops")]
    PointerLoop { offset: usize, max_depth: usize },

    #[error("Invalid RDATA for type {record_type}: expected {expected} bytes, got {actual}")]
    InvalidRdata {
        record_type: u16,
        expected: usize,
        actual: usize,
    },

    #[error("Name too long: {0}")]
    NameTooLong(String),

    #[error("Message too large: {count} {section} records exceed the 16-bit count")]
    MessageTooLarge { section: &'static str, count: usize },

    #[error("Upstream {server} unreachable: {reason}")]
    UpstreamUnreachable { server: String, reason: String },

    #[error("Timeout waiting for reply from upstream {server}")]
    UpstreamTimeout { server: String },

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),
}

impl DomainError {
    /// True for failures of the upstream round trip rather than of the local codec.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            DomainError::UpstreamUnreachable { .. }
                | DomainError::UpstreamTimeout { .. }
                | DomainError::InvalidDnsResponse(_)
        )
    }
}
