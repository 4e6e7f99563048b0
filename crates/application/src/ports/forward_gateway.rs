use async_trait::async_trait;
use stubdns_domain::{DomainError, Message};

/// Sends a single-question query to an upstream resolver and returns its reply.
///
/// One attempt per call: implementations do not retry, and a reply that does
/// not belong to `request` is an error rather than something to wait past.
#[async_trait]
pub trait ForwardGateway: Send + Sync {
    async fn forward(&self, request: &Message) -> Result<Message, DomainError>;

    /// Address of the upstream, for log lines.
    fn upstream(&self) -> String;
}
