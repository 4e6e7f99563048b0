use crate::dns::wire::{decode_message, encode_message};
use std::net::SocketAddr;
use std::sync::Arc;
use stubdns_application::use_cases::BuildResponseUseCase;
use stubdns_domain::DomainError;
use tracing::{debug, warn};

/// Classic DNS-over-UDP payload limit without EDNS.
pub const MAX_UDP_PAYLOAD: usize = 512;

/// Turns one request datagram into the bytes of its response.
pub struct DnsServerHandler {
    use_case: Arc<BuildResponseUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<BuildResponseUseCase>) -> Self {
        Self { use_case }
    }

    /// Decode errors are returned and nothing is answered; forwarding
    /// failures are logged and the response is still built.
    pub async fn handle_datagram(
        &self,
        datagram: &[u8],
        client: SocketAddr,
    ) -> Result<Vec<u8>, DomainError> {
        let request = decode_message(datagram)?;
        debug!(client = %client, request = %request, "DNS query received");

        let outcome = self.use_case.execute(&request).await;
        if !outcome.forward_failures.is_empty() {
            warn!(
                client = %client,
                id = request.id(),
                failed = outcome.forward_failures.len(),
                questions = request.questions.len(),
                "Responding without answers for questions that failed upstream"
            );
        }

        let response = encode_message(&outcome.response)?;
        if response.len() > MAX_UDP_PAYLOAD {
            warn!(
                client = %client,
                id = request.id(),
                bytes = response.len(),
                "Response exceeds the 512-byte UDP payload limit"
            );
        }

        debug!(client = %client, response = %outcome.response, "Sending response");
        Ok(response)
    }
}
