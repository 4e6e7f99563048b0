//! UDP forwarding to a single upstream resolver (RFC 1035 §4.2.1).
//!
//! One query, one reply read, no retries. The reply must come back with the
//! query's ID; anything else is reported instead of being waited past.

use crate::dns::wire::{decode_message, encode_message};
use async_trait::async_trait;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use stubdns_application::ports::ForwardGateway;
use stubdns_domain::{DomainError, Message};
use tokio::net::UdpSocket;
use tracing::debug;

/// Largest reply read from upstream. Bigger than the 512 bytes clients may
/// send so resolvers that ignore the classic limit are still read whole.
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpForwardGateway {
    server_addr: SocketAddr,
    timeout: Duration,
}

impl UdpForwardGateway {
    pub fn new(server_addr: SocketAddr, timeout: Duration) -> Self {
        Self {
            server_addr,
            timeout,
        }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    fn unreachable(&self, action: &str, error: std::io::Error) -> DomainError {
        DomainError::UpstreamUnreachable {
            server: self.server_addr.to_string(),
            reason: format!("{} failed: {}", action, error),
        }
    }

    fn timed_out(&self) -> DomainError {
        DomainError::UpstreamTimeout {
            server: self.server_addr.to_string(),
        }
    }

    async fn exchange(&self, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.unreachable("bind", e))?;
        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| self.unreachable("connect", e))?;

        let bytes_sent = tokio::time::timeout(self.timeout, socket.send(query))
            .await
            .map_err(|_| self.timed_out())?
            .map_err(|e| self.unreachable("send", e))?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let bytes_received = tokio::time::timeout(self.timeout, socket.recv(&mut recv_buf))
            .await
            .map_err(|_| self.timed_out())?
            .map_err(|e| self.unreachable("receive", e))?;
        recv_buf.truncate(bytes_received);

        debug!(server = %self.server_addr, bytes_received, "UDP response received");

        Ok(recv_buf)
    }
}

#[async_trait]
impl ForwardGateway for UdpForwardGateway {
    async fn forward(&self, request: &Message) -> Result<Message, DomainError> {
        let query = encode_message(request)?;
        let reply = self.exchange(&query).await?;
        validate_response_id(&query, &reply, self.server_addr)?;
        decode_message(&reply)
    }

    fn upstream(&self) -> String {
        self.server_addr.to_string()
    }
}

/// Rejects a reply whose ID differs from the query's.
pub(crate) fn validate_response_id(
    query: &[u8],
    response: &[u8],
    server: SocketAddr,
) -> Result<(), DomainError> {
    if query.len() < 2 || response.len() < 2 {
        return Err(DomainError::InvalidDnsResponse(format!(
            "message from {} too short to carry an ID",
            server
        )));
    }

    let query_id = u16::from_be_bytes([query[0], query[1]]);
    let response_id = u16::from_be_bytes([response[0], response[1]]);
    if query_id != response_id {
        return Err(DomainError::InvalidDnsResponse(format!(
            "ID mismatch from {}: sent {:#06x}, received {:#06x}",
            server, query_id, response_id
        )));
    }
    Ok(())
}
