use std::net::SocketAddr;
use std::sync::Arc;
use stubdns_infrastructure::dns::server::{DnsServerHandler, MAX_UDP_PAYLOAD};
use tokio::net::UdpSocket;
use tracing::{error, info, warn};

/// Serves one datagram at a time until Ctrl-C.
///
/// A datagram that fails to decode or encode is logged and dropped; the
/// client gets no reply and the loop moves on.
pub async fn start_dns_server(
    bind_addr: SocketAddr,
    handler: DnsServerHandler,
) -> anyhow::Result<()> {
    let socket = UdpSocket::bind(bind_addr).await?;
    info!(bind_address = %socket.local_addr()?, "DNS server listening");

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    tokio::select! {
        result = serve(&socket, Arc::new(handler)) => result,
        _ = &mut shutdown => {
            info!("Shutdown signal received");
            Ok(())
        }
    }
}

async fn serve(socket: &UdpSocket, handler: Arc<DnsServerHandler>) -> anyhow::Result<()> {
    let mut recv_buf = [0u8; MAX_UDP_PAYLOAD];

    loop {
        let (len, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) => {
                // ICMP errors from earlier sends surface here on some platforms.
                warn!(error = %e, "UDP recv error");
                continue;
            }
        };

        let response = match handler.handle_datagram(&recv_buf[..len], from).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    client = %from,
                    bytes = len,
                    error = %e,
                    "Dropping undecodable datagram"
                );
                continue;
            }
        };

        if let Err(e) = socket.send_to(&response, from).await {
            error!(client = %from, error = %e, "Failed to send DNS response");
        }
    }
}
