#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock upstream reacts to each query.
#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// One A record per question, owner name compressed to the question.
    Answer([u8; 4]),
    /// One CNAME per question whose target is a pointer to the question name.
    Cname,
    /// NOERROR with an empty answer section.
    NoAnswers,
    /// Reads the query and never replies.
    Silent,
    /// Replies with the query ID flipped.
    WrongId,
    /// Replies with a 5-byte datagram.
    Truncated,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = queries.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            let response = Self::build_mock_response(&buf[..len], behavior);
                            if let Some(response) = response {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn queries_received(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn build_mock_response(query: &[u8], behavior: MockBehavior) -> Option<Vec<u8>> {
        if query.len() < 12 {
            return None;
        }

        let mut response = Vec::with_capacity(512);

        match behavior {
            MockBehavior::Silent => return None,
            MockBehavior::Truncated => return Some(query[..5].to_vec()),
            MockBehavior::WrongId => {
                response.extend_from_slice(&[!query[0], !query[1]]);
            }
            MockBehavior::Answer(_) | MockBehavior::Cname | MockBehavior::NoAnswers => {
                response.extend_from_slice(&query[0..2]);
            }
        }

        // QR, RD copied from the query, RA
        response.push(0x80 | (query[2] & 0x01));
        response.push(0x80);

        // QDCOUNT echoed
        response.extend_from_slice(&query[4..6]);

        let answers = match behavior {
            MockBehavior::Answer(_) | MockBehavior::Cname => 1u8,
            _ => 0,
        };
        response.extend_from_slice(&[0x00, answers]);
        response.extend_from_slice(&[0x00, 0x00]);
        response.extend_from_slice(&[0x00, 0x00]);

        response.extend_from_slice(&query[12..]);

        if let MockBehavior::Answer(address) = behavior {
            response.extend_from_slice(&[
                0xc0, 0x0c, // pointer to the question name
                0x00, 0x01, // A
                0x00, 0x01, // IN
                0x00, 0x00, 0x00, 0x3c, // ttl 60
                0x00, 0x04,
            ]);
            response.extend_from_slice(&address);
        }

        if let MockBehavior::Cname = behavior {
            response.extend_from_slice(&[
                0xc0, 0x0c, // owner: the question name
                0x00, 0x05, // CNAME
                0x00, 0x01, // IN
                0x00, 0x00, 0x00, 0x3c, // ttl 60
                0x00, 0x02, // rdlength
                0xc0, 0x0c, // target: the question name again
            ]);
        }

        Some(response)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
