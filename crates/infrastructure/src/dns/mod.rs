pub mod forwarding;
pub mod server;
pub mod wire;

pub use forwarding::UdpForwardGateway;
pub use server::DnsServerHandler;
