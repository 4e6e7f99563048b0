mod forward_gateway;

pub use forward_gateway::ForwardGateway;

// Re-export for convenience
pub use stubdns_domain::Message;
