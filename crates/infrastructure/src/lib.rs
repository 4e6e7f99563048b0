//! stubdns infrastructure: DNS wire codec, upstream UDP forwarding and the
//! datagram handler used by the listener.
pub mod dns;
