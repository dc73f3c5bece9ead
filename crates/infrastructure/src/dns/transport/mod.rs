pub mod udp;

pub use udp::UdpQueryTransport;
