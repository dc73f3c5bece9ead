pub mod codec;
pub mod transport;

pub use codec::{MessageBuilder, ParsedResponse, RecordTypeMapper, ResponseParser};
pub use transport::UdpQueryTransport;
