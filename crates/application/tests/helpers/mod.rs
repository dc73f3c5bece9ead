#![allow(unused_imports)]

mod mock_transport;

pub use mock_transport::{a, cname, name, ns, soa, MockQueryTransport, SectionsBuilder};
