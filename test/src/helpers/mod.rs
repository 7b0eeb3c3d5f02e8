pub mod assertions;
pub mod packet_exchange;
pub mod test_protocol;

pub use packet_exchange::{exchange_packets, TestClients};
pub use test_protocol::{TestProtocol, PLAYER, POSITION};
