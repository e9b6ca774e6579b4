mod peer_transport;
mod rtc_transport;
mod track_registry;
mod transport_event;

pub use peer_transport::*;
pub use rtc_transport::*;
pub use track_registry::*;
pub use transport_event::*;
