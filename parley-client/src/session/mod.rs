mod negotiation_state;
mod peer_session;
mod remote_stream;
mod session_input;
mod session_worker;

pub use negotiation_state::*;
pub(crate) use peer_session::*;
pub use remote_stream::*;
pub(crate) use session_input::*;
pub(crate) use session_worker::*;
