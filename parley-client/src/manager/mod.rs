mod negotiation_manager;
mod peer_directory;

pub use negotiation_manager::*;
pub use peer_directory::*;
