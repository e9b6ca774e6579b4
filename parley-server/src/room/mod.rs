mod directory;
mod member_store;
mod room;
mod room_command;
mod router;

pub use directory::*;
pub use member_store::*;
pub use room::*;
pub use room_command::*;
pub use router::*;
