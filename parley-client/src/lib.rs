mod client;
mod config;
mod error;
mod manager;
mod media;
mod session;
mod signaling;
mod transport;

pub use client::*;
pub use config::*;
pub use error::*;
pub use manager::*;
pub use media::*;
pub use session::*;
pub use signaling::*;
pub use transport::*;
