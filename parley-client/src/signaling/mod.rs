mod signal_sink;
mod signaling_channel;

pub use signal_sink::*;
pub use signaling_channel::*;
