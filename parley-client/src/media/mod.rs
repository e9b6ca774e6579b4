mod capture;
mod local_media;
mod track;

pub use capture::*;
pub use local_media::*;
pub use track::*;
