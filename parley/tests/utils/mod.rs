pub mod fakes;

pub use fakes::*;
pub use harness::*;
