//! Platform abstraction layer
//!
//! Shared by the browser entry point and native runs:
//! - Frame timestamps to fixed simulation steps (`clock`)
//! - Input queueing, ticking and high-score persistence (`session`)

pub mod clock;
pub mod session;

pub use clock::FrameClock;
pub use session::Session;
