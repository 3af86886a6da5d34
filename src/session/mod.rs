pub mod reading;
pub mod result;
pub mod transcript;

pub use reading::{PositionSource, ReadingSession, SessionUpdate};
