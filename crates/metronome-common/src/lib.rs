#![doc = "Common types shared across the Metronome workspace."]

pub mod clock;
pub mod config;
pub mod error;
pub mod stats;

pub use clock::*;
pub use config::*;
pub use error::*;
pub use stats::*;
