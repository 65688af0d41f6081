//! Tempo Player Library
//!
//! Console front end for the Tempo playback controller: configuration,
//! a simulated audio resource and the command console.
//!
//! This library exposes the components for testing purposes.

pub mod app;
pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod simulator;

// Re-export commonly used types for convenience
pub use app::{LoggingMediaSession, Outcome, PlayerApp};
pub use catalog::load_catalog;
pub use config::PlayerConfig;
pub use console::Command;
pub use error::{PlayerError, Result};
pub use simulator::SimulatedResource;
