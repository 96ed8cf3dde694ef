//! Console front end for the chess engine
//!
//! Session configuration, the interactive game loop and JSON game records.

pub mod config;
pub mod record;
pub mod session;

pub use config::{ConfigError, Mode, SessionConfig};
pub use record::GameRecord;
pub use session::Session;
