// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod learning;
pub mod logging;
pub mod persistence;
pub mod session;
pub mod trials;

pub use crate::core::engine::{GuessEngine, Oracle};
pub use crate::core::table::PrefixTable;
pub use crate::error::{Result, ShannonError};
pub use crate::learning::index;
pub use crate::session::{play, play_auto, GameSession, PlayMode};
