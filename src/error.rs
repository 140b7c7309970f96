//! Errors from the edges of the simulation
//!
//! The tick itself never fails; only settings I/O and the simulation
//! thread can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("simulation thread panicked")]
    ThreadPanicked,
}

pub type Result<T> = std::result::Result<T, Error>;
