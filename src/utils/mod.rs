//! Shared helpers for IO and console output

pub mod io;
pub mod logging;
