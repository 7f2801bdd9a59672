// src/lib.rs
//! GNSS Tester Library
//!
//! Reads NMEA sentences from a serial GNSS receiver and prints the decoded
//! GGA fix data to the console.

pub mod config;
pub mod display;
pub mod error;
pub mod gps;
pub mod monitor;

// Re-export main types for convenience
pub use config::ReaderConfig;
pub use display::Console;
pub use error::{GpsError, Result};
pub use gps::data::GgaFix;
pub use monitor::{GnssReader, LoopExit, SerialLink};
