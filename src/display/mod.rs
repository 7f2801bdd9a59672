// src/display/mod.rs
//! Display modules for console output

pub mod console;

pub use console::Console;
