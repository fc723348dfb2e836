//! Tone analysis client: maps service responses into scored tags and drives
//! a single in-flight request at a time.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod types;
pub mod ui;
