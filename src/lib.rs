//! Tonarchiv - Classical WAV archive to tagged FLAC converter
//!
//! This library crate exposes the conversion pipeline for integration testing.

pub mod config;
pub mod cover;
pub mod pipeline;
pub mod scanner;
pub mod tagging;
