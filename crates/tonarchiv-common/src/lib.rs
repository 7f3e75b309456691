//! Tonarchiv-Common: Shared path utilities and error types.
//!
//! This crate provides common functionality used across tonarchiv:
//!
//! - **Path Utilities**: File type detection by extension, mirroring input
//!   files into an output tree, naming timestamped run folders
//! - **Error Handling**: Common error type and result alias
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//! use tonarchiv_common::paths::{is_wav_file, mirror_output_path};
//!
//! assert!(is_wav_file(Path::new("track.WAV")));
//!
//! let out = mirror_output_path(
//!     Path::new("/music/in/Boxen/a/b.wav"),
//!     Path::new("/music/in"),
//!     Path::new("/music/out"),
//! )?;
//! assert_eq!(out, Path::new("/music/out/Boxen/a/b.flac"));
//! # Ok::<(), tonarchiv_common::Error>(())
//! ```

pub mod error;
pub mod paths;

pub use error::{Error, Result};
