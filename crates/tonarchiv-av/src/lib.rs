//! # tonarchiv-av
//!
//! Audio transcoding through the `ffmpeg` command line tool.
//!
//! This crate provides functionality for:
//! - Detecting external tools and resolving their paths
//! - Transcoding WAV files to FLAC with all source metadata dropped
//! - Staging output files next to their destination and moving them into
//!   place only once they are complete
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use tonarchiv_av::{FlacTranscoder, Workspace};
//!
//! let transcoder = FlacTranscoder::from_path(None)?;
//! let workspace = Workspace::new("/music/out/Bach-BWV1-01-Sinfonia.flac")?;
//! transcoder.transcode("/music/in/Bach-BWV1-01-Sinfonia.wav".as_ref(), workspace.output())?;
//! workspace.finalize()?;
//! # Ok::<(), tonarchiv_av::Error>(())
//! ```

mod error;
pub mod tools;
pub mod transcode;
pub mod workspace;

// Re-exports
pub use error::{Error, Result};
pub use tools::{check_tool_with_arg, check_tools, get_tool_path, require_tool, ToolInfo, FFMPEG};
pub use transcode::{FlacTranscoder, DEFAULT_COMPRESSION_LEVEL, MAX_COMPRESSION_LEVEL};
pub use workspace::Workspace;
