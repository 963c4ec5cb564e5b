//! Ace Studio Core
//!
//! Platform-agnostic types, traits, and error handling shared by the
//! generation orchestrator, the playback controller, and the HTTP client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `JobId`, `GenerationParams`
//! - **Wire Types**: job status, job history and resolved-track payloads
//! - **Core Traits**: `StudioApi`, the backend the orchestrator talks to
//! - **Error Handling**: the unified `StudioError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use ace_core::types::{GenerationParams, Track, TrackId};
//!
//! let params = GenerationParams {
//!     title: "Night Drive".to_string(),
//!     style: "synthwave, 110 bpm".to_string(),
//!     ..GenerationParams::default()
//! };
//!
//! let placeholder = Track::placeholder(TrackId::placeholder(), &params, None);
//! assert!(placeholder.is_generating());
//! assert_eq!(placeholder.duration, "--:--");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Result, StudioError};
pub use traits::StudioApi;
pub use types::{
    format_duration, GenerationParams, GenerationResult, GenerationStatus, JobId, JobRecord,
    JobState, JobStatusResponse, RemoteTrack, SubmitResponse, Track, TrackId, TrackMedia,
};
