//! Ace Studio Generation
//!
//! Background orchestration of music-generation jobs.
//!
//! A submitted request shows up immediately as a placeholder track. Each
//! accepted job gets its own poll task that refreshes the placeholder's
//! progress, and on a terminal outcome the job is torn down and (on
//! success) the track list is reconciled against the backend.
//!
//! # Components
//!
//! - [`JobRegistry`]: the set of in-flight jobs and their poll handles
//! - [`poller`]: the per-job status transition and the poll loop
//! - [`TrackLibrary`]: placeholders, resolved tracks, likes and selection
//! - [`plan_batch`]: per-job parameters of a bulk submission
//! - [`GenerationOrchestrator`]: the public API tying it together
//!
//! # Example
//!
//! ```ignore
//! use ace_generation::{GenerationConfig, GenerationOrchestrator};
//!
//! let (orchestrator, mut events) = GenerationOrchestrator::new(api, GenerationConfig::default());
//! orchestrator.sign_in("token").await?;
//! orchestrator.submit(params).await?;
//!
//! while let Some(event) = events.recv().await {
//!     println!("{event:?}");
//! }
//! ```

#![forbid(unsafe_code)]

mod batch;
mod config;
mod error;
mod events;
mod library;
mod orchestrator;
pub mod poller;
mod registry;

pub use batch::plan_batch;
pub use config::GenerationConfig;
pub use error::{GenerationError, Result};
pub use events::{GenerationEvent, NotificationLevel};
pub use library::TrackLibrary;
pub use orchestrator::{DeleteReport, GenerationOrchestrator};
pub use registry::{ActiveJob, JobRegistry, PollHandle};
