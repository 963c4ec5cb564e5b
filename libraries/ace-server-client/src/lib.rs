//! Ace Studio Server Client
//!
//! HTTP client library for the Ace Studio generation API.
//!
//! # Features
//!
//! - **Generation**: submit jobs, poll their status, read the job history
//! - **Songs**: list the caller's tracks, like, record plays, delete
//! - **`StudioApi`**: the client implements the core backend trait, so the
//!   orchestrator can run against it directly
//!
//! # Example
//!
//! ```ignore
//! use ace_server_client::{AceServerClient, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AceServerClient::new(ServerConfig::new("http://localhost:3001"))?;
//!
//!     // Tokens are passed per call; the client keeps no session
//!     let songs = client.songs().list_my_songs("secret-token").await?;
//!     println!("Found {} tracks", songs.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod generate;
mod songs;
mod types;

// Re-export main types
pub use client::AceServerClient;
pub use error::{Result, ServerClientError};
pub use types::ServerConfig;

// Re-export sub-clients for direct use if needed
pub use generate::GenerateClient;
pub use songs::SongsClient;
