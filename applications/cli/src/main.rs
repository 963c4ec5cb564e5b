/// Ace Studio - command-line generation client
mod config;

use ace_core::{GenerationParams, StudioApi, Track};
use ace_generation::{GenerationEvent, GenerationOrchestrator, NotificationLevel};
use ace_server_client::AceServerClient;
use clap::{Parser, Subcommand};
use crate::config::StudioConfig;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ace-studio")]
#[command(about = "Generate and manage Ace Studio tracks", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit generation requests and follow them to completion
    Generate {
        /// Track title
        #[arg(short, long)]
        title: String,
        /// Style description (custom mode)
        #[arg(short, long)]
        style: Option<String>,
        /// Lyrics (custom mode)
        #[arg(short, long)]
        lyrics: Option<String>,
        /// Free-text song description (simple mode)
        #[arg(short, long)]
        description: Option<String>,
        /// No vocals
        #[arg(long)]
        instrumental: bool,
        /// Number of independent jobs
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,
        /// Fixed seed for the first job
        #[arg(long)]
        seed: Option<i64>,
    },
    /// Resume the active jobs from the job history
    Resume,
    /// List your tracks
    Tracks,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ace_studio=info,ace_generation=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = StudioConfig::load(cli.config.as_deref())?;
    config.validate()?;
    let token = config.token()?;

    let client = AceServerClient::new(config.server_config())?;
    tracing::info!(server = %client.url(), "Using Ace Studio server");
    let api: Arc<dyn StudioApi> = Arc::new(client);

    let (orchestrator, mut events) = GenerationOrchestrator::new(api, config.generation.clone());

    match cli.command {
        Commands::Generate {
            title,
            style,
            lyrics,
            description,
            instrumental,
            count,
            seed,
        } => {
            let params = GenerationParams {
                custom_mode: style.is_some() || lyrics.is_some(),
                song_description: description,
                lyrics: lyrics.unwrap_or_default(),
                style: style.unwrap_or_default(),
                title,
                instrumental,
                random_seed: seed.is_none(),
                seed,
                ..GenerationParams::default()
            };

            orchestrator.set_token(Some(token));
            let jobs = orchestrator.submit_batch(&params, count).await?;
            println!("Submitted {} of {} jobs", jobs.len(), count);

            watch(&orchestrator, &mut events).await;
            orchestrator.reconcile().await?;
            print_tracks(&orchestrator.tracks());
        }
        Commands::Resume => {
            let resumed = orchestrator.sign_in(token).await?;
            println!("Resumed {resumed} active jobs");

            watch(&orchestrator, &mut events).await;
            orchestrator.reconcile().await?;
            print_tracks(&orchestrator.tracks());
        }
        Commands::Tracks => {
            orchestrator.set_token(Some(token));
            orchestrator.reconcile().await?;
            print_tracks(&orchestrator.tracks());
        }
    }

    Ok(())
}

/// Print events until every job reached a terminal outcome (or Ctrl-C)
async fn watch(orchestrator: &GenerationOrchestrator, events: &mut UnboundedReceiver<GenerationEvent>) {
    while orchestrator.job_count() > 0 {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => report(&event),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                let cancelled = orchestrator.shutdown();
                tracing::warn!(cancelled, "Interrupted, jobs keep running on the server");
                return;
            }
        }
    }

    while let Ok(event) = events.try_recv() {
        report(&event);
    }
}

fn report(event: &GenerationEvent) {
    match event {
        GenerationEvent::JobStarted { job_id, track_id } => {
            println!("[{track_id}] started job {job_id}");
        }
        GenerationEvent::ProgressUpdated {
            track_id, status, ..
        } => {
            let stage = status.stage.as_deref().unwrap_or("");
            match status.queue_position {
                Some(position) => println!("[{track_id}] queued at #{position}"),
                None => println!("[{track_id}] {:>3.0}% {stage}", status.progress * 100.0),
            }
        }
        GenerationEvent::JobSucceeded { track_id, .. } => println!("[{track_id}] done"),
        GenerationEvent::JobFailed {
            track_id, message, ..
        } => println!("[{track_id}] failed: {message}"),
        GenerationEvent::JobTimedOut { track_id, .. } => println!("[{track_id}] timed out"),
        GenerationEvent::SubmissionFailed { track_id, error } => {
            println!("[{track_id}] not submitted: {error}");
        }
        GenerationEvent::AuthRequired => println!("Sign in required"),
        // Failures are already printed per track
        GenerationEvent::Notification {
            level: NotificationLevel::Error,
            ..
        } => {}
        GenerationEvent::Notification { message, .. } => println!("{message}"),
        GenerationEvent::GeneratingChanged { .. }
        | GenerationEvent::TracksReconciled { .. }
        | GenerationEvent::RevealTrackList => {
            tracing::debug!(?event, "Event");
        }
    }
}

fn print_tracks(tracks: &[Track]) {
    if tracks.is_empty() {
        println!("No tracks");
        return;
    }

    for track in tracks {
        let status = if track.is_generating() {
            "generating"
        } else if track.audio_url().is_some() {
            "ready"
        } else {
            "unavailable"
        };
        println!(
            "{:<40} {:>6}  {:<12} {}",
            track.id.as_str(),
            track.duration,
            status,
            track.title
        );
    }
}
