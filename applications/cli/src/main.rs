/// SwyPhex Player - terminal front end for the playback engine
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use swyphex_player::{
    commands::{status_line, HELP},
    playlist, Command, PlayerConfig, SimulatedMedia,
};
use swyphex_playback::{
    JsonFilePreferenceStore, MediaAdapter, MemoryPreferenceStore, PlaybackEvent, PreferenceStore,
    TransportController,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "swyphex-player")]
#[command(about = "SwyPhex terminal player with a simulated media element", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a playlist, reading commands from stdin
    Play {
        /// Playlist file (JSON array of items)
        playlist: PathBuf,
        /// Queue index to start from
        #[arg(short, long)]
        start: Option<usize>,
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a playlist file and list its items
    Check {
        /// Playlist file (JSON array of items)
        playlist: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swyphex_playback=info,swyphex_player=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            playlist,
            start,
            config,
        } => {
            play(&playlist, start, config.as_deref()).await?;
        }
        Commands::Check { playlist } => {
            check(&playlist)?;
        }
    }

    Ok(())
}

fn check(path: &Path) -> anyhow::Result<()> {
    let items = playlist::load_playlist(path)?;

    println!("{}: {} items", path.display(), items.len());
    for line in playlist::describe(&items, None) {
        println!("{}", line);
    }
    Ok(())
}

async fn play(path: &Path, start: Option<usize>, config_path: Option<&Path>) -> anyhow::Result<()> {
    // Load configuration
    let config = PlayerConfig::load(config_path)?;
    config.validate()?;

    let items = playlist::load_playlist(path)?;

    let store: Box<dyn PreferenceStore> = match &config.preferences_path {
        Some(preferences_path) => {
            tracing::info!("Preferences stored at {}", preferences_path.display());
            Box::new(JsonFilePreferenceStore::new(preferences_path))
        }
        None => Box::new(MemoryPreferenceStore::new()),
    };

    let media = SimulatedMedia::for_items(&items, config.default_duration_secs);
    let mut controller =
        TransportController::with_preferences(media, config.playback.clone(), store);
    controller.play_queue(items, start)?;

    tracing::info!(
        "Playing {} at {}x (tick {}ms)",
        path.display(),
        config.speed,
        config.tick_ms
    );
    println!("{}", HELP);

    let tick_seconds = config.tick_seconds();
    let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_ms));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                for event in controller.adapter_mut().tick(tick_seconds) {
                    controller.handle_event(event);
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) if line.trim().is_empty() => {}
                    Some(line) => {
                        if !run_command(&line, &mut controller) {
                            break;
                        }
                    }
                    None => {
                        // Non-interactive: play to the end of the queue
                        tracing::debug!("stdin closed");
                        stdin_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }

        for event in controller.drain_events() {
            report(&event, &controller);
        }

        if !stdin_open && !controller.is_playing() {
            break;
        }
    }

    println!("{}", status_line(&controller));
    Ok(())
}

/// Handle one input line; returns false on quit
fn run_command<A: MediaAdapter>(line: &str, controller: &mut TransportController<A>) -> bool {
    let command = match line.parse::<Command>() {
        Ok(command) => command,
        Err(e) => {
            println!("{} (try `help`)", e);
            return true;
        }
    };

    match command {
        Command::Quit => return false,
        Command::Help => println!("{}", HELP),
        Command::List => {
            let queue = controller.queue();
            for entry in playlist::describe(queue.items(), queue.current_index()) {
                println!("{}", entry);
            }
        }
        _ => match command.apply(controller) {
            Ok(Some(message)) => println!("{}", message),
            Ok(None) => {}
            Err(e) => println!("{}", e),
        },
    }
    true
}

fn report<A: MediaAdapter>(event: &PlaybackEvent, controller: &TransportController<A>) {
    match event {
        PlaybackEvent::TrackChanged { track_id, .. } => {
            let title = controller
                .queue()
                .items()
                .iter()
                .find(|item| &item.id == track_id)
                .map(|item| format!("{} - {}", item.title, item.artist))
                .unwrap_or_else(|| track_id.clone());
            println!("▶ {}", title);
        }
        PlaybackEvent::StateChanged { state } => tracing::debug!("State: {:?}", state),
        PlaybackEvent::DurationKnown { duration_seconds } => {
            tracing::debug!("Duration: {:.1}s", duration_seconds);
        }
        PlaybackEvent::PositionUpdate {
            position_seconds, ..
        } => tracing::trace!("Position: {:.1}s", position_seconds),
        PlaybackEvent::VolumeChanged { level, is_muted } => {
            if *is_muted {
                println!("volume muted");
            } else {
                println!("volume {:.0}%", level * 100.0);
            }
        }
        PlaybackEvent::QueueChanged { length } => tracing::info!("Queue: {} items", length),
        PlaybackEvent::ModesChanged { shuffle, repeat } => {
            println!(
                "shuffle {}, repeat {:?}",
                if *shuffle { "on" } else { "off" },
                repeat
            );
        }
        PlaybackEvent::QueueExhausted { .. } => println!("■ end of queue"),
        PlaybackEvent::MediaError { track_id, reason } => {
            println!("✗ {} failed: {}", track_id, reason);
        }
    }
}
