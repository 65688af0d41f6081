/// Tempo Player - console music player
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use tempo_core::{LyricsDocument, LyricsRequest};
use tempo_lyrics::{LyricsClient, LyricsProvider};
use tempo_player::{load_catalog, Command, Outcome, PlayerApp, PlayerConfig};
use tempo_storage::{JsonFileStore, PlaylistBook, SessionStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tempo-player")]
#[command(about = "Tempo console music player", long_about = None)]
struct Cli {
    /// Config file (defaults to ./tempo.toml when present)
    #[arg(short, long, env = "TEMPO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive player (default)
    Play,

    /// Show the last track that was loaded
    LastPlayed,

    /// List playlists and their entries
    Playlists,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tempo_player=info,tempo_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = PlayerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let local = tokio::task::LocalSet::new();
            local.block_on(&runtime, run_player(config))?;
        }
        Commands::LastPlayed => {
            let store = JsonFileStore::open(&config.storage.state_file)?;
            match SessionStore::new(store).read()? {
                Some(snapshot) => println!("{} - {}", snapshot.title, snapshot.artist),
                None => println!("Nothing played yet"),
            }
        }
        Commands::Playlists => {
            let store = JsonFileStore::open(&config.storage.state_file)?;
            for (name, entries) in PlaylistBook::new(store).all()? {
                println!("{name} ({})", entries.len());
                for entry in entries {
                    println!("  {} - {}", entry.title, entry.artist);
                }
            }
        }
    }

    Ok(())
}

type LyricsOutcome = (u64, tempo_lyrics::Result<LyricsDocument>);

async fn run_player(config: PlayerConfig) -> anyhow::Result<()> {
    let catalog = Arc::new(
        load_catalog(&config.catalog.path).context("Failed to load the catalog")?,
    );
    let store = Rc::new(RefCell::new(
        JsonFileStore::open(&config.storage.state_file)
            .context("Failed to open the state file")?,
    ));

    let lyrics_client = if config.lyrics.enabled {
        let client = LyricsClient::new(config.lyrics_config(), Arc::clone(&catalog))?;
        tracing::info!(base_url = %client.base_url(), "Lyrics enabled");
        Some(Arc::new(client))
    } else {
        tracing::info!("Lyrics disabled");
        None
    };

    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<LyricsRequest>();
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<LyricsOutcome>();

    let mut app = PlayerApp::new(catalog, store, &config, request_tx);

    match app.last_played() {
        Ok(Some(snapshot)) => {
            tracing::info!(title = %snapshot.title, artist = %snapshot.artist, "Last played");
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Could not read last played track"),
    }

    if app.cue_album_shelf()? {
        tracing::info!("Album shelf queued");
    }

    println!("Tempo ready. Type help for commands.");
    print_lines(&app.status());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(config.tick_interval());
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let tick = config.tick_interval();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(command) => match app.execute(command) {
                        Outcome::Continue(output) => print_lines(&output),
                        Outcome::Quit => break,
                    },
                    Err(e) => println!("{e}"),
                }
            }
            _ = ticker.tick() => {
                app.tick(tick);
            }
            Some(request) = request_rx.recv() => {
                match &lyrics_client {
                    Some(client) => {
                        let client = Arc::clone(client);
                        let outcome_tx = outcome_tx.clone();
                        tokio::task::spawn_local(async move {
                            let outcome = client.fetch(&request).await;
                            if outcome_tx.send((request.token, outcome)).is_err() {
                                tracing::debug!(
                                    token = request.token,
                                    "Player loop gone, lyrics dropped"
                                );
                            }
                        });
                    }
                    None => {
                        app.lyrics_unavailable(request.token);
                    }
                }
            }
            Some((token, outcome)) = outcome_rx.recv() => {
                if app.apply_lyrics(token, outcome) && app.mirrors().is_expanded_open() {
                    print_lines(&app.status());
                }
            }
        }
    }

    tracing::info!("Goodbye");
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
