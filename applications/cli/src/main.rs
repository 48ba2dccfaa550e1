/// Pulse CLI - scriptable music player controller
use clap::{Parser, Subcommand};
use pulse_cli::{parse_script, CliConfig, Command, Runner, DEFAULT_CONFIG_FILE};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pulse-cli")]
#[command(about = "Pulse Player playback controller on a simulated device", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run player commands and print the session after each one
    Run {
        /// Configuration file path
        #[arg(short, long, env = "PULSE_CONFIG")]
        config: Option<PathBuf>,
        /// Commands separated by ';' (reads stdin when omitted)
        #[arg(short, long)]
        script: Option<String>,
    },
    /// Play the first track and print simulated progress
    Demo {
        /// Configuration file path
        #[arg(short, long, env = "PULSE_CONFIG")]
        config: Option<PathBuf>,
        /// Simulated seconds to play
        #[arg(long, default_value_t = 10.0)]
        seconds: f64,
    },
    /// List the configured playlist
    Tracks {
        /// Configuration file path
        #[arg(short, long, env = "PULSE_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Write a default configuration file
    Init {
        /// Destination path
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing (stdout carries the reports)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulse_cli=info,pulse_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, script } => {
            run(config, script)?;
        }
        Commands::Demo { config, seconds } => {
            demo(config, seconds)?;
        }
        Commands::Tracks { config } => {
            tracks(config)?;
        }
        Commands::Init { path } => {
            init(&path)?;
        }
    }

    Ok(())
}

fn run(config: Option<PathBuf>, script: Option<String>) -> anyhow::Result<()> {
    let config = CliConfig::load(config.as_deref())?;
    let mut runner = Runner::new(&config);
    let stdout = std::io::stdout();

    if let Some(script) = script {
        for command in parse_script(&script)? {
            let report = runner.execute(command);
            serde_json::to_writer(stdout.lock(), &report)?;
            writeln!(stdout.lock())?;
        }
        return Ok(());
    }

    tracing::info!("Reading commands from stdin");
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Interactive input: report bad commands and keep going
        match line.parse::<Command>() {
            Ok(command) => {
                let report = runner.execute(command);
                serde_json::to_writer(stdout.lock(), &report)?;
                writeln!(stdout.lock())?;
            }
            Err(e) => tracing::error!("{}", e),
        }
    }

    Ok(())
}

fn demo(config: Option<PathBuf>, seconds: f64) -> anyhow::Result<()> {
    let config = CliConfig::load(config.as_deref())?;
    let mut runner = Runner::new(&config);

    if let Some(track) = runner.controller().session().current_track() {
        tracing::info!("Now playing: {} - {}", track.title, track.artist);
    }

    for line in runner.demo(seconds) {
        println!("{}", line);
    }

    Ok(())
}

fn tracks(config: Option<PathBuf>) -> anyhow::Result<()> {
    let config = CliConfig::load(config.as_deref())?;

    println!("Playlist:");
    for (index, track) in config.playlist.iter().enumerate() {
        println!("  {} - {} ({})", index, track.title, track.artist);
    }

    Ok(())
}

fn init(path: &std::path::Path) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    CliConfig::write_default(path)?;
    tracing::info!("Wrote default configuration to {}", path.display());
    Ok(())
}
