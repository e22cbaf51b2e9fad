//! Binary entrypoint for the TaskQuest CLI.
//!
//! Commands:
//! - `init` - create a starter `config.toml`
//! - `status` - print the guild roster and the current user's journal
//! - `complete <text>` - resolve a completion against the standalone stores
//!
//! The CLI drives the same engine the plugin shim does, against the
//! file-backed shared store, so progression can be inspected and exercised
//! without a host application.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use taskquest::config::Config;
use taskquest::gamify::{
    format_leaderboard, format_notification, resolve_completion, Catalog, JournalView,
    LocalSledStore, SharedConfigFile, StatsRepository,
};
use taskquest::logutil::escape_log;

#[derive(Parser)]
#[command(name = "taskquest")]
#[command(about = "Adventure gamification for markdown todo lists")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a starter configuration file
    Init,
    /// Show the guild roster and the current user's journal
    Status {
        /// Journal user; defaults to the configured current user
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Resolve a task completion and print what it earned
    Complete {
        /// The completed task's text, markers and all
        text: String,
        /// Acting user; defaults to the configured current user
        #[arg(short, long)]
        user: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init has no config to load yet; everything else configures logging
    // from the file before doing work.
    if matches!(cli.command, Commands::Init) {
        init_logging(&None, cli.verbose);
        Config::create_default(&cli.config)?;
        println!("Wrote starter configuration to {}", cli.config);
        return Ok(());
    }

    let config = Config::load(&cli.config)?;
    init_logging(&Some(config.clone()), cli.verbose);

    match cli.command {
        Commands::Init => {}
        Commands::Status { user } => {
            let user = user.unwrap_or_else(|| config.plugin.current_user.clone());
            let (repo, shared) = open_stores(&config)?;
            let data = repo.load(&shared);

            println!("{}", format_leaderboard(&data));
            println!(
                "{}",
                JournalView::new().render(&data, &user, &Catalog::builtin())
            );
        }
        Commands::Complete { text, user } => {
            let user = user.unwrap_or_else(|| config.plugin.current_user.clone());
            let rules = config.progression.rules();
            let catalog = Catalog::builtin();
            let (mut repo, mut shared) = open_stores(&config)?;

            let mut data = repo.load(&shared);
            let stats = data.user_mut(&user);
            let events =
                resolve_completion(stats, &text, &rules, &catalog, &mut rand::thread_rng());
            info!(
                "{} completed '{}': {} gold, rank {}",
                user,
                escape_log(&text),
                stats.currency,
                stats.level
            );
            println!(
                "{} now holds 💰 {} at rank {}",
                user, stats.currency, stats.level
            );
            repo.save(&mut shared, &data);

            for event in &events {
                println!("{}", format_notification(event));
            }
        }
    }

    Ok(())
}

fn open_stores(config: &Config) -> Result<(StatsRepository, SharedConfigFile)> {
    let local = LocalSledStore::open(config.storage.local_db_path())?;
    let shared = SharedConfigFile::new(config.storage.shared_file_path());
    Ok((StatsRepository::new(Box::new(local)), shared))
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // Base level from CLI verbosity overrides config
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|c| c.logging.level.parse().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    if let Some(file) = config.as_ref().and_then(|c| c.logging.file.clone()) {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file)
        {
            let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
            // When stdout is a terminal, mirror file logs to the console too.
            let is_tty = atty::is(atty::Stream::Stdout);

            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());

                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if is_tty {
                    writeln!(fmt, "{}", line)?;
                }
                Ok(())
            });
        }
    }

    let _ = builder.try_init();
}
