//! Binary entrypoint for the Rollcall CLI.
//!
//! Commands:
//! - `init` - write a starter `rollcall.toml`
//! - `join --roster <file> [--kind <kind>] <NAME>...` - add participants and print their aliases
//! - `check --roster <file> <ALIAS>` - print how many participants an alias could mean
//! - `list --roster <file>` - print every alias with its participant
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use rollcall::config::Config;
use rollcall::roster::{JoinPolicy, ParticipantKind, Roster};

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Short aliases for tabletop encounter participants")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "rollcall.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Add participants to a roster and print their aliases
    Join {
        /// Roster file (JSON); created if missing
        #[arg(short, long)]
        roster: String,
        /// Participant kind: character, monster or swarm
        #[arg(short, long, default_value = "monster")]
        kind: String,
        /// Override the configured prefix length for this kind
        #[arg(short, long)]
        prefix_length: Option<usize>,
        /// Always show a disambiguation number
        #[arg(short, long)]
        always_number: bool,
        /// Participant names
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print how many roster participants an alias could refer to
    Check {
        #[arg(short, long)]
        roster: String,
        alias: String,
    },
    /// List every alias in the roster
    List {
        #[arg(short, long)]
        roster: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        init_logging(&None, cli.verbose);
        Config::create_default(&cli.config).await?;
        info!("Configuration file created at {}", cli.config);
        return Ok(());
    }

    let config = Config::load_or_default(&cli.config).await?;
    init_logging(&Some(config.clone()), cli.verbose);

    match cli.command {
        Commands::Init => {}
        Commands::Join {
            roster: roster_path,
            kind,
            prefix_length,
            always_number,
            names,
        } => {
            let kind: ParticipantKind = kind.parse()?;
            let configured = config.policies.for_kind(kind);
            let policy = JoinPolicy {
                prefix_length: prefix_length.unwrap_or(configured.prefix_length),
                always_number: always_number || configured.always_number,
            };
            let mut roster = Roster::load(&roster_path).await?;
            let aliases = roster.join_with_policy(&names, kind, policy, config.aliases)?;
            roster.save(&roster_path).await?;
            for (alias, name) in aliases.iter().zip(&names) {
                println!("{alias}\t{name}");
            }
            info!("{} participants joined {}", aliases.len(), roster_path);
        }
        Commands::Check {
            roster: roster_path,
            alias,
        } => {
            let roster = Roster::load(&roster_path).await?;
            let count = roster.ambiguity(&alias, config.aliases)?;
            println!("{count}");
        }
        Commands::List {
            roster: roster_path,
        } => {
            let roster = Roster::load(&roster_path).await?;
            let participants = roster.sorted(config.aliases)?;
            if participants.is_empty() {
                info!("Roster {} has no participants", roster_path);
            }
            for p in participants {
                println!("{}\t{}\t{}", p.alias, p.name, p.kind);
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|c| c.logging.level_filter().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|c| c.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    if let Some(f) = log_file {
        let file = std::sync::Mutex::new(f);
        // Mirror to the console only when a terminal is attached
        let is_tty = atty::is(atty::Stream::Stderr);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = file.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
