mod console;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use walink_adapters::persistence::{MemoryStore, SqliteStore};
use walink_app::config::GeneratorConfig;
use walink_app::generation_service::GenerationService;
use walink_ports::outbound::KeyValueStore;
use walink_ports::types::Generation;

use crate::console::ConsoleNotifier;

#[derive(Parser, Debug)]
#[command(name = "walink", about = "Saudi WhatsApp link generator")]
struct Cli {
    /// SQLite database holding the history. Created on first use.
    #[arg(long, env = "WALINK_DB", default_value = "sqlite://walink.db")]
    db: String,

    /// Keep history in memory for this run only. Ignores `--db`.
    #[arg(long)]
    memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a link for one number. Spaces between parts are allowed.
    Generate {
        #[arg(required = true, num_args = 1..)]
        number: Vec<String>,
    },
    /// Read numbers from stdin, one per line.
    Repl,
    /// List recent links, newest first.
    History,
    /// Forget all recent links.
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_observability();

    let cli = Cli::parse();
    let config = GeneratorConfig::from_env()?;
    info!(country_code = %config.country_code, max_history = config.max_history, "starting walink");

    if cli.memory {
        let store = MemoryStore::new();
        run(GenerationService::new(ConsoleNotifier, store, config), cli.command).await
    } else {
        let store = SqliteStore::new(&cli.db).await?;
        run(GenerationService::new(ConsoleNotifier, store, config), cli.command).await
    }
}

async fn run<S>(
    svc: GenerationService<ConsoleNotifier, S>,
    command: Command,
) -> anyhow::Result<ExitCode>
where
    S: KeyValueStore + 'static,
{
    svc.load_history().await;

    let code = match command {
        Command::Generate { number } => generate(&svc, &number.join(" ")).await,
        Command::Repl => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                if line.trim().is_empty() {
                    continue;
                }
                generate(&svc, &line).await;
            }
            ExitCode::SUCCESS
        }
        Command::History => {
            for (i, entry) in svc.history().iter().enumerate() {
                println!("{}. {}  ({})", i + 1, entry.link, entry.phone_number);
            }
            ExitCode::SUCCESS
        }
        Command::Clear => {
            svc.clear_history().await;
            ExitCode::SUCCESS
        }
    };

    // writes are queued in the background; wait for them before exiting
    svc.flush_history().await;
    Ok(code)
}

async fn generate<S>(svc: &GenerationService<ConsoleNotifier, S>, input: &str) -> ExitCode
where
    S: KeyValueStore + 'static,
{
    match svc.generate(input).await {
        Ok(Generation::Generated(link)) => {
            println!("{link}");
            ExitCode::SUCCESS
        }
        Ok(Generation::Busy) => ExitCode::SUCCESS,
        // already reported through the notifier
        Err(_) => ExitCode::FAILURE,
    }
}

fn init_observability() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_defaults_to_local_sqlite_file() {
        let cli = Cli::try_parse_from(["walink", "history"]).unwrap();
        assert_eq!(cli.db, "sqlite://walink.db");
        assert!(!cli.memory);
    }

    #[test]
    fn memory_flag_selects_in_memory_store() {
        let cli = Cli::try_parse_from(["walink", "--memory", "generate", "055", "994", "8149"]).unwrap();
        assert!(cli.memory);
        match cli.command {
            Command::Generate { number } => assert_eq!(number.join(" "), "055 994 8149"),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
