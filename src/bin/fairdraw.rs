//! Allocate ticket ranges and run draws from the command line.
//!
//! Usage:
//!   fairdraw ranges --items case.json
//!   fairdraw draw --items case.json --count 5
//!   fairdraw verify 42017
//!
//! `draw` reads `RANDOM_ORG_API_KEY`, `RANDOM_ORG_ENDPOINT` and
//! `RANDOM_ORG_TIMEOUT_MS`; flags override them.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fairdraw::{
    MissPolicy, RandomOrgClient, RandomOrgConfig, TicketTable, WeightedItem, verify_ticket,
};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the ticket ranges for an item list.
    Ranges {
        /// JSON array of items (`name`, `chance`, optional `value`/`rarity`/`color`/`id`).
        #[arg(short, long)]
        items: PathBuf,
    },
    /// Draw tickets and print the winning items.
    Draw {
        #[arg(short, long)]
        items: PathBuf,

        #[arg(short, long, default_value_t = 1)]
        count: usize,

        /// Error on tickets outside every range instead of awarding the first item.
        #[arg(long)]
        fail_closed: bool,

        #[arg(long)]
        api_key: Option<String>,

        #[arg(long)]
        endpoint: Option<String>,

        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Check that a ticket is inside the ticket space.
    Verify { ticket: i64 },
}

fn load_items(path: &Path) -> Result<Vec<WeightedItem>> {
    let data = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("failed to parse {}", path.display()))
}

fn load_table(path: &Path, policy: MissPolicy) -> Result<TicketTable> {
    let table = TicketTable::from_items(&load_items(path)?)
        .with_context(|| format!("invalid item list in {}", path.display()))?;
    Ok(table.with_miss_policy(policy))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{out}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Ranges { items } => {
            let table = load_table(&items, MissPolicy::default())?;
            if !table.is_complete() {
                info!(
                    covered = table.covered_tickets(),
                    "ranges do not cover the ticket space exactly"
                );
            }
            print_json(&table.ranges())
        }
        Command::Draw {
            items,
            count,
            fail_closed,
            api_key,
            endpoint,
            timeout_ms,
        } => {
            let policy = if fail_closed {
                MissPolicy::FailClosed
            } else {
                MissPolicy::FailOpen
            };
            let table = load_table(&items, policy)?;

            let mut config = RandomOrgConfig::from_env();
            if let Some(key) = api_key {
                config = config.with_api_key(key);
            }
            if let Some(endpoint) = endpoint {
                config = config.with_endpoint(endpoint);
            }
            if let Some(ms) = timeout_ms {
                config = config.with_timeout(Duration::from_millis(ms));
            }
            let client = RandomOrgClient::new(config)?;

            let drawn = table.draw_batch(&client, count).await?;
            info!(
                count,
                source = ?drawn.source,
                policy = ?table.miss_policy(),
                "draw complete"
            );
            print_json(&drawn)
        }
        Command::Verify { ticket } => print_json(&verify_ticket(ticket)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_draw_flags() {
        let args = Args::parse_from([
            "fairdraw",
            "draw",
            "--items",
            "case.json",
            "--count",
            "3",
            "--fail-closed",
            "--timeout-ms",
            "250",
        ]);
        match args.command {
            Command::Draw {
                items,
                count,
                fail_closed,
                timeout_ms,
                api_key,
                ..
            } => {
                assert_eq!(items, PathBuf::from("case.json"));
                assert_eq!(count, 3);
                assert!(fail_closed);
                assert_eq!(timeout_ms, Some(250));
                assert!(api_key.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn loads_table_from_item_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("case.json");
        std::fs::write(
            &path,
            r#"[
                {"name": "Knife", "chance": 1, "value": 250.0, "rarity": "gold"},
                {"name": "Sticker", "chance": 99}
            ]"#,
        )
        .unwrap();

        let table = load_table(&path, MissPolicy::FailClosed).unwrap();
        assert!(table.is_complete());
        assert_eq!(table.miss_policy(), MissPolicy::FailClosed);

        let ranges = table.ranges();
        assert_eq!((ranges[0].start_ticket, ranges[0].end_ticket), (0, 999));
        assert_eq!(ranges[0].rarity.as_deref(), Some("gold"));
        assert_eq!((ranges[1].start_ticket, ranges[1].end_ticket), (1_000, 99_999));

        let json = serde_json::to_value(ranges).unwrap();
        assert_eq!(json[1]["item"], "Sticker");
        assert_eq!(json[1]["startTicket"], 1_000);
    }

    #[test]
    fn rejects_bad_item_files() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        let err = load_table(&missing, MissPolicy::default()).unwrap_err();
        assert!(err.to_string().contains("failed to read"), "unexpected error: {err}");

        let garbled = dir.path().join("garbled.json");
        std::fs::write(&garbled, "not json").unwrap();
        let err = load_table(&garbled, MissPolicy::default()).unwrap_err();
        assert!(err.to_string().contains("failed to parse"), "unexpected error: {err}");

        let oversized = dir.path().join("oversized.json");
        std::fs::write(&oversized, r#"[{"name": "big", "chance": 1e17}]"#).unwrap();
        let err = load_table(&oversized, MissPolicy::default()).unwrap_err();
        assert!(err.to_string().contains("invalid item list"), "unexpected error: {err}");
    }

    #[test]
    fn parses_verify() {
        let args = Args::parse_from(["fairdraw", "-v", "verify", "99999"]);
        assert!(args.verbose);
        assert!(matches!(args.command, Command::Verify { ticket: 99_999 }));
    }
}
