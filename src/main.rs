use std::path::PathBuf;

use anyhow::Context;
use bank_ledger::{
    scenario::{read_scenario, Replay},
    Ledger, LedgerConfig, Report,
};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Replays a banking scenario CSV and prints balances, turnovers and bank ledgers.
#[derive(Parser, Debug)]
struct Args {
    scenario_filepath: PathBuf,

    /// First day of the report window (YYYY-MM-DD)
    #[clap(long)]
    from: Option<NaiveDate>,

    /// Last day of the report window (YYYY-MM-DD)
    #[clap(long)]
    to: Option<NaiveDate>,
}

/// Logs go to stderr so the report on stdout stays clean.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bank_ledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = LedgerConfig::from_env()?;

    let rows = read_scenario(&args.scenario_filepath)
        .with_context(|| format!("opening {}", args.scenario_filepath.display()))?;
    let mut replay = Replay::new(Ledger::new(config));
    replay.run(rows);

    let report = Report::new(
        replay.ledger(),
        args.from.unwrap_or(NaiveDate::MIN),
        args.to.unwrap_or(NaiveDate::MAX),
    );
    print!("{}", report);
    Ok(())
}
