use std::fs::File;

use anyhow::{Context, Result};
use banking_ledger::bin_utils::Service;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let accounts_path = args
        .next()
        .context("Expected the accounts CSV as the first argument")?;
    let transactions_path = args
        .next()
        .context("Expected the transactions CSV as the second argument")?;

    let accounts = File::open(&accounts_path)
        .with_context(|| format!("Failed to open `{accounts_path}`"))?;
    let transactions = File::open(&transactions_path)
        .with_context(|| format!("Failed to open `{transactions_path}`"))?;

    let service = Service {
        accounts,
        transactions,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err| {
            if err.is_rejection() {
                eprintln!("Rejected at line {line}: {err}")
            } else {
                eprintln!("Error at line {line}: {err}")
            }
        }),
    };
    service.run()
}
