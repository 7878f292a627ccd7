mod export;
mod ledger;
mod models;
mod run;
mod seed;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    match args.len() {
        1 => run::as_tui(ledger::Ledger::new()),
        2.. => run::as_cli(&args),
        _ => {
            eprintln!("Usage: ledgertui [command]");
            Ok(())
        }
    }
}
