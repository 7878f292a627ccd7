use anyhow::Result;

pub(crate) fn as_cli(args: &[String]) -> Result<()> {
    match args[1].as_str() {
        "demo" => super::tui::as_tui(crate::seed::demo_ledger()?),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("ledgertui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("LedgerTUI — terminal bank-account ledger console");
    println!();
    println!("Usage: ledgertui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch the console with an empty ledger");
    println!("  demo                          Launch the console with sample accounts and entries");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("The ledger lives in memory for one session; use :export inside the");
    println!("console to write the current journal view to CSV.");
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
