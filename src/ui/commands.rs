use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::export;
use crate::ledger::{KindFilter, Ledger, SortOrder, StatusFilter, TxnFilter};
use crate::models::{mask_number, AccountDraft, AccountType, DebitCredit, TransactionDraft, TxnStatus};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Ledger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit LedgerTUI", cmd_quit, r);
    register_command!("quit", "Quit LedgerTUI", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("a", "Go to Accounts", cmd_accounts, r);
    register_command!("accounts", "Go to Accounts", cmd_accounts, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "account",
        "Open account (e.g. :account Operating checking 2500)",
        cmd_account,
        r
    );
    register_command!(
        "edit-account",
        "Edit selected account (e.g. :edit-account bank First National)",
        cmd_edit_account,
        r
    );
    register_command!(
        "delete-account",
        "Close selected account and void its entries",
        cmd_delete_account,
        r
    );
    register_command!(
        "txn",
        "Post entry (e.g. :txn 2025-07-01 Invoice #1042 1250.00)",
        cmd_txn,
        r
    );
    register_command!("delete-txn", "Void selected transaction", cmd_delete_txn, r);
    register_command!(
        "filter-account",
        "Filter journal by account (e.g. :filter-account Operating)",
        cmd_filter_account,
        r
    );
    register_command!("fa", "Filter journal by account", cmd_filter_account, r);
    register_command!(
        "filter-type",
        "Filter journal by type (all | credit | debit)",
        cmd_filter_type,
        r
    );
    register_command!(
        "filter-status",
        "Filter journal by status (all | cleared | pending)",
        cmd_filter_status,
        r
    );
    register_command!(
        "sort",
        "Set journal order (insertion | date), or toggle",
        cmd_sort,
        r
    );
    register_command!(
        "search",
        "Search description/category (e.g. :search invoice)",
        cmd_search,
        r
    );
    register_command!("s", "Search description/category", cmd_search, r);
    register_command!("clear-filters", "Reset all journal filters", cmd_clear_filters, r);
    register_command!(
        "export",
        "Export the filtered journal to CSV (e.g. :export ~/journal.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, ledger)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 2) // skip short aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh(ledger);
    Ok(())
}

fn cmd_accounts(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Accounts;
    app.refresh(ledger);
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    app.refresh(ledger);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_account(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if args.is_empty() {
        let types: Vec<&str> = AccountType::all().iter().map(|t| t.as_str()).collect();
        app.set_status(format!(
            "Usage: :account <name> [type] [opening balance]. Types: {}",
            types.join(", ")
        ));
        return Ok(());
    }

    let mut name = args;
    let mut opening = Decimal::ZERO;
    let mut account_type = AccountType::Checking;

    // Trailing tokens are optional: "... [type] [opening]"
    if let Some((rest, last)) = name.rsplit_once(' ') {
        if let Ok(v) = Decimal::from_str(last) {
            opening = v;
            name = rest;
        }
    }
    if let Some((rest, last)) = name.rsplit_once(' ') {
        if let Some(t) = AccountType::parse(last) {
            account_type = t;
            name = rest;
        }
    }

    let name = name.trim().to_string();
    if name.is_empty() {
        app.set_status("Account name is required");
        return Ok(());
    }

    ledger.open_account(AccountDraft::new(name.clone(), account_type, opening));
    app.screen = Screen::Accounts;
    app.refresh(ledger);
    app.account_index = app.accounts.len().saturating_sub(1);
    app.set_status(format!("Opened account: {name}"));
    Ok(())
}

fn cmd_edit_account(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    // The edit form round-trips the stored account; the balance rides along
    // untouched because the draft carries no opening_balance.
    let (id, name, mut draft) = match app.selected_account() {
        Some(account) => (account.id, account.name.clone(), account.draft()),
        None => {
            app.set_status("Navigate to Accounts and select one first");
            return Ok(());
        }
    };

    let Some((field, value)) = args.split_once(' ').map(|(f, v)| (f, v.trim())) else {
        app.set_status(
            "Usage: :edit-account <field> <value>. Fields: name, bank, number, currency, type, color, gl",
        );
        return Ok(());
    };
    match field {
        "name" => draft.name = value.to_string(),
        "bank" => draft.bank_name = value.to_string(),
        "number" => draft.number = mask_number(value),
        "currency" => draft.currency = value.to_uppercase(),
        "type" => match AccountType::parse(value) {
            Some(t) => draft.account_type = t,
            None => {
                app.set_status(format!("Unknown account type: {value}"));
                return Ok(());
            }
        },
        "color" => draft.color = value.to_string(),
        "gl" => draft.gl_account_id = (value != "-").then(|| value.to_string()),
        other => {
            app.set_status(format!("Unknown field: {other}"));
            return Ok(());
        }
    }

    ledger.update_account(id, draft)?;
    app.refresh(ledger);
    app.set_status(format!("Updated {field} on {name}"));
    Ok(())
}

fn cmd_delete_account(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let Some(account) = app.selected_account() else {
        app.set_status("No account selected");
        return Ok(());
    };
    let id = account.id;
    let name = account.name.clone();
    let entries = ledger.journal().iter().filter(|t| t.account_id == id).count();

    app.confirm_message = format!("Close '{name}' and void its {entries} journal entries?");
    app.pending_action = Some(PendingAction::CloseAccount { id, name });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_txn(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    const USAGE: &str =
        "Usage: :txn [date] <description> <amount> [category] [credit|debit] [pending]. Negative amount = debit";
    if args.is_empty() {
        app.set_status(USAGE);
        return Ok(());
    }

    // A leading YYYY-MM-DD token is the entry date; otherwise today.
    let mut date = chrono::Local::now().date_naive();
    let mut rest = args;
    if let Some((first, tail)) = args.split_once(' ') {
        if let Ok(d) = NaiveDate::parse_from_str(first, "%Y-%m-%d") {
            date = d;
            rest = tail;
        }
    }

    let mut tokens: Vec<&str> = rest.split_whitespace().collect();

    let mut status = TxnStatus::Cleared;
    if let Some(s) = tokens.last().and_then(|t| TxnStatus::parse(t)) {
        status = s;
        tokens.pop();
    }

    // An explicit credit/debit token wins over the amount's sign.
    let mut explicit_kind = None;
    if let Some(k) = tokens.last().and_then(|t| DebitCredit::parse(t)) {
        explicit_kind = Some(k);
        tokens.pop();
    }

    // The amount is the last numeric token; one trailing word after it is
    // taken as the category.
    let mut category = String::new();
    let signed = match tokens.last().and_then(|t| Decimal::from_str(t).ok()) {
        Some(v) => {
            tokens.pop();
            v
        }
        None => {
            let Some(cat) = tokens.pop() else {
                app.set_status(USAGE);
                return Ok(());
            };
            match tokens.last().and_then(|t| Decimal::from_str(t).ok()) {
                Some(v) => {
                    tokens.pop();
                    category = cat.to_string();
                    v
                }
                None => {
                    app.set_status(USAGE);
                    return Ok(());
                }
            }
        }
    };

    let description = tokens.join(" ");
    if description.is_empty() {
        app.set_status(USAGE);
        return Ok(());
    }

    let Some(account_id) = app.filter.account.or_else(|| app.selected_account().map(|a| a.id))
    else {
        app.set_status("No account to post against. Open one with :account <name>");
        return Ok(());
    };

    let kind = explicit_kind.unwrap_or(if signed < Decimal::ZERO {
        DebitCredit::Debit
    } else {
        DebitCredit::Credit
    });
    let mut draft = TransactionDraft::new(account_id, date, description.clone(), signed.abs(), kind);
    draft.category = category;
    draft.status = status;

    match ledger.post(draft) {
        Ok(_) => {
            let account_name = ledger
                .account(account_id)
                .map(|a| a.name.clone())
                .unwrap_or_default();
            app.screen = Screen::Transactions;
            app.reset_transaction_cursor();
            app.refresh(ledger);
            app.set_status(format!("Posted: {description} ({kind}) to {account_name}"));
        }
        Err(e) => app.set_status(format!("Rejected: {e}")),
    }
    Ok(())
}

fn cmd_delete_txn(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions || app.transactions.is_empty() {
        app.set_status("Navigate to Transactions and select one first");
        return Ok(());
    }

    if let Some((id, desc)) = app
        .selected_transaction()
        .map(|t| (t.id, t.description.clone()))
    {
        app.confirm_message = format!("Void '{desc}'?");
        app.pending_action = Some(PendingAction::VoidTransaction {
            id,
            description: desc,
        });
        app.input_mode = InputMode::Confirm;
    }
    Ok(())
}

fn cmd_filter_account(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if args.is_empty() {
        app.filter.account = None;
        app.screen = Screen::Transactions;
        app.reset_transaction_cursor();
        app.refresh(ledger);
        app.set_status("Account filter cleared - showing all entries");
        return Ok(());
    }

    let found = ledger
        .accounts()
        .iter()
        .find(|a| a.name.to_lowercase() == args.to_lowercase());

    if let Some(account) = found {
        let name = account.name.clone();
        app.filter.account = Some(account.id);
        app.screen = Screen::Transactions;
        app.reset_transaction_cursor();
        app.refresh(ledger);
        app.set_status(format!("Filtering by account: {name}"));
    } else {
        let names: Vec<&str> = ledger.accounts().iter().map(|a| a.name.as_str()).collect();
        app.set_status(format!("Account not found. Available: {}", names.join(", ")));
    }
    Ok(())
}

fn cmd_filter_type(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let kind = match args.to_lowercase().as_str() {
        "" | "all" => KindFilter::All,
        "credit" => KindFilter::Credit,
        "debit" => KindFilter::Debit,
        other => {
            app.set_status(format!("Unknown type '{other}'. Use all, credit, or debit"));
            return Ok(());
        }
    };
    app.filter.kind = kind;
    app.screen = Screen::Transactions;
    app.reset_transaction_cursor();
    app.refresh(ledger);
    app.set_status(format!("Type filter: {}", kind.label()));
    Ok(())
}

fn cmd_filter_status(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let status = match args.to_lowercase().as_str() {
        "" | "all" => StatusFilter::All,
        "cleared" => StatusFilter::Cleared,
        "pending" => StatusFilter::Pending,
        other => {
            app.set_status(format!(
                "Unknown status '{other}'. Use all, cleared, or pending"
            ));
            return Ok(());
        }
    };
    app.filter.status = status;
    app.screen = Screen::Transactions;
    app.reset_transaction_cursor();
    app.refresh(ledger);
    app.set_status(format!("Status filter: {}", status.label()));
    Ok(())
}

fn cmd_sort(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let order = match args.to_lowercase().as_str() {
        "" => app.filter.sort.toggle(),
        "insertion" => SortOrder::Insertion,
        "date" => SortOrder::Date,
        other => {
            app.set_status(format!("Unknown order '{other}'. Use insertion or date"));
            return Ok(());
        }
    };
    app.filter.sort = order;
    app.reset_transaction_cursor();
    app.refresh(ledger);
    app.set_status(format!("Journal order: {}", order.label()));
    Ok(())
}

fn cmd_search(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.filter.query = args.to_string();
    app.screen = Screen::Transactions;
    app.reset_transaction_cursor();
    app.refresh(ledger);

    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        app.set_status(format!("Searching: {args}"));
    }
    Ok(())
}

fn cmd_clear_filters(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let sort = app.filter.sort;
    app.filter = TxnFilter { sort, ..TxnFilter::default() };
    app.reset_transaction_cursor();
    app.refresh(ledger);
    app.set_status("Filters cleared");
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{}", export::EXPORT_FILE_NAME)
    } else {
        crate::run::shellexpand(args)
    };

    let view = app.filtered_view();
    match export::to_path(std::path::Path::new(&path), &view) {
        Ok(0) => app.set_status("No entries in the current view to export"),
        Ok(count) => app.set_status(format!("Exported {count} entries to {path}")),
        Err(e) => app.set_status(format!("Export failed: {e}")),
    }
    Ok(())
}
