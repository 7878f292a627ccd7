use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::ledger::Ledger;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(mut ledger: Ledger) -> Result<()> {
    let mut app = App::new();
    app.refresh(&ledger);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &mut ledger);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ledger: &mut Ledger,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, plus the content block's borders
            // and table header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, ledger)?,
                InputMode::Command => handle_command_input(key, app, ledger)?,
                InputMode::Search => handle_search_input(key, app, ledger)?,
                InputMode::Confirm => handle_confirm_input(key, app, ledger)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.filter.query.clear();
            app.reset_transaction_cursor();
            app.refresh(ledger);
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, ledger, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, ledger, Screen::Accounts),
        KeyCode::Char('3') => switch_screen(app, ledger, Screen::Transactions),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, ledger, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, ledger, screens[prev]);
        }
        KeyCode::Enter => handle_enter(app, ledger),
        KeyCode::Esc => handle_escape(app, ledger),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        KeyCode::Char('D') if app.screen == Screen::Transactions => {
            commands::handle_command("delete-txn", app, ledger)?;
        }
        KeyCode::Char('D') if app.screen == Screen::Accounts => {
            commands::handle_command("delete-account", app, ledger)?;
        }
        KeyCode::Char('c') if app.screen == Screen::Transactions => {
            app.filter.kind = app.filter.kind.cycle();
            app.reset_transaction_cursor();
            app.refresh(ledger);
            app.set_status(format!("Type filter: {}", app.filter.kind.label()));
        }
        KeyCode::Char('s') if app.screen == Screen::Transactions => {
            app.filter.status = app.filter.status.cycle();
            app.reset_transaction_cursor();
            app.refresh(ledger);
            app.set_status(format!("Status filter: {}", app.filter.status.label()));
        }
        KeyCode::Char('o') if app.screen == Screen::Transactions => {
            app.filter.sort = app.filter.sort.toggle();
            app.reset_transaction_cursor();
            app.refresh(ledger);
            app.set_status(format!("Journal order: {}", app.filter.sort.label()));
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, ledger)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_search_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            app.screen = Screen::Transactions;
            app.refresh(ledger);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.filter.query.clear();
            app.refresh(ledger);
        }
        KeyCode::Backspace => {
            app.filter.query.pop();
            // Live search: re-derive the view as you type
            app.screen = Screen::Transactions;
            app.reset_transaction_cursor();
            app.refresh(ledger);
        }
        KeyCode::Char(c) => {
            app.filter.query.push(c);
            app.screen = Screen::Transactions;
            app.reset_transaction_cursor();
            app.refresh(ledger);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::VoidTransaction { id, description } => {
                        ledger.void(id)?;
                        app.refresh(ledger);
                        app.set_status(format!("Voided: {description}"));
                    }
                    PendingAction::CloseAccount { id, name } => {
                        // The journal view must not keep pointing at a dead
                        // account.
                        if app.filter.account == Some(id) {
                            app.filter.account = None;
                        }
                        ledger.close_account(id)?;
                        app.refresh(ledger);
                        app.set_status(format!("Closed account: {name}"));
                    }
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        _ => {
            // Any other key = cancel
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, ledger: &Ledger, screen: Screen) {
    app.screen = screen;
    app.refresh(ledger);
    app.set_status(format!("{screen}"));
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Accounts => {
            let page = app.account_page();
            scroll_down(
                &mut app.account_index,
                &mut app.account_scroll,
                app.accounts.len(),
                page,
            );
        }
        Screen::Transactions => {
            let page = app.transaction_page();
            scroll_down(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                app.transactions.len(),
                page,
            );
        }
        Screen::Dashboard => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Accounts => scroll_up(&mut app.account_index, &mut app.account_scroll),
        Screen::Transactions => scroll_up(&mut app.transaction_index, &mut app.transaction_scroll),
        Screen::Dashboard => {}
    }
}

fn handle_enter(app: &mut App, ledger: &Ledger) {
    if app.screen == Screen::Accounts {
        if let Some(account) = app.selected_account() {
            let account_id = account.id;
            let account_name = account.name.clone();
            app.filter.account = Some(account_id);
            app.reset_transaction_cursor();
            app.screen = Screen::Transactions;
            app.refresh(ledger);
            app.set_status(format!("Filtered by: {account_name}"));
        }
    }
}

fn handle_escape(app: &mut App, ledger: &Ledger) {
    if app.screen == Screen::Transactions {
        if !app.filter.query.is_empty() {
            app.filter.query.clear();
            app.reset_transaction_cursor();
            app.refresh(ledger);
            app.set_status("Search cleared");
            return;
        }
        if app.filter.account.is_some() {
            app.filter.account = None;
            app.reset_transaction_cursor();
            app.refresh(ledger);
            app.set_status("Account filter cleared");
            return;
        }
        if !app.filter.is_unconstrained() {
            let sort = app.filter.sort;
            app.filter = crate::ledger::TxnFilter {
                sort,
                ..Default::default()
            };
            app.reset_transaction_cursor();
            app.refresh(ledger);
            app.set_status("Filters cleared");
            return;
        }
    }
    app.status_message.clear();
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Accounts => scroll_to_top(&mut app.account_index, &mut app.account_scroll),
        Screen::Transactions => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll)
        }
        Screen::Dashboard => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Accounts => {
            let page = app.account_page();
            scroll_to_bottom(
                &mut app.account_index,
                &mut app.account_scroll,
                app.accounts.len(),
                page,
            );
        }
        Screen::Transactions => {
            let page = app.transaction_page();
            scroll_to_bottom(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                app.transactions.len(),
                page,
            );
        }
        Screen::Dashboard => {}
    }
}
