use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(8),    // Balances + recent activity
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_balances(f, columns[0], app);
    render_recent_activity(f, columns[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let net = app.stats.net();
    let credit_count = app.transactions.iter().filter(|t| t.is_credit()).count();
    let debit_count = app.transactions.len() - credit_count;

    // Inflow/outflow/net always describe the filtered view, so the cards
    // follow whatever filters the journal screen has active.
    let scope = if app.filter.is_unconstrained() {
        None
    } else {
        Some("filtered".to_string())
    };

    render_card(
        f,
        cards[0],
        "Inflow",
        app.stats.inflow,
        theme::GREEN,
        Some(format!("{credit_count} credits")),
    );
    render_card(
        f,
        cards[1],
        "Outflow",
        app.stats.outflow,
        theme::RED,
        Some(format!("{debit_count} debits")),
    );
    render_card(
        f,
        cards[2],
        "Net",
        net,
        if net >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
        scope,
    );
    render_card(
        f,
        cards[3],
        "Total Balance",
        app.total_balance,
        if app.total_balance >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
        Some(format!("{} accounts", app.accounts.len())),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount, "USD"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle.unwrap_or_default(), theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_balances(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Account Balances ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.accounts.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "Open an account with :account <name>",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .accounts
        .iter()
        .map(|account| {
            let bal = format_amount(account.balance(), &account.currency);
            let label = format!("{} ({})", account.name, account.account_type);
            let pad = width.saturating_sub(label.chars().count() + bal.len());
            let bal_style = if account.balance() >= Decimal::ZERO {
                theme::credit_style()
            } else {
                theme::debit_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(label, theme::normal_style()),
                Span::raw(" ".repeat(pad)),
                Span::styled(bal, bal_style),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn render_recent_activity(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Recent Activity ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.transactions.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No journal entries in the current view",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let rows = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .transactions
        .iter()
        .take(rows)
        .map(|txn| {
            let currency = app
                .accounts
                .iter()
                .find(|a| a.id == txn.account_id)
                .map(|a| a.currency.as_str())
                .unwrap_or("USD");
            let sign = if txn.is_credit() { "+" } else { "-" };
            let amount_style = if txn.is_credit() {
                theme::credit_style()
            } else {
                theme::debit_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(txn.date.format("%m-%d").to_string(), theme::dim_style()),
                Span::raw("  "),
                Span::styled(truncate(&txn.description, 32), theme::normal_style()),
                Span::raw("  "),
                Span::styled(
                    format!("{sign}{}", format_amount(txn.amount, currency)),
                    amount_style,
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
