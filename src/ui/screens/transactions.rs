use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::TxnStatus;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.transactions.is_empty() {
        let msg = if !app.filter.is_unconstrained() {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No journal entries match the active filters",
                    theme::dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Press Esc to clear them, or :clear-filters",
                    theme::dim_style(),
                )),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled("Journal is empty", theme::dim_style())),
                Line::from(""),
                Line::from(Span::styled(
                    "Post one with :txn <date> <description> <amount>",
                    theme::dim_style(),
                )),
            ]
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Transactions (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Description", "Category", "Status", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let is_cursor = i == app.transaction_index;

            let currency = app
                .accounts
                .iter()
                .find(|a| a.id == txn.account_id)
                .map(|a| a.currency.as_str())
                .unwrap_or("USD");

            let amount_style = if txn.is_credit() {
                theme::credit_style()
            } else {
                theme::debit_style()
            };
            let sign = if txn.is_credit() { "+" } else { "-" };
            let amount_str = format!("{sign}{}", format_amount(txn.amount, currency));

            let description = match &txn.reference {
                Some(r) => format!("{} ({r})", txn.description),
                None => txn.description.clone(),
            };

            let status_span = match txn.status {
                TxnStatus::Cleared => Span::styled("Cleared", theme::dim_style()),
                TxnStatus::Pending => Span::styled("Pending", theme::pending_style()),
            };

            let style = if is_cursor {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(txn.date.format("%Y-%m-%d").to_string()),
                Cell::from(truncate(&description, 40)),
                Cell::from(truncate(&txn.category, 16)),
                Cell::from(status_span),
                Cell::from(Span::styled(amount_str, amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(16),
        Constraint::Length(9),
        Constraint::Length(16),
    ];

    let mut title = format!(" Transactions ({}/{}) ", app.transactions.len(), app.journal_len);
    if let Some(id) = app.filter.account {
        let name = app
            .accounts
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.name.as_str())
            .unwrap_or("?");
        title.push_str(&format!("account: {name} "));
    }
    if !app.filter.query.is_empty() {
        title.push_str(&format!("search: '{}' ", app.filter.query));
    }

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
