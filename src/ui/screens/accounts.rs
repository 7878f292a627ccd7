use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.accounts.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No accounts yet.",
                theme::dim_style().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Open one with :account <name> [type] [opening balance]",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY)),
        );
        f.render_widget(msg, area);
        return;
    }

    // Each account card is 4 lines: title, detail, balance, bottom border.
    let card_height = 4_usize;
    let visible = area.height.saturating_sub(2) as usize;
    let cards_per_page = (visible / card_height).max(1);

    let items: Vec<ListItem> = app
        .accounts
        .iter()
        .enumerate()
        .skip(app.account_scroll)
        .take(cards_per_page)
        .map(|(i, account)| {
            let selected = i == app.account_index;

            let border_color = if selected {
                theme::ACCENT
            } else {
                theme::account_color(&account.color)
            };

            let title = format!(" {} ({}) ", account.name, account.account_type);
            let title_line = Line::from(vec![
                Span::styled("┌─", Style::default().fg(border_color)),
                Span::styled(
                    title,
                    Style::default()
                        .fg(if selected {
                            theme::ACCENT
                        } else {
                            theme::TEXT_DIM
                        })
                        .add_modifier(Modifier::BOLD),
                ),
            ]);

            let mut detail = vec![
                Span::styled(format!("  {} ", account.bank_name), theme::dim_style()),
                Span::styled(account.number.clone(), theme::normal_style()),
                Span::styled(format!("  {}", account.currency), theme::dim_style()),
            ];
            if let Some(ref gl) = account.gl_account_id {
                detail.push(Span::styled(format!("  GL {gl}"), theme::dim_style()));
            }
            let detail_line = Line::from(detail);

            let bal_color = if account.balance() >= Decimal::ZERO {
                theme::GREEN
            } else {
                theme::RED
            };
            let balance_line = Line::from(vec![
                Span::styled("  Balance: ", theme::dim_style()),
                Span::styled(
                    format_amount(account.balance(), &account.currency),
                    Style::default().fg(bal_color).add_modifier(Modifier::BOLD),
                ),
            ]);

            let border_width = (area.width as usize).saturating_sub(3);
            let bottom_line = Line::from(Span::styled(
                format!("└{}", "─".repeat(border_width)),
                Style::default().fg(border_color),
            ));

            ListItem::new(vec![title_line, detail_line, balance_line, bottom_line])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " {} Accounts | j/k navigate | Enter view journal ",
                    app.accounts.len()
                ),
                theme::dim_style(),
            )),
    );
    f.render_widget(list, area);
}
